// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! The `[deployment]` section of `Position.toml`.

use std::collections::BTreeMap;

use alloy::primitives::Address;
use serde::Deserialize;

use super::DeploymentError;
use crate::core::{manifest::ManifestConfig, placeholders::Placeholders};

/// Fees are expressed in basis points, so 100% is 10,000.
pub const MAX_PLATFORM_FEE_BPS: u16 = 10_000;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DeploymentSettings {
    #[serde(default)]
    pub base_uri: String,
    /// Defaults to the deployer.
    pub fee_recipient: Option<Address>,
    #[serde(default)]
    pub platform_fee_bps: u16,
    /// Defaults to the deployer.
    pub admin_wallet: Option<Address>,
    #[serde(default)]
    pub contracts: Vec<ContractSpec>,
}

/// A contract to deploy, in deployment order.
#[derive(Clone, Debug, Deserialize)]
pub struct ContractSpec {
    pub name: String,
    /// Artifact to deploy, when it differs from `name`.
    pub artifact: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ContractSpec {
    pub fn artifact_name(&self) -> &str {
        self.artifact.as_deref().unwrap_or(&self.name)
    }
}

impl DeploymentSettings {
    /// Settings as deployed by `deployer`, with an optional fee recipient override.
    pub fn resolve(
        &self,
        deployer: Address,
        fee_recipient_override: Option<Address>,
    ) -> Result<ManifestConfig, DeploymentError> {
        if self.platform_fee_bps > MAX_PLATFORM_FEE_BPS {
            return Err(DeploymentError::InvalidPlatformFee(self.platform_fee_bps));
        }
        Ok(ManifestConfig {
            base_uri: self.base_uri.clone(),
            fee_recipient: fee_recipient_override
                .or(self.fee_recipient)
                .unwrap_or(deployer),
            platform_fee: self.platform_fee_bps,
            admin_wallet: self.admin_wallet.unwrap_or(deployer),
        })
    }

    /// Checks the contract list before anything is sent.
    pub fn validate(&self) -> Result<(), DeploymentError> {
        if self.contracts.is_empty() {
            return Err(DeploymentError::NothingToDeploy);
        }
        let mut seen = std::collections::BTreeSet::new();
        for contract in &self.contracts {
            if !seen.insert(contract.name.as_str()) {
                return Err(DeploymentError::DuplicateContract(contract.name.clone()));
            }
        }
        Ok(())
    }
}

/// Values available to `{key}` placeholders during a deployment.
pub fn placeholders(
    config: &ManifestConfig,
    deployer: Address,
    contracts: &BTreeMap<String, Address>,
) -> Placeholders {
    let mut placeholders = Placeholders::new();
    placeholders.insert("deployer", deployer);
    placeholders.insert("admin_wallet", config.admin_wallet);
    placeholders.insert("fee_recipient", config.fee_recipient);
    placeholders.insert("platform_fee_bps", config.platform_fee);
    placeholders.insert("base_uri", &config.base_uri);
    for (name, address) in contracts {
        placeholders.insert_contract(name, *address);
    }
    placeholders
}
