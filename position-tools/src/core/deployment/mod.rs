// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{collections::BTreeMap, path::PathBuf};

use alloy::{
    primitives::{Address, TxHash, U256},
    transports::{RpcError, TransportErrorKind},
};
use chrono::Utc;
use typed_builder::TypedBuilder;

use crate::{
    core::{
        artifact::{Artifact, ArtifactError},
        gas::GasReport,
        manifest::DeploymentManifest,
        placeholders::PlaceholderError,
    },
    utils::{
        color::{Color, DebugColor},
        format_ether,
    },
};

pub use creator::{ContractCreator, Created, OnChainCreator};
pub use request::DeploymentRequest;
pub use settings::{placeholders, ContractSpec, DeploymentSettings, MAX_PLATFORM_FEE_BPS};

mod creator;
mod request;
mod settings;

/// How a deployment run talks to the chain.
#[derive(Debug, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
pub struct DeploymentConfig {
    #[builder(!default)]
    pub network: String,
    #[builder(!default)]
    pub artifacts_dir: PathBuf,
    #[builder(default = 1)]
    pub confirmations: u64,
    pub fee_recipient_override: Option<Address>,
    pub max_fee_per_gas_wei: Option<u128>,
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("rpc error: {0}")]
    Rpc(#[from] RpcError<TransportErrorKind>),
    #[error("{0}")]
    Artifact(#[from] ArtifactError),
    #[error("{0}")]
    Placeholder(#[from] PlaceholderError),

    #[error("gas estimation failed: {summary}")]
    GasEstimation {
        summary: String,
        #[source]
        source: RpcError<TransportErrorKind>,
    },
    #[error("failed to send deploy tx: {summary}")]
    Send {
        summary: String,
        #[source]
        source: RpcError<TransportErrorKind>,
    },
    #[error("tx failed to complete")]
    FailedToComplete,
    #[error("failed to get balance")]
    FailedToGetBalance,
    #[error("account {} has no funds to deploy with", .address.red())]
    InsufficientBalance { address: Address },
    #[error(
        "not enough funds in account {} to deploy\n\
         balance {} < {}",
        .from_address.red(),
        red_ether(.balance),
        red_ether(.cost),
    )]
    NotEnoughFunds {
        from_address: Address,
        balance: U256,
        cost: U256,
    },
    #[error("deploy tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("missing address: {0}")]
    NoContractAddress(String),
    #[error("platform fee of {0} bps exceeds 100%")]
    InvalidPlatformFee(u16),
    #[error("no contracts listed under [[deployment.contracts]]")]
    NothingToDeploy,
    #[error("contract {0} is listed more than once")]
    DuplicateContract(String),
}

fn red_ether(wei: &U256) -> String {
    format_ether(*wei).red()
}

/// Deploys every configured contract in order and returns the resulting manifest.
///
/// Constructor arguments may refer to contracts deployed earlier in the same run. Nothing is
/// written to disk.
pub async fn deploy(
    settings: &DeploymentSettings,
    config: &DeploymentConfig,
    gas: &mut GasReport,
    creator: &impl ContractCreator,
) -> Result<DeploymentManifest, DeploymentError> {
    settings.validate()?;
    let deployer = creator.deployer();
    let chain_id = creator.chain_id().await?;
    let manifest_config = settings.resolve(deployer, config.fee_recipient_override)?;

    // Fail on a missing artifact before anything is sent
    let artifacts = settings
        .contracts
        .iter()
        .map(|spec| Artifact::find(&config.artifacts_dir, spec.artifact_name()))
        .collect::<Result<Vec<_>, _>>()?;

    let balance = creator.balance().await?;
    if balance.is_zero() {
        return Err(DeploymentError::InsufficientBalance { address: deployer });
    }
    info!(@grey, "deploying from {} with balance {}", deployer.debug_lavender(), format_ether(balance));

    let mut contracts = BTreeMap::new();
    let mut block_number = 0;
    for (spec, artifact) in settings.contracts.iter().zip(&artifacts) {
        let values = placeholders(&manifest_config, deployer, &contracts);
        let args = spec
            .args
            .iter()
            .map(|arg| values.resolve(arg))
            .collect::<Result<Vec<_>, _>>()?;
        let code = artifact.deploy_code(&args)?;

        let created = creator.create(code).await?;
        let address = created
            .address
            .ok_or_else(|| DeploymentError::NoContractAddress(spec.name.clone()))?;
        info!(@grey, "deployed {} at {}", spec.name.mint(), address.debug_lavender());

        gas.record(format!("deploy {}", spec.name), &created.cost);
        if let Some(number) = created.block_number {
            block_number = number;
        }
        contracts.insert(spec.name.clone(), address);
    }

    Ok(DeploymentManifest {
        network: config.network.clone(),
        chain_id,
        contracts,
        config: manifest_config,
        deployer,
        block_number,
        timestamp: Utc::now(),
    })
}
