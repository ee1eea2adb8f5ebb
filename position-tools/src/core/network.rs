// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::collections::BTreeMap;

use alloy::{
    primitives::{utils::parse_ether, Address, U256},
    providers::Provider,
};
use serde::Deserialize;

use crate::utils::{color::Color, format_ether};

/// Balance below which an account is not considered ready to send transactions.
pub const DEFAULT_MIN_BALANCE: &str = "0.01";

/// Chain ID of local development nodes (hardhat, anvil).
pub const LOCAL_CHAIN_ID: u64 = 31337;

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),

    #[error(
        "connected to chain {} but the network is configured for chain {}",
        .actual.red(),
        .expected.red(),
    )]
    ChainIdMismatch { expected: u64, actual: u64 },
    #[error("invalid min_balance {0:?}: expected an amount of ether")]
    InvalidMinBalance(String),
    #[error("no signer configured: set PRIVATE_KEY, --private-key-path or --keystore-path")]
    MissingSigner,
    #[error(
        "account {} holds {} but needs at least {}",
        .account.red(),
        ether(.balance).red(),
        ether(.min_balance),
    )]
    BelowMinBalance {
        account: Address,
        balance: U256,
        min_balance: U256,
    },
}

fn ether(wei: &U256) -> String {
    format_ether(*wei)
}

#[derive(Clone, Debug, Deserialize)]
pub struct NetworkConfig {
    pub rpc_url: String,
    #[serde(default)]
    pub chain_id: Option<u64>,
    /// Blocks to wait for after a transaction is included.
    #[serde(default = "default_confirmations")]
    pub confirmations: u64,
    #[serde(default)]
    min_balance: Option<String>,
    /// Block explorer base URL, used to print links to deployed contracts.
    #[serde(default)]
    pub explorer_url: Option<String>,
    /// Etherscan-compatible explorer API endpoint.
    #[serde(default)]
    pub explorer_api_url: Option<String>,
    /// Known contract addresses on this network, by contract name.
    #[serde(default)]
    pub contracts: BTreeMap<String, Address>,
}

fn default_confirmations() -> u64 {
    1
}

impl NetworkConfig {
    pub fn localhost() -> Self {
        Self {
            rpc_url: "http://127.0.0.1:8545".to_string(),
            chain_id: Some(LOCAL_CHAIN_ID),
            confirmations: default_confirmations(),
            min_balance: None,
            explorer_url: None,
            explorer_api_url: None,
            contracts: BTreeMap::new(),
        }
    }

    /// Minimum balance (in wei) an account needs to be reported as ready.
    pub fn min_balance(&self) -> Result<U256, NetworkError> {
        let text = self.min_balance.as_deref().unwrap_or(DEFAULT_MIN_BALANCE);
        parse_ether(text).map_err(|_| NetworkError::InvalidMinBalance(text.to_string()))
    }

    pub fn check_chain_id(&self, actual: u64) -> Result<(), NetworkError> {
        match self.chain_id {
            Some(expected) if expected != actual => {
                Err(NetworkError::ChainIdMismatch { expected, actual })
            }
            _ => Ok(()),
        }
    }

    /// Link to an address on the network's block explorer, if one is configured.
    pub fn explorer_address_url(&self, address: Address) -> Option<String> {
        self.explorer_url
            .as_ref()
            .map(|base| format!("{}/address/{address}", base.trim_end_matches('/')))
    }
}

/// Queries the chain ID of the connected node and checks it against the network config.
pub async fn check_chain(
    network: &NetworkConfig,
    provider: &impl Provider,
) -> Result<u64, NetworkError> {
    let chain_id = provider.get_chain_id().await?;
    network.check_chain_id(chain_id)?;
    debug!(@grey, "connected to chain {chain_id}");
    Ok(chain_id)
}
