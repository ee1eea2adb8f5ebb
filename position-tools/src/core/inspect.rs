// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Account and network readiness.

use std::collections::BTreeMap;

use alloy::{
    primitives::{Address, U256},
    providers::Provider,
};

use crate::{
    core::{
        explorer,
        network::{NetworkConfig, NetworkError},
    },
    error::Result,
    utils::{
        color::{Color, DebugColor},
        format_balance, format_gwei,
    },
};

/// Snapshot of a network and the account that will send transactions on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadinessReport {
    pub network: String,
    pub chain_id: u64,
    pub block_number: u64,
    pub gas_price: u128,
    pub account: Address,
    pub balance: U256,
    pub min_balance: U256,
    pub contracts: Vec<ContractStatus>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractStatus {
    pub name: String,
    pub address: Address,
    pub has_code: bool,
    /// `None` when no explorer is configured or the explorer could not be reached.
    pub verified: Option<bool>,
}

impl ReadinessReport {
    /// Whether the account can afford to send transactions.
    pub fn is_ready(&self) -> bool {
        !self.balance.is_zero() && self.balance >= self.min_balance
    }

    /// Fails with [`NetworkError::BelowMinBalance`] unless [`is_ready`](Self::is_ready).
    pub fn ensure_ready(&self) -> Result<(), NetworkError> {
        if self.is_ready() {
            return Ok(());
        }
        Err(NetworkError::BelowMinBalance {
            account: self.account,
            balance: self.balance,
            min_balance: self.min_balance,
        })
    }

    pub fn print(&self) {
        greyln!("network: {}", self.network.mint());
        greyln!("chain id: {}", self.chain_id.debug_lavender());
        greyln!("block: {}", self.block_number.debug_lavender());
        greyln!("gas price: {}", format_gwei(self.gas_price).debug_lavender());
        greyln!("account: {}", self.account.debug_lavender());
        greyln!("balance: {}", format_balance(self.balance, self.min_balance));
        if self.is_ready() {
            mintln!("ready to send transactions");
        } else {
            greyln!("{}", "not ready: balance is below the minimum".yellow());
        }

        if self.contracts.is_empty() {
            return;
        }
        greyln!("contracts");
        for contract in &self.contracts {
            let code = match contract.has_code {
                true => "deployed".mint(),
                false => "no code".red(),
            };
            let verified = match contract.verified {
                Some(true) => ", verified".mint(),
                Some(false) => ", unverified".yellow(),
                None => String::new(),
            };
            greyln!(
                "  {:<24} {} {code}{verified}",
                contract.name,
                contract.address.debug_lavender()
            );
        }
    }
}

/// Where to check contract source verification.
#[derive(Clone, Copy, Debug)]
pub struct Explorer<'a> {
    pub api_url: &'a str,
    pub api_key: &'a str,
}

/// Reads chain metadata and the balance of `account`, then checks each known contract.
pub async fn inspect(
    network_name: &str,
    network: &NetworkConfig,
    account: Address,
    contracts: &BTreeMap<String, Address>,
    explorer: Option<Explorer<'_>>,
    provider: &impl Provider,
) -> Result<ReadinessReport> {
    let chain_id = provider.get_chain_id().await?;
    network.check_chain_id(chain_id)?;
    let block_number = provider.get_block_number().await?;
    let gas_price = provider.get_gas_price().await?;
    let balance = provider.get_balance(account).await?;

    let mut statuses = Vec::with_capacity(contracts.len());
    for (name, &address) in contracts {
        let code = provider.get_code_at(address).await?;
        let verified = match explorer {
            Some(explorer) => {
                match explorer::is_verified(explorer.api_url, explorer.api_key, address).await {
                    Ok(verified) => Some(verified),
                    Err(err) => {
                        warn!(@yellow, "could not check verification of {name}: {err}");
                        None
                    }
                }
            }
            None => None,
        };
        statuses.push(ContractStatus {
            name: name.clone(),
            address,
            has_code: !code.is_empty(),
            verified,
        });
    }

    Ok(ReadinessReport {
        network: network_name.to_string(),
        chain_id,
        block_number,
        gas_price,
        account,
        balance,
        min_balance: network.min_balance()?,
        contracts: statuses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, utils::parse_ether};

    fn report(balance: &str) -> ReadinessReport {
        ReadinessReport {
            network: "localhost".to_string(),
            chain_id: 31337,
            block_number: 1,
            gas_price: 1_000_000_000,
            account: address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            balance: parse_ether(balance).unwrap(),
            min_balance: NetworkConfig::localhost().min_balance().unwrap(),
            contracts: Vec::new(),
        }
    }

    #[test]
    fn readiness_threshold() {
        assert!(report("1").is_ready());
        assert!(report("0.01").is_ready());
        assert!(!report("0.009").is_ready());
        assert!(!report("0").is_ready());
    }

    #[test]
    fn underfunded_account_is_an_error() {
        assert!(report("0.5").ensure_ready().is_ok());
        match report("0.001").ensure_ready() {
            Err(NetworkError::BelowMinBalance {
                balance,
                min_balance,
                ..
            }) => {
                assert_eq!(balance, parse_ether("0.001").unwrap());
                assert_eq!(min_balance, parse_ether("0.01").unwrap());
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(report("0").ensure_ready().is_err());
    }

    #[test]
    fn zero_minimum_still_needs_funds() {
        let mut empty = report("0");
        empty.min_balance = U256::ZERO;
        assert!(!empty.is_ready());
        empty.balance = U256::from(1);
        assert!(empty.is_ready());
    }
}
