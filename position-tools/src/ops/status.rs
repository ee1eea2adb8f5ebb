// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Network and account readiness report.

use alloy::{primitives::Address, providers::Provider};

use crate::{
    core::{
        config::PositionConfig,
        inspect::{self, Explorer, ReadinessReport},
    },
    error::Result,
};

/// Prints a readiness report for `account` on `network`.
///
/// Contract source verification is only checked when the network has an explorer API and a key
/// is given.
pub async fn status(
    config: &PositionConfig,
    network: &str,
    account: Address,
    explorer_api_key: Option<&str>,
    provider: &impl Provider,
) -> Result<ReadinessReport> {
    let network_config = config.network(network)?;
    let contracts = super::known_contracts(config, network)?;
    let explorer = match (network_config.explorer_api_url.as_deref(), explorer_api_key) {
        (Some(api_url), Some(api_key)) => Some(Explorer { api_url, api_key }),
        _ => None,
    };

    let report = inspect::inspect(
        network,
        network_config,
        account,
        &contracts,
        explorer,
        provider,
    )
    .await?;
    report.print();
    for contract in &report.contracts {
        if let Some(url) = network_config.explorer_address_url(contract.address) {
            debug!(@grey, "{}: {url}", contract.name);
        }
    }
    Ok(report)
}
