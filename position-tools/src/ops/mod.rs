// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::collections::BTreeMap;

use alloy::primitives::Address;

use crate::{
    core::{config::PositionConfig, gas, gas::GasReport, manifest::DeploymentManifest},
    error::Result,
};

pub use deploy::deploy;
pub use frontend::{write_env, write_vite_config};
pub use roles::{audit_roles, grant_roles, role_plan};
pub use status::status;

mod deploy;
mod frontend;
mod roles;
mod status;

/// Contract addresses known for a network.
///
/// Addresses pinned under `[networks.<name>.contracts]` take precedence over the network's
/// deployment manifest.
pub fn known_contracts(
    config: &PositionConfig,
    network: &str,
) -> Result<BTreeMap<String, Address>> {
    let pinned = &config.network(network)?.contracts;
    let mut contracts = DeploymentManifest::load_if_exists(config.deployments_dir(), network)?
        .map(|manifest| manifest.contracts)
        .unwrap_or_default();
    contracts.extend(pinned.iter().map(|(name, address)| (name.clone(), *address)));
    Ok(contracts)
}

/// Prints the gas report, priced in USD when a market data key is available.
pub async fn print_gas_report(report: &GasReport, market_api_key: Option<&str>) {
    if !report.is_enabled() || report.entries().is_empty() {
        return;
    }
    let eth_usd = match market_api_key {
        Some(key) => match gas::fetch_eth_usd(key).await {
            Ok(price) => Some(price),
            Err(err) => {
                warn!(@yellow, "could not fetch ETH price: {err}");
                None
            }
        },
        None => None,
    };
    report.print(eth_usd);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config::FILENAME, manifest::ManifestConfig};
    use alloy::primitives::address;
    use chrono::Utc;

    const NFT: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
    const MARKET: Address = address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512");
    const PINNED: Address = address!("9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0");

    #[test]
    fn pinned_addresses_override_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILENAME);
        std::fs::write(
            &path,
            format!("[networks.localhost]\nrpc_url = \"http://127.0.0.1:8545\"\n[networks.localhost.contracts]\nPositionNFT = \"{PINNED}\"\n"),
        )
        .unwrap();
        let config = PositionConfig::load(&path).unwrap();

        let before = known_contracts(&config, "localhost").unwrap();
        assert_eq!(before.len(), 1);
        assert_eq!(before["PositionNFT"], PINNED);

        DeploymentManifest {
            network: "localhost".to_string(),
            chain_id: 31337,
            contracts: [
                ("PositionNFT".to_string(), NFT),
                ("PositionMarketplace".to_string(), MARKET),
            ]
            .into_iter()
            .collect(),
            config: ManifestConfig {
                base_uri: String::new(),
                fee_recipient: NFT,
                platform_fee: 0,
                admin_wallet: NFT,
            },
            deployer: NFT,
            block_number: 1,
            timestamp: Utc::now(),
        }
        .write(config.deployments_dir())
        .unwrap();

        let after = known_contracts(&config, "localhost").unwrap();
        assert_eq!(after["PositionNFT"], PINNED);
        assert_eq!(after["PositionMarketplace"], MARKET);
        assert!(known_contracts(&config, "sepolia").is_err());
    }
}
