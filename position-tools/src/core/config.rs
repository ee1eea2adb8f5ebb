// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! `Position.toml` configuration.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use alloy::primitives::Address;
use serde::Deserialize;

use crate::core::{
    admin::AdminList, deployment::DeploymentSettings, frontend::FrontendConfig,
    network::NetworkConfig, roles::RoleEntry,
};

/// Default filename for the toolkit configuration.
pub const FILENAME: &str = "Position.toml";

/// Network used when none is selected.
pub const DEFAULT_NETWORK: &str = "localhost";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml read error: {0}")]
    TomlRead(#[from] toml::de::Error),

    #[error("missing config file {}", .0.display())]
    Missing(PathBuf),
    #[error("unknown network {name:?} (configured: {})", .known.join(", "))]
    UnknownNetwork { name: String, known: Vec<String> },
}

#[derive(Debug, Deserialize)]
pub struct PositionConfig {
    /// Directory the config file was loaded from. Relative paths resolve against it.
    #[serde(skip)]
    root: PathBuf,

    #[serde(default = "default_deployments_dir")]
    deployments_dir: PathBuf,
    #[serde(default = "default_artifacts_dir")]
    artifacts_dir: PathBuf,
    #[serde(default)]
    pub admins: Vec<Address>,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,
    #[serde(default)]
    pub deployment: DeploymentSettings,
    #[serde(default)]
    pub roles: Vec<RoleEntry>,
    #[serde(default)]
    pub frontend: FrontendConfig,
}

fn default_deployments_dir() -> PathBuf {
    "deployments".into()
}

fn default_artifacts_dir() -> PathBuf {
    "artifacts".into()
}

impl PositionConfig {
    /// Loads the config from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::Missing(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    /// Parses config contents, with relative paths resolving against the working directory.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(contents)?;
        config
            .networks
            .entry(DEFAULT_NETWORK.to_string())
            .or_insert_with(NetworkConfig::localhost);
        Ok(config)
    }

    pub fn network(&self, name: &str) -> Result<&NetworkConfig, ConfigError> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork {
                name: name.to_string(),
                known: self.networks.keys().cloned().collect(),
            })
    }

    pub fn deployments_dir(&self) -> PathBuf {
        self.root.join(&self.deployments_dir)
    }

    pub fn artifacts_dir(&self) -> PathBuf {
        self.root.join(&self.artifacts_dir)
    }

    /// Configured admins, plus an optional additional admin from the environment.
    pub fn admin_list(&self, extra: Option<Address>) -> AdminList {
        AdminList::new(self.admins.iter().copied().chain(extra))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const CONFIG: &str = r#"
        admins = ["0x70997970C51812dc3A010C7d01b50e0d17dc79C8"]
        deployments_dir = "out/deployments"

        [networks.sepolia]
        rpc_url = "https://rpc.sepolia.org"
        chain_id = 11155111
        confirmations = 5
        min_balance = "0.05"

        [networks.sepolia.contracts]
        PositionNFT = "0x5FbDB2315678afecb367f032d93F642f64180aa3"

        [deployment]
        base_uri = "https://meta.example.com/positions/"
        platform_fee_bps = 250

        [[deployment.contracts]]
        name = "PositionNFT"
        args = ["Positions", "POS", "{base_uri}", "{admin_wallet}"]

        [[deployment.contracts]]
        name = "PositionMarketplace"
        artifact = "Marketplace"
        args = ["{PositionNFT}", "{fee_recipient}", "{platform_fee_bps}"]

        [[roles]]
        contract = "PositionNFT"
        role = "MINTER_ROLE"
        account = "{PositionMarketplace}"

        [frontend]
        out_dir = "build"
    "#;

    #[test]
    fn parse_full_config() {
        let config = PositionConfig::parse(CONFIG).unwrap();
        assert_eq!(
            config.admins,
            vec![address!("70997970C51812dc3A010C7d01b50e0d17dc79C8")]
        );
        assert_eq!(config.deployments_dir(), PathBuf::from("out/deployments"));
        assert_eq!(config.artifacts_dir(), PathBuf::from("artifacts"));

        let sepolia = config.network("sepolia").unwrap();
        assert_eq!(sepolia.chain_id, Some(11155111));
        assert_eq!(sepolia.confirmations, 5);
        assert_eq!(
            sepolia.contracts["PositionNFT"],
            address!("5FbDB2315678afecb367f032d93F642f64180aa3")
        );

        assert_eq!(config.deployment.platform_fee_bps, 250);
        assert_eq!(config.deployment.contracts.len(), 2);
        assert_eq!(config.deployment.contracts[0].artifact_name(), "PositionNFT");
        assert_eq!(config.deployment.contracts[1].artifact_name(), "Marketplace");
        assert_eq!(config.roles.len(), 1);
        assert_eq!(config.frontend.out_dir, "build");
    }

    #[test]
    fn sample_config_parses() {
        let config = PositionConfig::parse(include_str!("../../../Position.toml")).unwrap();
        assert!(config.network("sepolia").unwrap().explorer_api_url.is_some());
        assert_eq!(config.deployment.contracts[1].name, "PositionMarketplace");
        assert_eq!(config.roles.len(), 2);
        assert_eq!(config.frontend.manual_chunks["vendor"], ["react", "react-dom"]);
    }

    #[test]
    fn localhost_is_always_available() {
        let config = PositionConfig::parse("").unwrap();
        let localhost = config.network(DEFAULT_NETWORK).unwrap();
        assert_eq!(localhost.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(localhost.chain_id, Some(31337));
        assert!(matches!(
            config.network("mainnet"),
            Err(ConfigError::UnknownNetwork { .. })
        ));
    }

    #[test]
    fn load_resolves_paths_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILENAME);
        fs::write(&path, "artifacts_dir = \"out\"\n").unwrap();
        let config = PositionConfig::load(&path).unwrap();
        assert_eq!(config.artifacts_dir(), dir.path().join("out"));
        assert_eq!(config.deployments_dir(), dir.path().join("deployments"));

        let missing = PositionConfig::load(dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Missing(_))));
    }
}
