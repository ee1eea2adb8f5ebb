// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deployment manifests.
//!
//! One JSON file per network (`<network>-deployment.json`) records where each contract was
//! deployed along with the settings it was deployed with. A new deployment to the same network
//! replaces the file.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use alloy::primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::sys::create_dir_if_dne;

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no deployment manifest for network {network} at {}", .path.display())]
    Missing { network: String, path: PathBuf },
}

/// Deployment settings echoed into the manifest.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ManifestConfig {
    pub base_uri: String,
    pub fee_recipient: Address,
    /// Platform fee in basis points.
    pub platform_fee: u16,
    pub admin_wallet: Address,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentManifest {
    pub network: String,
    pub chain_id: u64,
    pub contracts: BTreeMap<String, Address>,
    pub config: ManifestConfig,
    pub deployer: Address,
    pub block_number: u64,
    pub timestamp: DateTime<Utc>,
}

impl DeploymentManifest {
    /// Path of the manifest for `network` within `dir`.
    pub fn path(dir: impl AsRef<Path>, network: &str) -> PathBuf {
        dir.as_ref().join(format!("{network}-deployment.json"))
    }

    /// Writes the manifest, replacing any previous manifest for the same network.
    pub fn write(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ManifestError> {
        let dir = dir.as_ref();
        create_dir_if_dne(dir)?;
        let path = Self::path(dir, &self.network);
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        fs::write(&path, json)?;
        debug!(@grey, "wrote deployment manifest to {}", path.display());
        Ok(path)
    }

    pub fn load(dir: impl AsRef<Path>, network: &str) -> Result<Self, ManifestError> {
        let path = Self::path(dir, network);
        if !path.exists() {
            return Err(ManifestError::Missing {
                network: network.to_string(),
                path,
            });
        }
        let contents = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Loads the manifest for `network` if one has been written.
    pub fn load_if_exists(
        dir: impl AsRef<Path>,
        network: &str,
    ) -> Result<Option<Self>, ManifestError> {
        match Self::load(dir, network) {
            Ok(manifest) => Ok(Some(manifest)),
            Err(ManifestError::Missing { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
