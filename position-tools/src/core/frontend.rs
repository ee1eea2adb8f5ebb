// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Build configuration for the web frontend.
//!
//! The `[frontend]` section renders to a `vite.config.js` module, and a network's deployment
//! manifest renders to a dotenv file the frontend reads its contract addresses from.

use std::{collections::BTreeMap, fmt::Write};

use convert_case::{Case, Casing};
use serde::Deserialize;

use crate::core::manifest::DeploymentManifest;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FrontendConfig {
    pub host: String,
    pub port: u16,
    /// Open a browser when the dev server starts.
    pub open: bool,
    pub out_dir: String,
    pub sourcemap: bool,
    /// Chunk name to the modules bundled into it.
    pub manual_chunks: BTreeMap<String, Vec<String>>,
    pub env_prefix: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        let manual_chunks = [
            ("vendor", &["react", "react-dom"][..]),
            ("web3", &["ethers"][..]),
        ]
        .into_iter()
        .map(|(chunk, modules)| {
            let modules = modules.iter().map(|m| m.to_string()).collect();
            (chunk.to_string(), modules)
        })
        .collect();

        Self {
            host: "localhost".to_string(),
            port: 3000,
            open: true,
            out_dir: "dist".to_string(),
            sourcemap: true,
            manual_chunks,
            env_prefix: "VITE_".to_string(),
        }
    }
}

/// `PositionNFT` and `fee-vault` become `POSITION_NFT` and `FEE_VAULT`.
fn env_key(name: &str) -> String {
    name.to_case(Case::ScreamingSnake)
}

fn js_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

impl FrontendConfig {
    /// Renders the settings as a `vite.config.js` module.
    pub fn render_vite_config(&self) -> String {
        let mut out = String::new();
        out.push_str("import { defineConfig } from 'vite'\n");
        out.push_str("import react from '@vitejs/plugin-react'\n\n");
        out.push_str("export default defineConfig({\n");
        out.push_str("  plugins: [react()],\n");
        out.push_str(&format!("  envPrefix: {},\n", js_string(&self.env_prefix)));
        out.push_str("  server: {\n");
        out.push_str(&format!("    host: {},\n", js_string(&self.host)));
        out.push_str(&format!("    port: {},\n", self.port));
        out.push_str(&format!("    open: {},\n", self.open));
        out.push_str("  },\n");
        out.push_str("  build: {\n");
        out.push_str(&format!("    outDir: {},\n", js_string(&self.out_dir)));
        out.push_str(&format!("    sourcemap: {},\n", self.sourcemap));
        if !self.manual_chunks.is_empty() {
            out.push_str("    rollupOptions: {\n");
            out.push_str("      output: {\n");
            out.push_str("        manualChunks: {\n");
            for (chunk, modules) in &self.manual_chunks {
                let modules: Vec<_> = modules.iter().map(|m| js_string(m)).collect();
                let _ = writeln!(
                    out,
                    "          {}: [{}],",
                    js_string(chunk),
                    modules.join(", ")
                );
            }
            out.push_str("        },\n");
            out.push_str("      },\n");
            out.push_str("    },\n");
        }
        out.push_str("  },\n");
        out.push_str("})\n");
        out
    }

    /// Renders the contract addresses of a deployment as a dotenv file.
    pub fn render_env(&self, manifest: &DeploymentManifest) -> String {
        let prefix = &self.env_prefix;
        let mut out = String::new();
        let _ = writeln!(out, "{prefix}NETWORK={}", manifest.network);
        let _ = writeln!(out, "{prefix}CHAIN_ID={}", manifest.chain_id);
        for (name, address) in &manifest.contracts {
            let key = env_key(name);
            let _ = writeln!(out, "{prefix}{key}_ADDRESS={address}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::ManifestConfig;
    use alloy::primitives::address;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    #[test]
    fn env_keys() {
        assert_eq!(env_key("PositionNFT"), "POSITION_NFT");
        assert_eq!(env_key("NFTMarketplace"), "NFT_MARKETPLACE");
        assert_eq!(env_key("fee-vault"), "FEE_VAULT");
        assert_eq!(env_key("position_marketplace"), "POSITION_MARKETPLACE");
        assert_eq!(env_key("token"), "TOKEN");
    }

    #[test]
    fn default_vite_config() {
        let expected = r#"import { defineConfig } from 'vite'
import react from '@vitejs/plugin-react'

export default defineConfig({
  plugins: [react()],
  envPrefix: "VITE_",
  server: {
    host: "localhost",
    port: 3000,
    open: true,
  },
  build: {
    outDir: "dist",
    sourcemap: true,
    rollupOptions: {
      output: {
        manualChunks: {
          "vendor": ["react", "react-dom"],
          "web3": ["ethers"],
        },
      },
    },
  },
})
"#;
        assert_eq!(FrontendConfig::default().render_vite_config(), expected);
    }

    #[test]
    fn partial_section_keeps_defaults() {
        let config: FrontendConfig = toml::from_str(
            r#"
            port = 5173
            open = false
            manual_chunks = {}
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 5173);
        assert_eq!(config.out_dir, "dist");

        let rendered = config.render_vite_config();
        assert!(rendered.contains("    port: 5173,\n"));
        assert!(rendered.contains("    open: false,\n"));
        assert!(!rendered.contains("manualChunks"));
    }

    #[test]
    fn dotenv_from_manifest() {
        let deployer = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let nft = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
        let market = address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512");
        let manifest = DeploymentManifest {
            network: "localhost".to_string(),
            chain_id: 31337,
            contracts: [
                ("PositionNFT".to_string(), nft),
                ("PositionMarketplace".to_string(), market),
            ]
            .into_iter()
            .collect(),
            config: ManifestConfig {
                base_uri: String::new(),
                fee_recipient: deployer,
                platform_fee: 0,
                admin_wallet: deployer,
            },
            deployer,
            block_number: 2,
            timestamp: Utc::now(),
        };

        let env = FrontendConfig::default().render_env(&manifest);
        let expected = format!(
            "VITE_NETWORK=localhost\n\
             VITE_CHAIN_ID=31337\n\
             VITE_POSITION_MARKETPLACE_ADDRESS={market}\n\
             VITE_POSITION_NFT_ADDRESS={nft}\n"
        );
        assert_eq!(env, expected);
    }
}
