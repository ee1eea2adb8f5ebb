// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::PathBuf};

use alloy::{
    network::{Ethereum, EthereumWallet, NetworkWallet},
    primitives::{Address, FixedBytes},
    providers::{Provider, ProviderBuilder, WalletProvider},
    signers::{
        local::{LocalSigner, PrivateKeySigner},
        Signer,
    },
};
use clap::builder::FalseyValueParser;
use eyre::{eyre, Context};
use position_tools::core::{
    config::{PositionConfig, DEFAULT_NETWORK, FILENAME},
    gas::GasReport,
    network::{self, NetworkConfig, NetworkError},
};

use crate::utils::{convert_gwei_to_wei, decode0x};

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    /// File path to a text file containing a hex-encoded private key
    #[arg(long)]
    private_key_path: Option<PathBuf>,
    /// Private key as a hex string. Warning: this exposes your key to shell history
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,
    /// Path to an Ethereum wallet keystore file (e.g. clef)
    #[arg(long)]
    keystore_path: Option<String>,
    /// Keystore password file
    #[arg(long)]
    keystore_password_path: Option<PathBuf>,
    /// Optional max fee per gas in gwei units.
    #[arg(long)]
    max_fee_per_gas_gwei: Option<String>,
}

impl AuthArgs {
    pub fn has_signer(&self) -> bool {
        self.private_key.as_deref().is_some_and(|key| !key.is_empty())
            || self.private_key_path.is_some()
            || self.keystore_path.is_some()
    }

    fn build_wallet(&self, chain_id: u64) -> eyre::Result<EthereumWallet> {
        if let Some(key) = self.private_key.as_deref().filter(|key| !key.is_empty()) {
            let priv_key_bytes: FixedBytes<32> = FixedBytes::from_slice(decode0x(key)?.as_slice());
            let signer =
                PrivateKeySigner::from_bytes(&priv_key_bytes)?.with_chain_id(Some(chain_id));
            return Ok(EthereumWallet::new(signer));
        }

        if let Some(file) = &self.private_key_path {
            let key = fs::read_to_string(file).wrap_err("could not open private key file")?;
            let priv_key_bytes: FixedBytes<32> = FixedBytes::from_slice(decode0x(key)?.as_slice());
            let signer =
                PrivateKeySigner::from_bytes(&priv_key_bytes)?.with_chain_id(Some(chain_id));
            return Ok(EthereumWallet::new(signer));
        }

        let keystore = self
            .keystore_path
            .as_ref()
            .ok_or(NetworkError::MissingSigner)?;
        let password = self
            .keystore_password_path
            .as_ref()
            .map(fs::read_to_string)
            .unwrap_or(Ok("".into()))?;

        let signer =
            LocalSigner::decrypt_keystore(keystore, password)?.with_chain_id(Some(chain_id));
        Ok(EthereumWallet::new(signer))
    }

    pub fn get_max_fee_per_gas_wei(&self) -> eyre::Result<Option<u128>> {
        self.max_fee_per_gas_gwei
            .as_ref()
            .map(|fee_str| convert_gwei_to_wei(fee_str))
            .transpose()
    }
}

#[derive(Debug, clap::Args)]
pub struct ConfigArgs {
    /// Path to the toolkit configuration
    #[arg(long = "config", env = "POSITION_CONFIG", default_value = FILENAME)]
    path: PathBuf,
}

impl ConfigArgs {
    pub fn load(&self) -> eyre::Result<PositionConfig> {
        let config = PositionConfig::load(&self.path)?;
        log::debug!("loaded config from {}", self.path.display());
        Ok(config)
    }
}

#[derive(Debug, clap::Args)]
pub struct NetworkArgs {
    /// Network to connect to, as named in the config
    #[arg(long, env = "POSITION_NETWORK", default_value = DEFAULT_NETWORK)]
    pub network: String,
    /// RPC endpoint, overriding the network's configured endpoint
    #[arg(long)]
    rpc_url: Option<String>,
}

impl NetworkArgs {
    pub fn network_config<'a>(&self, config: &'a PositionConfig) -> eyre::Result<&'a NetworkConfig> {
        Ok(config.network(&self.network)?)
    }

    fn endpoint<'a>(&'a self, network: &'a NetworkConfig) -> &'a str {
        self.rpc_url.as_deref().unwrap_or(&network.rpc_url)
    }

    pub async fn build_provider(&self, network: &NetworkConfig) -> eyre::Result<impl Provider> {
        let provider = ProviderBuilder::new()
            .connect(self.endpoint(network))
            .await?;
        network::check_chain(network, &provider).await?;
        Ok(provider)
    }

    pub async fn build_provider_with_wallet(
        &self,
        network: &NetworkConfig,
        auth: &AuthArgs,
    ) -> eyre::Result<impl Provider + WalletProvider> {
        if !auth.has_signer() {
            return Err(NetworkError::MissingSigner.into());
        }
        let provider = self.build_provider(network).await?;
        let chain_id = provider.get_chain_id().await?;
        let wallet = auth.build_wallet(chain_id)?;
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect(self.endpoint(network))
            .await?;
        Ok(provider)
    }
}

#[derive(Debug, clap::Args)]
pub struct GasArgs {
    /// Print the gas used by each transaction
    #[arg(long, env = "REPORT_GAS", value_parser = FalseyValueParser::new())]
    report_gas: bool,
    /// CoinMarketCap API key, used to price the gas report in USD
    #[arg(long, env = "COINMARKETCAP_API_KEY", hide_env_values = true)]
    pub coinmarketcap_api_key: Option<String>,
}

impl GasArgs {
    pub fn report(&self) -> GasReport {
        GasReport::new(self.report_gas)
    }
}

#[derive(Debug, clap::Args)]
pub struct AdminArgs {
    /// Additional admin address, granted the default admin role on managed contracts
    #[arg(long, env = "ADMIN_ADDRESS")]
    pub extra_admin: Option<Address>,
}

#[derive(Debug, clap::Args)]
pub struct AccountArgs {
    /// Account to inspect instead of the signer
    #[arg(long)]
    pub address: Option<Address>,

    #[command(flatten)]
    pub auth: AuthArgs,
}

impl AccountArgs {
    /// The account to report on: `--address`, or else the configured signer.
    pub fn resolve(&self, chain_id: u64) -> eyre::Result<Address> {
        if let Some(address) = self.address {
            return Ok(address);
        }
        if !self.auth.has_signer() {
            return Err(eyre!(
                "{}, or pass --address",
                NetworkError::MissingSigner
            ));
        }
        let wallet = self.auth.build_wallet(chain_id)?;
        Ok(NetworkWallet::<Ethereum>::default_signer_address(&wallet))
    }
}
