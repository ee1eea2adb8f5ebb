// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::providers::Provider;
use position_tools::ops;

use crate::{
    common_args::{AccountArgs, ConfigArgs, NetworkArgs},
    error::PositionAdminResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Explorer API key, used to check contract source verification
    #[arg(long, env = "ETHERSCAN_API_KEY", hide_env_values = true)]
    etherscan_api_key: Option<String>,

    #[command(flatten)]
    account: AccountArgs,
    #[command(flatten)]
    config: ConfigArgs,
    #[command(flatten)]
    network: NetworkArgs,
}

pub async fn exec(args: Args) -> PositionAdminResult {
    let config = args.config.load()?;
    let network = args.network.network_config(&config)?;
    let provider = args.network.build_provider(network).await?;
    let account = args.account.resolve(provider.get_chain_id().await?)?;
    let report = ops::status(
        &config,
        &args.network.network,
        account,
        args.etherscan_api_key.as_deref(),
        &provider,
    )
    .await?;
    report.ensure_ready().map_err(eyre::Report::from)?;
    Ok(())
}
