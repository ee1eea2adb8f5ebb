// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::Address;
use position_tools::{core::deployment::DeploymentConfig, ops};

use crate::{
    common_args::{AdminArgs, AuthArgs, ConfigArgs, GasArgs, NetworkArgs},
    error::PositionAdminResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Grant the configured roles once the contracts are deployed
    #[arg(long)]
    setup_roles: bool,
    /// Fee recipient, overriding the configured one
    #[arg(long, env = "FEE_RECIPIENT")]
    fee_recipient: Option<Address>,

    #[command(flatten)]
    admin: AdminArgs,
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    config: ConfigArgs,
    #[command(flatten)]
    gas: GasArgs,
    #[command(flatten)]
    network: NetworkArgs,
}

pub async fn exec(args: Args) -> PositionAdminResult {
    let config = args.config.load()?;
    let network = args.network.network_config(&config)?;
    let provider = args
        .network
        .build_provider_with_wallet(network, &args.auth)
        .await?;

    let deployment = DeploymentConfig::builder()
        .network(args.network.network.clone())
        .artifacts_dir(config.artifacts_dir())
        .confirmations(network.confirmations)
        .fee_recipient_override(args.fee_recipient)
        .max_fee_per_gas_wei(args.auth.get_max_fee_per_gas_wei()?)
        .build();

    let mut gas = args.gas.report();
    let result = ops::deploy(
        &config,
        &deployment,
        args.setup_roles,
        args.admin.extra_admin,
        &mut gas,
        &provider,
    )
    .await;
    ops::print_gas_report(&gas, args.gas.coinmarketcap_api_key.as_deref()).await;
    result?;
    Ok(())
}
