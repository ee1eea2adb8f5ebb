// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::{
    primitives::Address,
    providers::{Provider, WalletProvider},
};
use eyre::eyre;
use position_tools::ops;

use crate::{
    common_args::{AccountArgs, AdminArgs, AuthArgs, ConfigArgs, GasArgs, NetworkArgs},
    error::PositionAdminResult,
};

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Report which configured roles are held, without sending transactions
    Audit(AuditArgs),
    /// Grant every configured role that is not yet held
    Grant(GrantArgs),
}

#[derive(Debug, clap::Args)]
pub struct AuditArgs {
    /// Exit with an error if any role is missing
    #[arg(long)]
    strict: bool,
    /// Fee recipient used to resolve `{fee_recipient}` when no manifest exists
    #[arg(long, env = "FEE_RECIPIENT")]
    fee_recipient: Option<Address>,

    #[command(flatten)]
    account: AccountArgs,
    #[command(flatten)]
    admin: AdminArgs,
    #[command(flatten)]
    config: ConfigArgs,
    #[command(flatten)]
    network: NetworkArgs,
}

#[derive(Debug, clap::Args)]
pub struct GrantArgs {
    /// Only report the grants that would be sent
    #[arg(long)]
    dry_run: bool,
    /// Fee recipient used to resolve `{fee_recipient}` when no manifest exists
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

pub async fn exec(command: Command) -> PositionAdminResult {
    match command {
        Command::Audit(args) => audit(args).await,
        Command::Grant(args) => grant(args).await,
    }
}

async fn audit(args: AuditArgs) -> PositionAdminResult {
    let config = args.config.load()?;
    let network = args.network.network_config(&config)?;
    let provider = args.network.build_provider(network).await?;
    let account = args.account.resolve(provider.get_chain_id().await?)?;

    let assignments = ops::role_plan(
        &config,
        &args.network.network,
        account,
        args.fee_recipient,
        args.admin.extra_admin,
    )?;
    let statuses = ops::audit_roles(&assignments, &provider).await?;
    let missing = statuses.iter().filter(|status| !status.held).count();
    if args.strict && missing > 0 {
        return Err(eyre!("{missing} role assignments missing").into());
    }
    Ok(())
}

async fn grant(args: GrantArgs) -> PositionAdminResult {
    let config = args.config.load()?;
    let network = args.network.network_config(&config)?;
    let provider = args
        .network
        .build_provider_with_wallet(network, &args.auth)
        .await?;

    let assignments = ops::role_plan(
        &config,
        &args.network.network,
        provider.default_signer_address(),
        args.fee_recipient,
        args.admin.extra_admin,
    )?;
    let mut gas = args.gas.report();
    let result = ops::grant_roles(
        &assignments,
        args.dry_run,
        network.confirmations,
        &mut gas,
        &provider,
    )
    .await;
    ops::print_gas_report(&gas, args.gas.coinmarketcap_api_key.as_deref()).await;
    result?;
    Ok(())
}
