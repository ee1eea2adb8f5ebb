// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use eyre::eyre;

use crate::{
    common_args::{AdminArgs, ConfigArgs},
    error::PositionAdminResult,
};

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Exit successfully if the address is a configured admin
    Check(CheckArgs),
}

#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Address to check
    address: String,

    #[command(flatten)]
    admin: AdminArgs,
    #[command(flatten)]
    config: ConfigArgs,
}

pub fn exec(command: Command) -> PositionAdminResult {
    match command {
        Command::Check(args) => check(args),
    }
}

fn check(args: CheckArgs) -> PositionAdminResult {
    let config = args.config.load()?;
    let admins = config.admin_list(args.admin.extra_admin);
    log::debug!("{} admins configured", admins.addresses().len());
    if admins.is_admin(Some(&args.address)) {
        println!("{} is an admin", args.address.trim());
        Ok(())
    } else {
        Err(eyre!("{:?} is not an admin", args.address.trim()).into())
    }
}
