// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::error::PositionAdminResult;

mod admin;
mod deploy;
mod frontend;
mod roles;
mod status;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Check whether an address is a configured admin
    #[command(subcommand)]
    Admin(admin::Command),
    /// Deploy the configured contracts and write the deployment manifest
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
    /// Generate frontend build files
    #[command(subcommand)]
    Frontend(frontend::Command),
    /// Audit or grant access-control roles
    #[command(subcommand)]
    Roles(roles::Command),
    /// Print network and account readiness
    #[clap(visible_alias = "s")]
    Status(status::Args),
}

pub async fn exec(cmd: Command) -> PositionAdminResult {
    match cmd {
        Command::Admin(command) => admin::exec(command),
        Command::Deploy(args) => deploy::exec(args).await,
        Command::Frontend(command) => frontend::exec(command),
        Command::Roles(command) => roles::exec(command).await,
        Command::Status(args) => status::exec(args).await,
    }
}
