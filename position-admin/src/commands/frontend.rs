// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::PathBuf;

use position_tools::ops;

use crate::{
    common_args::{ConfigArgs, NetworkArgs},
    error::PositionAdminResult,
};

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Render vite.config.js from the [frontend] settings
    Config(ConfigCommandArgs),
    /// Render a dotenv file with the contract addresses of a deployment
    Env(EnvArgs),
}

#[derive(Debug, clap::Args)]
pub struct ConfigCommandArgs {
    /// The output file (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Debug, clap::Args)]
pub struct EnvArgs {
    /// The output file (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,
    #[command(flatten)]
    network: NetworkArgs,
}

pub fn exec(command: Command) -> PositionAdminResult {
    match command {
        Command::Config(args) => {
            let config = args.config.load()?;
            ops::write_vite_config(&config.frontend, args.output.as_deref())?;
        }
        Command::Env(args) => {
            let config = args.config.load()?;
            ops::write_env(&config, &args.network.network, args.output.as_deref())?;
        }
    }
    Ok(())
}
