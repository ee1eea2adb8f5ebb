// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Frontend build files.

use std::{io::Write, path::Path};

use crate::{
    core::{config::PositionConfig, frontend::FrontendConfig, manifest::DeploymentManifest},
    error::Result,
    utils::sys,
};

/// Writes `vite.config.js` to `output`, or stdout.
pub fn write_vite_config(config: &FrontendConfig, output: Option<&Path>) -> Result<()> {
    let mut out = sys::file_or_stdout(output)?;
    out.write_all(config.render_vite_config().as_bytes())?;
    Ok(())
}

/// Writes the frontend dotenv file for the last deployment to `network`.
pub fn write_env(config: &PositionConfig, network: &str, output: Option<&Path>) -> Result<()> {
    let manifest = DeploymentManifest::load(config.deployments_dir(), network)?;
    let mut out = sys::file_or_stdout(output)?;
    out.write_all(config.frontend.render_env(&manifest).as_bytes())?;
    Ok(())
}
