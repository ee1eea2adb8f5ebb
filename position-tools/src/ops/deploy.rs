// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract deployment.

use alloy::{
    primitives::Address,
    providers::{Provider, WalletProvider},
};

use crate::{
    core::{
        config::PositionConfig,
        deployment::{self, DeploymentConfig, OnChainCreator},
        gas::GasReport,
        manifest::DeploymentManifest,
        roles,
    },
    error::Result,
    utils::color::{Color, DebugColor},
};

/// Deploys the configured contracts and writes the network's manifest.
///
/// With `setup_roles`, the `[[roles]]` entries are granted against the new addresses once every
/// contract is deployed.
pub async fn deploy(
    config: &PositionConfig,
    deployment: &DeploymentConfig,
    setup_roles: bool,
    extra_admin: Option<Address>,
    gas: &mut GasReport,
    provider: &(impl Provider + WalletProvider),
) -> Result<DeploymentManifest> {
    let network = config.network(&deployment.network)?;
    let creator = OnChainCreator::new(provider, deployment);
    let manifest = deployment::deploy(&config.deployment, deployment, gas, &creator).await?;
    let path = manifest.write(config.deployments_dir())?;

    mintln!("deployed {} contracts to {}", manifest.contracts.len(), manifest.network);
    for (name, address) in &manifest.contracts {
        match network.explorer_address_url(*address) {
            Some(url) => greyln!("  {name:<24} {} {url}", address.debug_lavender()),
            None => greyln!("  {name:<24} {}", address.debug_lavender()),
        }
    }
    greyln!("manifest written to {}", path.display().to_string().mint());

    if setup_roles {
        // Pinned network addresses do not apply to a fresh deployment
        let placeholders =
            deployment::placeholders(&manifest.config, manifest.deployer, &manifest.contracts);
        let assignments =
            roles::plan(&config.roles, &manifest.contracts, &placeholders, extra_admin)?;
        super::grant_roles(&assignments, false, deployment.confirmations, gas, provider).await?;
    }

    Ok(manifest)
}
