// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Role auditing and granting across the configured contracts.

use alloy::{
    primitives::Address,
    providers::{Provider, WalletProvider},
};

use crate::{
    core::{
        config::PositionConfig,
        deployment,
        gas::GasReport,
        manifest::DeploymentManifest,
        roles::{self, GrantOutcome, OnChainRoles, RoleAssignment, RoleStatus},
    },
    error::Result,
    utils::color::{Color, DebugColor},
};

/// Resolves the `[[roles]]` entries against the contracts known on `network`.
///
/// Placeholders resolve against the network's manifest when one exists. Otherwise the
/// deployment settings are resolved as if `deployer` were deploying.
pub fn role_plan(
    config: &PositionConfig,
    network: &str,
    deployer: Address,
    fee_recipient_override: Option<Address>,
    extra_admin: Option<Address>,
) -> Result<Vec<RoleAssignment>> {
    let contracts = super::known_contracts(config, network)?;
    let placeholders =
        match DeploymentManifest::load_if_exists(config.deployments_dir(), network)? {
            Some(manifest) => deployment::placeholders(&manifest.config, manifest.deployer, &contracts),
            None => {
                let settings = config
                    .deployment
                    .resolve(deployer, fee_recipient_override)?;
                deployment::placeholders(&settings, deployer, &contracts)
            }
        };
    Ok(roles::plan(&config.roles, &contracts, &placeholders, extra_admin)?)
}

/// Reads and prints whether each assignment is held.
pub async fn audit_roles(
    assignments: &[RoleAssignment],
    provider: &impl Provider,
) -> Result<Vec<RoleStatus>> {
    let statuses = roles::audit(assignments, |address| {
        OnChainRoles::new(address, provider, 1)
    })
    .await?;

    for status in &statuses {
        let a = &status.assignment;
        let held = match status.held {
            true => "held".mint(),
            false => "missing".red(),
        };
        greyln!(
            "{:<24} {:<24} {} {held}",
            a.contract,
            a.role_name,
            a.account.debug_lavender()
        );
    }
    let missing = statuses.iter().filter(|s| !s.held).count();
    if missing == 0 {
        mintln!("all {} role assignments held", statuses.len());
    } else {
        greyln!("{} of {} role assignments missing", missing.yellow(), statuses.len());
    }
    Ok(statuses)
}

/// Grants every missing assignment from the provider's signer.
pub async fn grant_roles(
    assignments: &[RoleAssignment],
    dry_run: bool,
    confirmations: u64,
    gas: &mut GasReport,
    provider: &(impl Provider + WalletProvider),
) -> Result<Vec<(RoleAssignment, GrantOutcome)>> {
    let signer = provider.default_signer_address();
    let outcomes = roles::grant_missing(assignments, signer, dry_run, |address| {
        OnChainRoles::new(address, provider, confirmations)
    })
    .await?;

    let mut granted = 0;
    for (assignment, outcome) in &outcomes {
        if let GrantOutcome::Granted(cost) = outcome {
            gas.record(
                format!("grant {} on {}", assignment.role_name, assignment.contract),
                cost,
            );
            granted += 1;
        }
    }
    match dry_run {
        true => {
            let pending = outcomes
                .iter()
                .filter(|(_, outcome)| *outcome == GrantOutcome::WouldGrant)
                .count();
            mintln!("dry run: {pending} grants would be sent");
        }
        false => mintln!("granted {granted} roles, {} already held", outcomes.len() - granted),
    }
    Ok(outcomes)
}
