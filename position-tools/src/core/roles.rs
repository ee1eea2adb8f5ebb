// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Access-control role auditing and granting.
//!
//! The desired role assignments come from the `[[roles]]` entries of `Position.toml`. They are
//! compared against what the contracts report on-chain, and any missing role is granted with a
//! single `grantRole` transaction.

use std::collections::BTreeMap;

use alloy::{
    primitives::{keccak256, Address, TxHash, B256},
    providers::Provider,
    sol,
};
use serde::Deserialize;

use crate::{
    core::{gas::TxCost, placeholders::Placeholders, tx_error::TxFailure},
    error::decode_contract_error,
    utils::color::{Color, DebugColor},
};

sol! {
    #[sol(rpc)]
    interface IAccessControl {
        function hasRole(bytes32 role, address account) external view returns (bool);
        function getRoleAdmin(bytes32 role) external view returns (bytes32);
        function grantRole(bytes32 role, address account) external;

        error AccessControlUnauthorizedAccount(address account, bytes32 neededRole);
        error AccessControlBadConfirmation();
    }
}

pub const DEFAULT_ADMIN_ROLE_NAME: &str = "DEFAULT_ADMIN_ROLE";
pub const DEFAULT_ADMIN_ROLE: B256 = B256::ZERO;

#[derive(Debug, thiserror::Error)]
pub enum RoleError {
    #[error("{summary}")]
    Contract {
        summary: String,
        #[source]
        source: alloy::contract::Error,
    },
    #[error("{0}")]
    PendingTransaction(#[from] alloy::providers::PendingTransactionError),
    #[error("{0}")]
    Placeholder(#[from] crate::core::placeholders::PlaceholderError),

    #[error("invalid role {0:?}: expected a role name or 32-byte hex hash")]
    InvalidRole(String),
    #[error("no address known for contract {0}; deploy it or add it to the network's contracts")]
    UnknownContract(String),
    #[error("role account {0:?} does not resolve to an address")]
    InvalidAccount(String),
    #[error(
        "account {} is missing admin role {} required to grant roles",
        .signer.red(),
        .admin_role.debug_red(),
    )]
    MissingAdminPrivilege { signer: Address, admin_role: B256 },
    #[error("signer is not authorized to grant this role: {0}")]
    Unauthorized(String),
    #[error("grant tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("{role} still not held by {account} after grant tx {tx_hash}")]
    GrantNotApplied {
        role: String,
        account: Address,
        tx_hash: TxHash,
    },
}

impl From<alloy::contract::Error> for RoleError {
    fn from(err: alloy::contract::Error) -> Self {
        let failure = TxFailure::from(&err);
        let decoded = decode_contract_error::<IAccessControl::IAccessControlErrors>(&err);
        if matches!(
            decoded,
            Some(IAccessControl::IAccessControlErrors::AccessControlUnauthorizedAccount(_))
        ) || failure.message.contains("AccessControl: account")
            || failure.message.contains("is missing role")
        {
            return Self::Unauthorized(failure.summary());
        }
        Self::Contract {
            summary: failure.summary(),
            source: err,
        }
    }
}

/// A `[[roles]]` entry: `account` should hold `role` on `contract`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RoleEntry {
    pub contract: String,
    pub role: String,
    pub account: String,
}

/// A role assignment with every name resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleAssignment {
    pub contract: String,
    pub address: Address,
    pub role_name: String,
    pub role: B256,
    pub account: Address,
}

/// Resolves a role name to its hash.
///
/// `DEFAULT_ADMIN_ROLE` is the zero hash, 32-byte hex strings are taken as-is, and any other
/// name is hashed the way `keccak256("MINTER_ROLE")` constants are declared in Solidity.
pub fn role_hash(name: &str) -> Result<B256, RoleError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RoleError::InvalidRole(name.to_string()));
    }
    if name == DEFAULT_ADMIN_ROLE_NAME {
        return Ok(DEFAULT_ADMIN_ROLE);
    }
    if name.starts_with("0x") {
        return name
            .parse()
            .map_err(|_| RoleError::InvalidRole(name.to_string()));
    }
    Ok(keccak256(name.as_bytes()))
}

/// Builds the full list of desired role assignments.
///
/// `extra_admin`, when given, is made a default admin of every contract in the plan.
pub fn plan(
    entries: &[RoleEntry],
    contracts: &BTreeMap<String, Address>,
    placeholders: &Placeholders,
    extra_admin: Option<Address>,
) -> Result<Vec<RoleAssignment>, RoleError> {
    let mut assignments: Vec<RoleAssignment> = Vec::with_capacity(entries.len());
    for entry in entries {
        let address = *contracts
            .get(&entry.contract)
            .ok_or_else(|| RoleError::UnknownContract(entry.contract.clone()))?;
        let account = placeholders
            .resolve_address(&entry.account)?
            .ok_or_else(|| RoleError::InvalidAccount(entry.account.clone()))?;
        let assignment = RoleAssignment {
            contract: entry.contract.clone(),
            address,
            role_name: entry.role.trim().to_string(),
            role: role_hash(&entry.role)?,
            account,
        };
        if !assignments.contains(&assignment) {
            assignments.push(assignment);
        }
    }

    if let Some(admin) = extra_admin {
        let mut targets: Vec<(String, Address)> = Vec::new();
        for a in &assignments {
            if !targets.iter().any(|(_, address)| *address == a.address) {
                targets.push((a.contract.clone(), a.address));
            }
        }
        for (contract, address) in targets {
            let assignment = RoleAssignment {
                contract,
                address,
                role_name: DEFAULT_ADMIN_ROLE_NAME.to_string(),
                role: DEFAULT_ADMIN_ROLE,
                account: admin,
            };
            if !assignments.contains(&assignment) {
                assignments.push(assignment);
            }
        }
    }

    Ok(assignments)
}

/// Read and grant access to the roles of one contract.
#[allow(async_fn_in_trait)]
pub trait RoleRegistry {
    async fn has_role(&self, role: B256, account: Address) -> Result<bool, RoleError>;

    async fn role_admin(&self, role: B256) -> Result<B256, RoleError>;

    /// Grants `role` to `account`, returning once the transaction is confirmed.
    async fn grant_role(&self, role: B256, account: Address) -> Result<TxCost, RoleError>;
}

/// Roles of an `AccessControl` contract deployed on-chain.
pub struct OnChainRoles<P> {
    contract: IAccessControl::IAccessControlInstance<P>,
    confirmations: u64,
}

impl<P: Provider> OnChainRoles<P> {
    pub fn new(address: Address, provider: P, confirmations: u64) -> Self {
        Self {
            contract: IAccessControl::new(address, provider),
            confirmations,
        }
    }
}

impl<P: Provider> RoleRegistry for OnChainRoles<P> {
    async fn has_role(&self, role: B256, account: Address) -> Result<bool, RoleError> {
        Ok(self.contract.hasRole(role, account).call().await?)
    }

    async fn role_admin(&self, role: B256) -> Result<B256, RoleError> {
        Ok(self.contract.getRoleAdmin(role).call().await?)
    }

    async fn grant_role(&self, role: B256, account: Address) -> Result<TxCost, RoleError> {
        let pending = self.contract.grantRole(role, account).send().await?;
        let tx_hash = *pending.tx_hash();
        debug!(@grey, "sent grant tx: {}", tx_hash.debug_lavender());

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await?;
        if !receipt.status() {
            return Err(RoleError::Reverted { tx_hash });
        }
        Ok(TxCost::from(&receipt))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleStatus {
    pub assignment: RoleAssignment,
    pub held: bool,
}

/// Reads whether every assignment is currently held. Sends no transactions.
pub async fn audit<R: RoleRegistry>(
    assignments: &[RoleAssignment],
    registry_for: impl Fn(Address) -> R,
) -> Result<Vec<RoleStatus>, RoleError> {
    let mut statuses = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        let registry = registry_for(assignment.address);
        let held = registry
            .has_role(assignment.role, assignment.account)
            .await?;
        statuses.push(RoleStatus {
            assignment: assignment.clone(),
            held,
        });
    }
    Ok(statuses)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrantOutcome {
    /// The account already held the role; nothing was sent.
    AlreadyHeld,
    /// The role was missing and would have been granted.
    WouldGrant,
    /// The role was granted and confirmed.
    Granted(TxCost),
}

/// Ensures `assignment.account` holds `assignment.role`, granting it if missing.
///
/// The signer must hold the role's admin role. After a grant the role is read back to confirm it
/// took effect.
pub async fn ensure_role(
    registry: &impl RoleRegistry,
    assignment: &RoleAssignment,
    signer: Address,
    dry_run: bool,
) -> Result<GrantOutcome, RoleError> {
    let RoleAssignment { role, account, .. } = *assignment;
    if registry.has_role(role, account).await? {
        return Ok(GrantOutcome::AlreadyHeld);
    }

    let admin_role = registry.role_admin(role).await?;
    if !registry.has_role(admin_role, signer).await? {
        return Err(RoleError::MissingAdminPrivilege { signer, admin_role });
    }
    if dry_run {
        return Ok(GrantOutcome::WouldGrant);
    }

    let cost = registry.grant_role(role, account).await?;
    if !registry.has_role(role, account).await? {
        return Err(RoleError::GrantNotApplied {
            role: assignment.role_name.clone(),
            account,
            tx_hash: cost.tx_hash,
        });
    }
    Ok(GrantOutcome::Granted(cost))
}

/// Grants every missing assignment in order, stopping at the first failure.
pub async fn grant_missing<R: RoleRegistry>(
    assignments: &[RoleAssignment],
    signer: Address,
    dry_run: bool,
    registry_for: impl Fn(Address) -> R,
) -> Result<Vec<(RoleAssignment, GrantOutcome)>, RoleError> {
    let mut outcomes = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        let registry = registry_for(assignment.address);
        let outcome = ensure_role(&registry, assignment, signer, dry_run).await?;
        match &outcome {
            GrantOutcome::AlreadyHeld => debug!(
                @grey,
                "{} already holds {} on {}",
                assignment.account,
                assignment.role_name,
                assignment.contract
            ),
            GrantOutcome::WouldGrant => info!(
                @grey,
                "would grant {} on {} to {}",
                assignment.role_name,
                assignment.contract,
                assignment.account
            ),
            GrantOutcome::Granted(cost) => info!(
                @grey,
                "granted {} on {} to {} in tx {}",
                assignment.role_name,
                assignment.contract,
                assignment.account,
                cost.tx_hash.debug_lavender()
            ),
        }
        outcomes.push((assignment.clone(), outcome));
    }
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        collections::{HashMap, HashSet},
        rc::Rc,
    };

    use super::*;
    use alloy::{
        primitives::{address, b256, Bytes},
        providers::ProviderBuilder,
        sol_types::SolValue,
        transports::mock::Asserter,
    };
    use pretty_assertions::assert_eq;

    const NFT: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
    const MARKET: Address = address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512");
    const SIGNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const OTHER: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");

    /// In-memory stand-in for a set of AccessControl contracts.
    #[derive(Clone, Default)]
    struct MemoryRoles {
        held: Rc<RefCell<HashSet<(Address, B256, Address)>>>,
        admins: Rc<RefCell<HashMap<B256, B256>>>,
        grants: Rc<Cell<usize>>,
        ignore_grants: bool,
    }

    impl MemoryRoles {
        fn with_role(self, contract: Address, role: B256, account: Address) -> Self {
            self.held.borrow_mut().insert((contract, role, account));
            self
        }

        fn at(&self, contract: Address) -> ContractRoles {
            ContractRoles {
                contract,
                state: self.clone(),
            }
        }
    }

    struct ContractRoles {
        contract: Address,
        state: MemoryRoles,
    }

    impl RoleRegistry for ContractRoles {
        async fn has_role(&self, role: B256, account: Address) -> Result<bool, RoleError> {
            Ok(self
                .state
                .held
                .borrow()
                .contains(&(self.contract, role, account)))
        }

        async fn role_admin(&self, role: B256) -> Result<B256, RoleError> {
            Ok(self
                .state
                .admins
                .borrow()
                .get(&role)
                .copied()
                .unwrap_or(DEFAULT_ADMIN_ROLE))
        }

        async fn grant_role(&self, role: B256, account: Address) -> Result<TxCost, RoleError> {
            let grants = self.state.grants.get() + 1;
            self.state.grants.set(grants);
            if !self.state.ignore_grants {
                self.state
                    .held
                    .borrow_mut()
                    .insert((self.contract, role, account));
            }
            Ok(TxCost {
                tx_hash: TxHash::with_last_byte(grants as u8),
                gas_used: 51_000,
                gas_price: 1_000_000_000,
            })
        }
    }

    fn minter() -> B256 {
        keccak256("MINTER_ROLE")
    }

    fn assignment(contract: Address, role_name: &str, account: Address) -> RoleAssignment {
        RoleAssignment {
            contract: "PositionNFT".to_string(),
            address: contract,
            role_name: role_name.to_string(),
            role: role_hash(role_name).unwrap(),
            account,
        }
    }

    #[test]
    fn role_hashes() {
        assert_eq!(role_hash("DEFAULT_ADMIN_ROLE").unwrap(), B256::ZERO);
        assert_eq!(
            role_hash("MINTER_ROLE").unwrap(),
            b256!("9f2df0fed2c77648de5860a4cc508cd0818c85b8b8a1ab4ceeef8d981c8956a6")
        );
        let literal = "0x0000000000000000000000000000000000000000000000000000000000000001";
        assert_eq!(role_hash(literal).unwrap(), B256::with_last_byte(1));
        assert!(matches!(role_hash("0x1234"), Err(RoleError::InvalidRole(_))));
        assert!(matches!(role_hash("  "), Err(RoleError::InvalidRole(_))));
    }

    #[test]
    fn plan_resolves_entries_and_extra_admin() {
        let contracts = BTreeMap::from([
            ("PositionNFT".to_string(), NFT),
            ("PositionMarketplace".to_string(), MARKET),
        ]);
        let mut placeholders = Placeholders::new();
        placeholders.insert_contract("PositionMarketplace", MARKET);
        let entries = vec![
            RoleEntry {
                contract: "PositionNFT".to_string(),
                role: "MINTER_ROLE".to_string(),
                account: "{PositionMarketplace}".to_string(),
            },
            RoleEntry {
                contract: "PositionNFT".to_string(),
                role: "MINTER_ROLE".to_string(),
                account: MARKET.to_string(),
            },
        ];

        let planned = plan(&entries, &contracts, &placeholders, Some(OTHER)).unwrap();
        assert_eq!(planned.len(), 2);
        assert_eq!(planned[0].role, minter());
        assert_eq!(planned[0].account, MARKET);
        assert_eq!(planned[1].role, DEFAULT_ADMIN_ROLE);
        assert_eq!(planned[1].account, OTHER);
        assert_eq!(planned[1].address, NFT);

        let unknown = vec![RoleEntry {
            contract: "Vault".to_string(),
            role: "MINTER_ROLE".to_string(),
            account: MARKET.to_string(),
        }];
        assert!(matches!(
            plan(&unknown, &contracts, &placeholders, None),
            Err(RoleError::UnknownContract(name)) if name == "Vault"
        ));

        let bad_account = vec![RoleEntry {
            contract: "PositionNFT".to_string(),
            role: "MINTER_ROLE".to_string(),
            account: "treasury".to_string(),
        }];
        assert!(matches!(
            plan(&bad_account, &contracts, &placeholders, None),
            Err(RoleError::InvalidAccount(_))
        ));
    }

    #[tokio::test]
    async fn held_role_sends_nothing() {
        let roles = MemoryRoles::default()
            .with_role(NFT, DEFAULT_ADMIN_ROLE, SIGNER)
            .with_role(NFT, minter(), MARKET);
        let outcome = ensure_role(
            &roles.at(NFT),
            &assignment(NFT, "MINTER_ROLE", MARKET),
            SIGNER,
            false,
        )
        .await
        .unwrap();
        assert_eq!(outcome, GrantOutcome::AlreadyHeld);
        assert_eq!(roles.grants.get(), 0);
    }

    #[tokio::test]
    async fn missing_role_is_granted_once() {
        let roles = MemoryRoles::default().with_role(NFT, DEFAULT_ADMIN_ROLE, SIGNER);
        let registry = roles.at(NFT);
        assert!(!registry.has_role(minter(), MARKET).await.unwrap());

        let outcome = ensure_role(
            &registry,
            &assignment(NFT, "MINTER_ROLE", MARKET),
            SIGNER,
            false,
        )
        .await
        .unwrap();
        assert!(matches!(outcome, GrantOutcome::Granted(_)));
        assert_eq!(roles.grants.get(), 1);
        assert!(registry.has_role(minter(), MARKET).await.unwrap());

        // a second pass is a no-op
        let outcome = ensure_role(
            &registry,
            &assignment(NFT, "MINTER_ROLE", MARKET),
            SIGNER,
            false,
        )
        .await
        .unwrap();
        assert_eq!(outcome, GrantOutcome::AlreadyHeld);
        assert_eq!(roles.grants.get(), 1);
    }

    #[tokio::test]
    async fn signer_without_admin_role_is_rejected() {
        let roles = MemoryRoles::default().with_role(NFT, DEFAULT_ADMIN_ROLE, OTHER);
        let err = ensure_role(
            &roles.at(NFT),
            &assignment(NFT, "MINTER_ROLE", MARKET),
            SIGNER,
            false,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            RoleError::MissingAdminPrivilege { signer, admin_role }
                if signer == SIGNER && admin_role == DEFAULT_ADMIN_ROLE
        ));
        assert_eq!(roles.grants.get(), 0);
    }

    #[tokio::test]
    async fn custom_role_admin_is_checked() {
        let operator_admin = keccak256("OPERATOR_ADMIN_ROLE");
        let roles = MemoryRoles::default()
            .with_role(NFT, DEFAULT_ADMIN_ROLE, SIGNER)
            .with_role(NFT, operator_admin, OTHER);
        roles
            .admins
            .borrow_mut()
            .insert(keccak256("OPERATOR_ROLE"), operator_admin);

        let err = ensure_role(
            &roles.at(NFT),
            &assignment(NFT, "OPERATOR_ROLE", MARKET),
            SIGNER,
            false,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RoleError::MissingAdminPrivilege { .. }));

        let outcome = ensure_role(
            &roles.at(NFT),
            &assignment(NFT, "OPERATOR_ROLE", MARKET),
            OTHER,
            false,
        )
        .await
        .unwrap();
        assert!(matches!(outcome, GrantOutcome::Granted(_)));
    }

    #[tokio::test]
    async fn dry_run_sends_nothing() {
        let roles = MemoryRoles::default().with_role(NFT, DEFAULT_ADMIN_ROLE, SIGNER);
        let outcome = ensure_role(
            &roles.at(NFT),
            &assignment(NFT, "MINTER_ROLE", MARKET),
            SIGNER,
            true,
        )
        .await
        .unwrap();
        assert_eq!(outcome, GrantOutcome::WouldGrant);
        assert_eq!(roles.grants.get(), 0);
    }

    #[tokio::test]
    async fn grant_without_effect_is_an_error() {
        let roles = MemoryRoles {
            ignore_grants: true,
            ..Default::default()
        }
        .with_role(NFT, DEFAULT_ADMIN_ROLE, SIGNER);
        let err = ensure_role(
            &roles.at(NFT),
            &assignment(NFT, "MINTER_ROLE", MARKET),
            SIGNER,
            false,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RoleError::GrantNotApplied { .. }));
        assert_eq!(roles.grants.get(), 1);
    }

    #[tokio::test]
    async fn audit_then_grant_across_contracts() {
        let roles = MemoryRoles::default()
            .with_role(NFT, DEFAULT_ADMIN_ROLE, SIGNER)
            .with_role(MARKET, DEFAULT_ADMIN_ROLE, SIGNER)
            .with_role(NFT, minter(), MARKET);
        let assignments = vec![
            assignment(NFT, "MINTER_ROLE", MARKET),
            assignment(MARKET, "OPERATOR_ROLE", OTHER),
        ];

        let statuses = audit(&assignments, |address| roles.at(address)).await.unwrap();
        assert_eq!(
            statuses.iter().map(|s| s.held).collect::<Vec<_>>(),
            vec![true, false]
        );
        assert_eq!(roles.grants.get(), 0);

        let outcomes = grant_missing(&assignments, SIGNER, false, |address| roles.at(address))
            .await
            .unwrap();
        assert_eq!(outcomes[0].1, GrantOutcome::AlreadyHeld);
        assert!(matches!(outcomes[1].1, GrantOutcome::Granted(_)));
        assert_eq!(roles.grants.get(), 1);

        let statuses = audit(&assignments, |address| roles.at(address)).await.unwrap();
        assert!(statuses.iter().all(|s| s.held));
    }

    #[tokio::test]
    async fn on_chain_roles_read_through_rpc() {
        let asserter = Asserter::new();
        // hasRole(MINTER_ROLE, MARKET), then hasRole(OPERATOR_ROLE, OTHER)
        asserter.push_success(&Bytes::from(true.abi_encode()));
        asserter.push_success(&Bytes::from(false.abi_encode()));
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());

        let assignments = vec![
            assignment(NFT, "MINTER_ROLE", MARKET),
            assignment(MARKET, "OPERATOR_ROLE", OTHER),
        ];
        let statuses = audit(&assignments, |address| {
            OnChainRoles::new(address, provider.clone(), 1)
        })
        .await
        .unwrap();
        assert_eq!(
            statuses.iter().map(|s| s.held).collect::<Vec<_>>(),
            vec![true, false]
        );
    }

    #[tokio::test]
    async fn on_chain_grant_requires_admin_role() {
        let asserter = Asserter::new();
        // hasRole(MINTER_ROLE, MARKET), getRoleAdmin(MINTER_ROLE), hasRole(admin, SIGNER)
        asserter.push_success(&Bytes::from(false.abi_encode()));
        asserter.push_success(&Bytes::from(DEFAULT_ADMIN_ROLE.abi_encode()));
        asserter.push_success(&Bytes::from(false.abi_encode()));
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());

        let registry = OnChainRoles::new(NFT, provider, 1);
        let minter = assignment(NFT, "MINTER_ROLE", MARKET);
        match ensure_role(&registry, &minter, SIGNER, false).await {
            Err(RoleError::MissingAdminPrivilege { signer, admin_role }) => {
                assert_eq!(signer, SIGNER);
                assert_eq!(admin_role, DEFAULT_ADMIN_ROLE);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
