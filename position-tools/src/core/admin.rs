// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Platform admin addresses.

use alloy::primitives::Address;

/// The set of addresses treated as platform admins.
#[derive(Clone, Debug, Default)]
pub struct AdminList {
    admins: Vec<Address>,
}

impl AdminList {
    pub fn new(admins: impl IntoIterator<Item = Address>) -> Self {
        let mut admins: Vec<_> = admins.into_iter().collect();
        admins.dedup();
        Self { admins }
    }

    pub fn addresses(&self) -> &[Address] {
        &self.admins
    }

    /// Whether the given address text names an admin.
    ///
    /// Addresses are compared case-insensitively, so checksummed and lowercase forms match. Empty
    /// or absent input is never an admin.
    pub fn is_admin(&self, candidate: Option<&str>) -> bool {
        let Some(candidate) = candidate.map(str::trim).filter(|c| !c.is_empty()) else {
            return false;
        };
        self.admins
            .iter()
            .any(|admin| admin.to_string().eq_ignore_ascii_case(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    fn admins() -> AdminList {
        AdminList::new([
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
        ])
    }

    #[test]
    fn matches_any_case() {
        let admins = admins();
        assert!(admins.is_admin(Some("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")));
        assert!(admins.is_admin(Some("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266")));
        assert!(admins.is_admin(Some("0XF39FD6E51AAD88F6F4CE6AB8827279CFFFB92266")));
        assert!(admins.is_admin(Some(" 0x70997970c51812dc3a010c7d01b50e0d17dc79c8 ")));
    }

    #[test]
    fn rejects_other_addresses() {
        let admins = admins();
        assert!(!admins.is_admin(Some("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC")));
        assert!(!admins.is_admin(Some("not an address")));
    }

    #[test]
    fn rejects_empty_or_absent() {
        let admins = admins();
        assert!(!admins.is_admin(None));
        assert!(!admins.is_admin(Some("")));
        assert!(!admins.is_admin(Some("   ")));
        assert!(!AdminList::default().is_admin(Some("0x0000000000000000000000000000000000000000")));
    }
}
