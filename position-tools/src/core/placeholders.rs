// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! `{key}` substitution in config strings.
//!
//! Constructor arguments and role accounts in `Position.toml` may refer to deployment settings
//! (`{admin_wallet}`, `{fee_recipient}`, ...) and to contracts by name (`{PositionNFT}`).

use std::collections::BTreeMap;

use alloy::primitives::Address;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PlaceholderError {
    #[error("unknown placeholder {{{key}}} in {text:?}")]
    Unknown { key: String, text: String },
    #[error("unclosed placeholder in {0:?}")]
    Unclosed(String),
}

#[derive(Clone, Debug, Default)]
pub struct Placeholders {
    values: BTreeMap<String, String>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.values.insert(key.into(), value.to_string());
    }

    pub fn insert_contract(&mut self, name: impl Into<String>, address: Address) {
        self.insert(name, address);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Replaces every `{key}` in `text`.
    pub fn resolve(&self, text: &str) -> Result<String, PlaceholderError> {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after
                .find('}')
                .ok_or_else(|| PlaceholderError::Unclosed(text.to_string()))?;
            let key = after[..end].trim();
            let value = self
                .values
                .get(key)
                .ok_or_else(|| PlaceholderError::Unknown {
                    key: key.to_string(),
                    text: text.to_string(),
                })?;
            out.push_str(value);
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }

    /// Resolves `text` and parses the result as an address.
    pub fn resolve_address(&self, text: &str) -> Result<Option<Address>, PlaceholderError> {
        Ok(self.resolve(text)?.trim().parse().ok())
    }
}
