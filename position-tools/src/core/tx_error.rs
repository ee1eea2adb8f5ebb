// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Short, user-facing summaries of transaction errors.

use std::sync::LazyLock;

use alloy::transports::{RpcError, TransportErrorKind};
use regex::Regex;
use serde_json::Value;

pub const CANCELLED: &str = "Transaction cancelled";
pub const INSUFFICIENT_FUNDS: &str = "Insufficient funds";
pub const FAILED: &str = "Transaction failed";

static REVERT_REASON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"reverted with reason string '([^']*)'").expect("revert reason regex")
});

/// The parts of a transaction error that matter for summarizing it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TxFailure {
    pub message: String,
    pub reason: Option<String>,
}

impl TxFailure {
    pub fn new(message: impl Into<String>, reason: Option<String>) -> Self {
        Self {
            message: message.into(),
            reason,
        }
    }

    /// Reads `message` and `reason` fields from a JSON error object, as surfaced by wallets.
    pub fn from_json(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);
        Self {
            message: field("message").unwrap_or_default(),
            reason: field("reason"),
        }
    }

    pub fn summary(&self) -> String {
        format_tx_error(&self.message, self.reason.as_deref())
    }
}

impl From<&alloy::contract::Error> for TxFailure {
    fn from(err: &alloy::contract::Error) -> Self {
        let reason = err
            .as_revert_data()
            .and_then(|data| alloy::sol_types::decode_revert_reason(&data));
        Self::new(err.to_string(), reason)
    }
}

impl From<&RpcError<TransportErrorKind>> for TxFailure {
    fn from(err: &RpcError<TransportErrorKind>) -> Self {
        let reason = err
            .as_error_resp()
            .and_then(|payload| payload.as_revert_data())
            .and_then(|data| alloy::sol_types::decode_revert_reason(&data));
        Self::new(err.to_string(), reason)
    }
}

/// Maps a transaction error to a short string for display.
///
/// Checked in order: user rejection, insufficient funds, a revert with a reason string, an
/// explicit reason, and finally a generic failure.
pub fn format_tx_error(message: &str, reason: Option<&str>) -> String {
    if message.contains("user rejected") {
        return CANCELLED.to_string();
    }
    if message.contains("insufficient funds") {
        return INSUFFICIENT_FUNDS.to_string();
    }
    if let Some(caps) = REVERT_REASON.captures(message) {
        return caps[1].to_string();
    }
    match reason {
        Some(reason) if !reason.is_empty() => reason.to_string(),
        _ => FAILED.to_string(),
    }
}
