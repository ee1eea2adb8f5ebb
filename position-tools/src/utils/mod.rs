// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.
//!
//! None of these have functionality specific to the position contracts, but they are used by
//! [`position-tools`](crate) to report on chain state and write deployment artifacts.

use alloy::primitives::{utils::format_units, U256};
use color::{Color, GREY, MINT, RED, YELLOW};

pub mod color;
pub mod sys;

/// Pretty-prints an amount of wei as ether.
pub fn format_ether(wei: U256) -> String {
    match format_units(wei, "ether") {
        Ok(eth) => format!("{eth} ETH"),
        Err(_) => "???".red(),
    }
}

/// Pretty-prints a balance, colored by how it compares to the minimum required.
pub fn format_balance(balance: U256, min: U256) -> String {
    let color = if balance.is_zero() {
        RED
    } else if balance < min {
        YELLOW
    } else {
        MINT
    };
    format!("{color}{}{GREY}", format_ether(balance))
}

/// Pretty-prints a gas price (in wei) as gwei.
pub fn format_gwei(wei: u128) -> String {
    match format_units(wei, "gwei") {
        Ok(gwei) => format!("{gwei} gwei"),
        Err(_) => "???".red(),
    }
}
