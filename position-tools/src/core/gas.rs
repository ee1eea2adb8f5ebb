// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Gas usage reporting.

use alloy::{
    primitives::{utils::format_units, TxHash, U256},
    rpc::types::TransactionReceipt,
};
use serde::Deserialize;

use crate::utils::{
    color::{Color, DebugColor},
    format_ether,
};

const COINMARKETCAP_QUOTES_URL: &str =
    "https://pro-api.coinmarketcap.com/v1/cryptocurrency/quotes/latest";

#[derive(Debug, thiserror::Error)]
pub enum GasReportError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("no ETH/USD quote in market response")]
    MissingQuote,
}

pub fn format_gas(gas: u128) -> String {
    let text = format!("{gas} gas");
    if gas <= 3_000_000 {
        text.mint()
    } else if gas <= 7_000_000 {
        text.yellow()
    } else {
        text.pink()
    }
}

/// What a confirmed transaction cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TxCost {
    pub tx_hash: TxHash,
    pub gas_used: u64,
    pub gas_price: u128,
}

impl From<&TransactionReceipt> for TxCost {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            tx_hash: receipt.transaction_hash,
            gas_used: receipt.gas_used,
            gas_price: receipt.effective_gas_price,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GasEntry {
    pub label: String,
    pub gas_used: u64,
    pub gas_price: u128,
}

impl GasEntry {
    /// Total paid for the transaction, in wei.
    pub fn cost(&self) -> U256 {
        U256::from(self.gas_used) * U256::from(self.gas_price)
    }
}

/// Gas used by each transaction sent during a command.
#[derive(Debug, Default)]
pub struct GasReport {
    enabled: bool,
    entries: Vec<GasEntry>,
}

impl GasReport {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entries: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn entries(&self) -> &[GasEntry] {
        &self.entries
    }

    pub fn record(&mut self, label: impl Into<String>, cost: &TxCost) {
        let entry = GasEntry {
            label: label.into(),
            gas_used: cost.gas_used,
            gas_price: cost.gas_price,
        };
        debug!(@grey, "{}: {}", entry.label, format_gas(entry.gas_used.into()));
        self.entries.push(entry);
    }

    pub fn total_gas(&self) -> u64 {
        self.entries.iter().map(|e| e.gas_used).sum()
    }

    pub fn total_cost(&self) -> U256 {
        self.entries.iter().map(GasEntry::cost).sum()
    }

    /// Prints the report if gas reporting is enabled, with USD costs when a price is given.
    pub fn print(&self, eth_usd: Option<f64>) {
        if !self.enabled || self.entries.is_empty() {
            return;
        }
        greyln!("gas report");
        for entry in &self.entries {
            greyln!(
                "  {:<32} {} at {} gwei{}",
                entry.label,
                format_gas(entry.gas_used.into()),
                format_units(entry.gas_price, "gwei").unwrap_or_default(),
                usd_suffix(entry.cost(), eth_usd)
            );
        }
        greyln!(
            "  {:<32} {} costing {}{}",
            "total",
            format_gas(self.total_gas().into()),
            format_ether(self.total_cost()).debug_lavender(),
            usd_suffix(self.total_cost(), eth_usd)
        );
    }
}

fn usd_suffix(wei: U256, eth_usd: Option<f64>) -> String {
    match eth_usd {
        Some(price) => format!(" (${:.2})", wei_to_usd(wei, price)),
        None => String::new(),
    }
}

/// Converts wei to US dollars at the given ETH price.
pub fn wei_to_usd(wei: U256, eth_usd: f64) -> f64 {
    let eth: f64 = format_units(wei, "ether")
        .ok()
        .and_then(|eth| eth.parse().ok())
        .unwrap_or_default();
    eth * eth_usd
}

#[derive(Debug, Deserialize)]
struct QuotesResponse {
    data: std::collections::HashMap<String, Listing>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    quote: std::collections::HashMap<String, Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    price: f64,
}

/// Fetches the current ETH price in USD from CoinMarketCap.
pub async fn fetch_eth_usd(api_key: &str) -> Result<f64, GasReportError> {
    let response: QuotesResponse = reqwest::Client::new()
        .get(COINMARKETCAP_QUOTES_URL)
        .query(&[("symbol", "ETH"), ("convert", "USD")])
        .header("X-CMC_PRO_API_KEY", api_key)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    parse_eth_usd(response)
}

fn parse_eth_usd(response: QuotesResponse) -> Result<f64, GasReportError> {
    response
        .data
        .get("ETH")
        .and_then(|listing| listing.quote.get("USD"))
        .map(|quote| quote.price)
        .ok_or(GasReportError::MissingQuote)
}
