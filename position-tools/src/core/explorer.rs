// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Etherscan-compatible block explorer queries.

use alloy::primitives::Address;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    #[error("explorer request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("explorer returned an error: {0}")]
    Api(String),
}

/// Envelope shared by every Etherscan API response. `status` is `"1"` on success.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    status: String,
    message: String,
    result: serde_json::Value,
}

/// Whether the source of the contract at `address` is verified on the explorer.
pub async fn is_verified(
    api_url: &str,
    api_key: &str,
    address: Address,
) -> Result<bool, ExplorerError> {
    let address = address.to_string();
    let response: ApiResponse = reqwest::Client::new()
        .get(api_url)
        .query(&[
            ("module", "contract"),
            ("action", "getabi"),
            ("address", address.as_str()),
            ("apikey", api_key),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    parse_verification(response)
}

fn parse_verification(response: ApiResponse) -> Result<bool, ExplorerError> {
    if response.status == "1" {
        return Ok(true);
    }
    let detail = response.result.as_str().unwrap_or_default();
    if detail.contains("not verified") {
        return Ok(false);
    }
    // Rate limits and bad keys come back as status "0" too
    Err(ExplorerError::Api(format!("{}: {detail}", response.message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> ApiResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn verified_contract() {
        let verified = response(r#"{"status":"1","message":"OK","result":"[{\"type\":\"constructor\"}]"}"#);
        assert!(parse_verification(verified).unwrap());
    }

    #[test]
    fn unverified_contract() {
        let unverified = response(
            r#"{"status":"0","message":"NOTOK","result":"Contract source code not verified"}"#,
        );
        assert!(!parse_verification(unverified).unwrap());
    }

    #[test]
    fn api_failure() {
        let invalid_key =
            response(r#"{"status":"0","message":"NOTOK","result":"Invalid API Key"}"#);
        match parse_verification(invalid_key) {
            Err(ExplorerError::Api(message)) => assert_eq!(message, "NOTOK: Invalid API Key"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
