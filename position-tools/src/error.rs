// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::sol_types::SolInterface;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),

    #[error("{0}")]
    Config(#[from] crate::core::config::ConfigError),
    #[error("{0}")]
    Network(#[from] crate::core::network::NetworkError),
    #[error("{0}")]
    Deployment(#[from] crate::core::deployment::DeploymentError),
    #[error("{0}")]
    Manifest(#[from] crate::core::manifest::ManifestError),
    #[error("{0}")]
    Role(#[from] crate::core::roles::RoleError),
}

/// Decodes a custom Solidity error from a failed contract call, if the node returned one.
pub fn decode_contract_error<E: SolInterface>(e: &alloy::contract::Error) -> Option<E> {
    let alloy::contract::Error::TransportError(tperr) = e else {
        return None;
    };
    tperr.as_error_resp()?.as_decoded_interface_error::<E>()
}
