// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt;
use std::process::ExitCode;

pub type PositionAdminResult = Result<(), PositionAdminError>;

#[derive(Debug)]
pub struct PositionAdminError {
    error: eyre::Error,
    exit_code: ExitCode,
}

impl PositionAdminError {
    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

impl fmt::Display for PositionAdminError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl From<std::io::Error> for PositionAdminError {
    fn from(err: std::io::Error) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<eyre::Error> for PositionAdminError {
    fn from(error: eyre::Error) -> Self {
        Self {
            error,
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<position_tools::Error> for PositionAdminError {
    fn from(err: position_tools::Error) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl From<alloy::transports::RpcError<alloy::transports::TransportErrorKind>>
    for PositionAdminError
{
    fn from(err: alloy::transports::RpcError<alloy::transports::TransportErrorKind>) -> Self {
        Self {
            error: err.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}
