// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub mod admin;
pub mod artifact;
pub mod config;
pub mod deployment;
pub mod explorer;
pub mod frontend;
pub mod gas;
pub mod inspect;
pub mod manifest;
pub mod network;
pub mod placeholders;
pub mod roles;
pub mod tx_error;
