// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::{
    primitives::{Address, Bytes, U256},
    providers::{Provider, WalletProvider},
    rpc::types::TransactionReceipt,
};

use super::{DeploymentConfig, DeploymentError, DeploymentRequest};
use crate::core::gas::TxCost;

/// A confirmed contract creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Created {
    pub address: Option<Address>,
    pub block_number: Option<u64>,
    pub cost: TxCost,
}

impl From<&TransactionReceipt> for Created {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            address: receipt.contract_address,
            block_number: receipt.block_number,
            cost: TxCost::from(receipt),
        }
    }
}

/// Sends contract creation transactions from a single account.
#[allow(async_fn_in_trait)]
pub trait ContractCreator {
    fn deployer(&self) -> Address;

    async fn chain_id(&self) -> Result<u64, DeploymentError>;

    async fn balance(&self) -> Result<U256, DeploymentError>;

    /// Sends `code` as a contract creation transaction, returning once it is confirmed.
    async fn create(&self, code: Bytes) -> Result<Created, DeploymentError>;
}

/// Creates contracts through the signer of a wallet provider.
pub struct OnChainCreator<'a, P> {
    provider: &'a P,
    deployer: Address,
    confirmations: u64,
    max_fee_per_gas_wei: Option<u128>,
}

impl<'a, P: Provider + WalletProvider> OnChainCreator<'a, P> {
    pub fn new(provider: &'a P, config: &DeploymentConfig) -> Self {
        Self {
            provider,
            deployer: provider.default_signer_address(),
            confirmations: config.confirmations,
            max_fee_per_gas_wei: config.max_fee_per_gas_wei,
        }
    }
}

impl<P: Provider + WalletProvider> ContractCreator for OnChainCreator<'_, P> {
    fn deployer(&self) -> Address {
        self.deployer
    }

    async fn chain_id(&self) -> Result<u64, DeploymentError> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn balance(&self) -> Result<U256, DeploymentError> {
        self.provider
            .get_balance(self.deployer)
            .await
            .map_err(|_| DeploymentError::FailedToGetBalance)
    }

    async fn create(&self, code: Bytes) -> Result<Created, DeploymentError> {
        let request = DeploymentRequest::new(self.deployer, code, self.max_fee_per_gas_wei);
        let gas_limit = request.estimate_gas(self.provider).await?;
        request
            .check_funds(self.deployer, gas_limit, self.provider)
            .await?;
        let receipt = request
            .exec(gas_limit, self.provider, self.confirmations)
            .await?;
        Ok(Created::from(&receipt))
    }
}
