// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract creation transactions.

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, U256},
    providers::Provider,
    rpc::types::{TransactionReceipt, TransactionRequest},
};

use super::DeploymentError;
use crate::{core::tx_error::TxFailure, utils::color::DebugColor};

/// Contract creation transaction request
#[derive(Debug)]
pub struct DeploymentRequest {
    tx: TransactionRequest,
    max_fee_per_gas_wei: Option<u128>,
}

impl DeploymentRequest {
    pub fn new(sender: Address, code: Bytes, max_fee_per_gas_wei: Option<u128>) -> Self {
        Self {
            tx: TransactionRequest::default()
                .with_from(sender)
                .with_deploy_code(code),
            max_fee_per_gas_wei,
        }
    }

    pub async fn estimate_gas(&self, provider: &impl Provider) -> Result<u64, DeploymentError> {
        provider
            .estimate_gas(self.tx.clone())
            .await
            .map_err(|err| DeploymentError::GasEstimation {
                summary: TxFailure::from(&err).summary(),
                source: err,
            })
    }

    /// Upper bound on what the transaction will cost with a limit of `gas`, in wei.
    pub async fn estimate_cost(
        &self,
        gas: u64,
        provider: &impl Provider,
    ) -> Result<U256, DeploymentError> {
        let fee = self.fee_per_gas(provider).await?;
        Ok(U256::from(gas) * U256::from(fee))
    }

    /// Fails early if `sender` cannot pay for the deployment.
    pub async fn check_funds(
        &self,
        sender: Address,
        gas: u64,
        provider: &impl Provider,
    ) -> Result<(), DeploymentError> {
        let cost = self.estimate_cost(gas, provider).await?;
        let balance = provider
            .get_balance(sender)
            .await
            .map_err(|_| DeploymentError::FailedToGetBalance)?;
        if balance < cost {
            return Err(DeploymentError::NotEnoughFunds {
                from_address: sender,
                balance,
                cost,
            });
        }
        Ok(())
    }

    /// Sends the transaction with a limit of `gas` and waits for `confirmations` blocks.
    pub async fn exec(
        self,
        gas: u64,
        provider: &impl Provider,
        confirmations: u64,
    ) -> Result<TransactionReceipt, DeploymentError> {
        let mut tx = self.tx;
        tx.gas = Some(gas);
        if let Some(max_fee_per_gas) = self.max_fee_per_gas_wei {
            let priority_fee = provider.get_max_priority_fee_per_gas().await?;
            tx.max_fee_per_gas = Some(max_fee_per_gas);
            tx.max_priority_fee_per_gas = Some(priority_fee.min(max_fee_per_gas));
        }

        let tx = provider
            .send_transaction(tx)
            .await
            .map_err(|err| DeploymentError::Send {
                summary: TxFailure::from(&err).summary(),
                source: err,
            })?;
        let tx_hash = *tx.tx_hash();
        debug!(@grey, "sent deploy tx: {}", tx_hash.debug_lavender());

        let receipt = tx
            .with_required_confirmations(confirmations)
            .get_receipt()
            .await
            .or(Err(DeploymentError::FailedToComplete))?;
        if !receipt.status() {
            return Err(DeploymentError::Reverted { tx_hash });
        }

        Ok(receipt)
    }

    async fn fee_per_gas(&self, provider: &impl Provider) -> Result<u128, DeploymentError> {
        match self.max_fee_per_gas_wei {
            Some(wei) => Ok(wei),
            None => Ok(provider.get_gas_price().await?),
        }
    }
}
