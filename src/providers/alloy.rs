// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Alloy-based blockchain provider implementation.

use alloy_network::{Ethereum, EthereumWallet, TransactionBuilder};
use alloy_primitives::{Bytes, TxHash};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use tracing::{debug, instrument, trace};
use url::Url;

use crate::error::Result;
use crate::provider::{estimate_gas_with_buffer, ProviderConfig};
use crate::receipt::TransactionOutcome;
use crate::traits::BlockchainProvider;

/// Production blockchain provider wrapping Alloy's [`Provider`] trait.
///
/// Transactions are sent with a gas limit of the node's estimate plus
/// [`ProviderConfig::gas_buffer_percent`]. Signing is left to whatever wallet
/// filler the wrapped provider carries.
///
/// ```rust,no_run
/// use usdc_cctp::providers::http_provider;
///
/// let provider = http_provider("https://ethereum-sepolia-rpc.publicnode.com".parse().unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct AlloyProvider<P> {
    provider: P,
    config: ProviderConfig,
}

impl<P: Provider<Ethereum>> AlloyProvider<P> {
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, ProviderConfig::default())
    }

    pub fn with_config(provider: P, config: ProviderConfig) -> Self {
        Self { provider, config }
    }

    pub fn inner(&self) -> &P {
        &self.provider
    }
}

/// A read-only provider over HTTP.
pub fn http_provider(rpc_url: Url) -> AlloyProvider<impl Provider<Ethereum> + Clone> {
    AlloyProvider::new(ProviderBuilder::new().connect_http(rpc_url))
}

/// A provider over HTTP that signs with `signer`.
pub fn signing_provider(
    rpc_url: Url,
    signer: PrivateKeySigner,
    config: ProviderConfig,
) -> AlloyProvider<impl Provider<Ethereum> + Clone> {
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(rpc_url);
    AlloyProvider::with_config(provider, config)
}

#[async_trait]
impl<P> BlockchainProvider for AlloyProvider<P>
where
    P: Provider<Ethereum> + Send + Sync,
{
    #[instrument(skip_all)]
    async fn call(&self, tx: TransactionRequest) -> Result<Bytes> {
        trace!("Executing eth_call");
        Ok(self.provider.call(tx).await?)
    }

    #[instrument(skip_all)]
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash> {
        let gas_limit =
            estimate_gas_with_buffer(&self.provider, &tx, Some(self.config.gas_buffer_percent))
                .await?;
        debug!(gas_limit = gas_limit, event = "gas_estimated");

        let pending = self
            .provider
            .send_transaction(tx.with_gas_limit(gas_limit))
            .await?;
        let tx_hash = *pending.tx_hash();

        debug!(tx_hash = %tx_hash, event = "transaction_broadcast");
        Ok(tx_hash)
    }

    #[instrument(skip(self), fields(tx_hash = %tx_hash))]
    async fn get_transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<TransactionOutcome>> {
        trace!("Fetching transaction receipt");
        let receipt = self.provider.get_transaction_receipt(tx_hash).await?;

        if receipt.is_some() {
            debug!("Transaction receipt found");
        } else {
            debug!("Transaction receipt not found");
        }

        Ok(receipt.as_ref().map(TransactionOutcome::from))
    }

    #[instrument(skip(self))]
    async fn get_block_number(&self) -> Result<u64> {
        let block_number = self.provider.get_block_number().await?;
        trace!(block_number = block_number, "Current block number retrieved");
        Ok(block_number)
    }
}
