// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider utilities shared by the RPC and HTTP clients.

use alloy_network::Ethereum;
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use bon::Builder;
use std::time::Duration;

use crate::error::{BridgeError, Result};

/// Default gas buffer percentage (20%)
pub const DEFAULT_GAS_BUFFER_PERCENT: u64 = 20;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Estimate gas for a transaction and add a safety buffer.
///
/// CCTP burns and mints touch several contracts; a bare estimate
/// occasionally falls short when state shifts between estimate and inclusion.
pub async fn estimate_gas_with_buffer<P: Provider<Ethereum>>(
    provider: &P,
    tx: &TransactionRequest,
    buffer_percent: Option<u64>,
) -> Result<u64> {
    let buffer = buffer_percent.unwrap_or(DEFAULT_GAS_BUFFER_PERCENT);

    let estimate = provider
        .estimate_gas(tx.clone())
        .await
        .map_err(|e| BridgeError::Provider(format!("Gas estimation failed: {e}")))?;

    Ok(apply_gas_buffer(estimate, buffer))
}

/// `estimate * (100 + buffer) / 100`, saturating.
pub fn apply_gas_buffer(estimate: u64, buffer_percent: u64) -> u64 {
    let buffered = u128::from(estimate) * (100 + u128::from(buffer_percent)) / 100;
    u64::try_from(buffered).unwrap_or(u64::MAX)
}

/// Settings for the RPC and attestation clients.
///
/// ```rust
/// use std::time::Duration;
/// use usdc_cctp::ProviderConfig;
///
/// let config = ProviderConfig::builder()
///     .timeout(Duration::from_secs(10))
///     .build();
/// assert_eq!(config.gas_buffer_percent, 20);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ProviderConfig {
    /// Per-request timeout for the attestation HTTP client
    #[builder(default = Duration::from_secs(DEFAULT_TIMEOUT_SECS))]
    pub timeout: Duration,
    /// Extra gas on top of the node's estimate, in percent
    #[builder(default = DEFAULT_GAS_BUFFER_PERCENT)]
    pub gas_buffer_percent: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
