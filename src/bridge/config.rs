// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use crate::chain::ChainDescriptor;
use crate::error::{BridgeError, Result};

/// Interval between attestation lookups.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Lower bound of the per-chain attestation budget.
pub const MIN_ATTESTATION_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Upper bound of the per-chain attestation budget.
pub const MAX_ATTESTATION_TIMEOUT: Duration = Duration::from_secs(20 * 60);

/// Slack added on top of a chain's average attestation time.
pub const ATTESTATION_TIMEOUT_HEADROOM: Duration = Duration::from_secs(5 * 60);

/// Configuration for attestation polling behavior.
///
/// Polling happens at a fixed interval until the attestation completes or
/// `timeout` has elapsed since the first lookup.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use usdc_cctp::PollingConfig;
///
/// // 5 second interval, 20 minute budget
/// let config = PollingConfig::default();
///
/// let config = PollingConfig::default()
///     .with_poll_interval(Duration::from_secs(10))
///     .with_timeout(Duration::from_secs(600));
/// assert_eq!(config.max_polls(), 61);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    /// Time to wait between lookups while the attestation is pending.
    pub poll_interval: Duration,
    /// Overall budget measured from the first lookup.
    pub timeout: Duration,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: MAX_ATTESTATION_TIMEOUT,
        }
    }
}

impl PollingConfig {
    /// Budget sized to the source chain: its average attestation time plus
    /// five minutes, clamped to 5..=20 minutes.
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use alloy_chains::NamedChain;
    /// use usdc_cctp::{ChainDescriptor, PollingConfig};
    ///
    /// let sepolia = ChainDescriptor::for_chain(NamedChain::Sepolia, None).unwrap();
    /// assert_eq!(PollingConfig::for_chain(&sepolia).timeout, Duration::from_secs(360));
    /// ```
    pub fn for_chain(source: &ChainDescriptor) -> Self {
        let timeout = (source.average_attestation_time + ATTESTATION_TIMEOUT_HEADROOM)
            .clamp(MIN_ATTESTATION_TIMEOUT, MAX_ATTESTATION_TIMEOUT);
        Self {
            timeout,
            ..Self::default()
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Upper bound on lookups for a budget that is only spent pending.
    pub fn max_polls(&self) -> u64 {
        match self.poll_interval.as_millis() {
            0 => 1,
            interval => (self.timeout.as_millis() / interval) as u64 + 1,
        }
    }

    /// Rejects settings the poll loop cannot make progress with.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(BridgeError::InvalidConfig(
                "attestation poll interval must be greater than zero".to_string(),
            ));
        }
        if self.timeout < self.poll_interval {
            return Err(BridgeError::InvalidConfig(format!(
                "attestation timeout ({}s) is shorter than the poll interval ({}s)",
                self.timeout.as_secs(),
                self.poll_interval.as_secs()
            )));
        }
        Ok(())
    }
}
