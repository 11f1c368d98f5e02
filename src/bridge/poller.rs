// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Attestation polling.
//!
//! Lookups happen at a fixed interval from the first request: at 0, I, 2I, …
//! and finally at the timeout itself. A 429 waits for its `Retry-After`
//! instead, capped by the remaining budget. Nothing here submits a
//! transaction.

use std::time::Duration;

use alloy_chains::NamedChain;
use alloy_primitives::FixedBytes;
use tracing::{debug, error, info, warn, Instrument};

use super::config::PollingConfig;
use crate::error::{BridgeError, Result};
use crate::protocol::{Attestation, AttestationRecord, AttestationResponse, AttestationStatus};
use crate::providers::Deadline;
use crate::spans;
use crate::traits::{AttestationProvider, Clock};

/// Polls one attestation service with one clock.
pub struct AttestationPoller<'a, A: ?Sized, C: ?Sized> {
    provider: &'a A,
    clock: &'a C,
    config: PollingConfig,
}

impl<'a, A, C> AttestationPoller<'a, A, C>
where
    A: AttestationProvider + ?Sized,
    C: Clock + ?Sized,
{
    pub fn new(provider: &'a A, clock: &'a C, config: PollingConfig) -> Self {
        Self {
            provider,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &PollingConfig {
        &self.config
    }

    /// A single lookup. A message the service has not indexed yet is
    /// reported as pending.
    pub async fn fetch_once(&self, message_hash: FixedBytes<32>) -> Result<AttestationRecord> {
        match self.provider.get_attestation(message_hash).await {
            Ok(response) => record(message_hash, response),
            Err(BridgeError::AttestationNotFound) => Ok(AttestationRecord {
                message_hash,
                status: AttestationStatus::Pending,
                signature: None,
            }),
            Err(e) => Err(e),
        }
    }

    /// Polls until the attestation is complete, fails, or the budget runs out.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::AttestationTimeout`] once the budget is spent
    /// - [`BridgeError::AttestationFailed`] when the service reports failure,
    ///   returns a complete status without a signature, or echoes a message
    ///   with a different hash
    /// - any non-transient lookup error, unchanged
    pub async fn wait_for_attestation(
        &self,
        message_hash: FixedBytes<32>,
        source_chain: &NamedChain,
    ) -> Result<Attestation> {
        self.config.validate()?;

        let span = spans::wait_for_attestation(
            &message_hash,
            source_chain,
            self.config.poll_interval,
            self.config.timeout,
        );

        async {
            let result = self.poll(message_hash).await;
            if let Err(e) = &result {
                spans::record_error(e);
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn poll(&self, message_hash: FixedBytes<32>) -> Result<Attestation> {
        let deadline = Deadline::start(self.clock, self.config.timeout);
        let mut attempt: u32 = 0;

        info!(
            message_hash = %message_hash,
            poll_interval_secs = self.config.poll_interval.as_secs(),
            timeout_secs = self.config.timeout.as_secs(),
            event = "attestation_polling_started"
        );

        loop {
            attempt += 1;
            let lookup = self
                .provider
                .get_attestation(message_hash)
                .instrument(spans::get_attestation(&message_hash, attempt))
                .await;

            let delay = match lookup {
                Ok(response) => {
                    let record = record(message_hash, response)?;
                    match record.status {
                        AttestationStatus::Complete => {
                            let attestation = record.into_attestation().ok_or_else(|| {
                                BridgeError::AttestationFailed {
                                    reason: "complete attestation without signature".to_string(),
                                }
                            })?;
                            info!(
                                attempt = attempt,
                                attestation_length_bytes = attestation.signature.len(),
                                event = "attestation_complete"
                            );
                            return Ok(attestation);
                        }
                        AttestationStatus::Failed => {
                            error!(attempt = attempt, event = "attestation_failed");
                            return Err(BridgeError::AttestationFailed {
                                reason: format!(
                                    "attestation service reported failure for {message_hash}"
                                ),
                            });
                        }
                        status => {
                            debug!(
                                attempt = attempt,
                                status = %status,
                                event = "attestation_pending"
                            );
                            self.config.poll_interval
                        }
                    }
                }
                Err(BridgeError::RateLimitExceeded {
                    retry_after_seconds,
                }) => {
                    warn!(
                        attempt = attempt,
                        retry_after_seconds = retry_after_seconds,
                        event = "rate_limit_exceeded"
                    );
                    Duration::from_secs(retry_after_seconds).max(self.config.poll_interval)
                }
                Err(e) if e.is_transient() => {
                    debug!(attempt = attempt, error = %e, event = "attestation_lookup_retry");
                    self.config.poll_interval
                }
                Err(e) => {
                    error!(attempt = attempt, error = %e, event = "attestation_lookup_failed");
                    return Err(e);
                }
            };

            let remaining = deadline.remaining(self.clock);
            if remaining.is_zero() {
                let elapsed_secs = deadline.elapsed(self.clock).as_secs();
                error!(
                    attempts = attempt,
                    elapsed_secs = elapsed_secs,
                    event = "attestation_timeout"
                );
                return Err(BridgeError::AttestationTimeout {
                    message_hash,
                    elapsed_secs,
                });
            }

            self.clock.sleep(delay.min(remaining)).await;
        }
    }
}

/// Checks a response against the hash it was requested for.
fn record(
    message_hash: FixedBytes<32>,
    response: AttestationResponse,
) -> Result<AttestationRecord> {
    if !response.matches_message_hash(message_hash) {
        return Err(BridgeError::AttestationFailed {
            reason: format!("service returned a message that does not hash to {message_hash}"),
        });
    }

    Ok(AttestationRecord {
        message_hash,
        status: response.status,
        signature: response.attestation,
    })
}
