// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use alloy_primitives::{FixedBytes, TxHash};
use bon::Builder;
use tracing::{info, Instrument};

use super::config::PollingConfig;
use super::poller::AttestationPoller;
use super::receipts::extract_burn_receipt;
use super::report::StatusReport;
use crate::amount::UsdcAmount;
use crate::chain::ChainDescriptor;
use crate::error::{Result, Step};
use crate::protocol::{AttestationRecord, AttestationStatus, BurnReceipt};
use crate::spans;
use crate::traits::{AttestationProvider, BlockchainProvider, Clock};

/// What an in-flight transfer is looked up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusQuery {
    /// The source-chain burn; its message is read from the receipt.
    BurnTransaction(TxHash),
    MessageHash(FixedBytes<32>),
}

impl fmt::Display for StatusQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BurnTransaction(tx) => write!(f, "burn tx {tx}"),
            Self::MessageHash(hash) => write!(f, "message {hash}"),
        }
    }
}

/// Read-only view of a transfer's attestation. Never submits a transaction.
#[derive(Builder)]
pub struct StatusChecker<P, A, C> {
    source: ChainDescriptor,
    provider: P,
    attestation_provider: A,
    clock: C,
    /// Defaults to [`PollingConfig::for_chain`] of the source.
    polling: Option<PollingConfig>,
}

impl<P, A, C> StatusChecker<P, A, C>
where
    P: BlockchainProvider,
    A: AttestationProvider,
    C: Clock,
{
    pub fn polling_config(&self) -> PollingConfig {
        self.polling
            .unwrap_or_else(|| PollingConfig::for_chain(&self.source))
    }

    /// One lookup of the current status.
    pub async fn check(&self, query: StatusQuery) -> Result<StatusReport> {
        let span = spans::check_status(&self.source.chain, &query.to_string(), false);
        async {
            let (message_hash, burn) = self.resolve(query).await?;

            let record = self
                .poller()
                .fetch_once(message_hash)
                .await
                .map_err(|e| e.at_step(Step::Attestation))?;

            info!(message_hash = %message_hash, status = %record.status, event = "status_checked");
            Ok(self.report(burn.as_ref(), record))
        }
        .instrument(span)
        .await
    }

    /// Polls until the attestation is complete or the budget runs out.
    pub async fn wait(&self, query: StatusQuery) -> Result<StatusReport> {
        let span = spans::check_status(&self.source.chain, &query.to_string(), true);
        async {
            let (message_hash, burn) = self.resolve(query).await?;

            let attestation = self
                .poller()
                .wait_for_attestation(message_hash, &self.source.chain)
                .await
                .map_err(|e| e.at_step(Step::Attestation))?;

            let record = AttestationRecord {
                message_hash,
                status: AttestationStatus::Complete,
                signature: Some(attestation.signature),
            };
            Ok(self.report(burn.as_ref(), record))
        }
        .instrument(span)
        .await
    }

    fn poller(&self) -> AttestationPoller<'_, A, C> {
        AttestationPoller::new(&self.attestation_provider, &self.clock, self.polling_config())
    }

    /// The message hash to look up, plus the burn when queried by transaction.
    async fn resolve(&self, query: StatusQuery) -> Result<(FixedBytes<32>, Option<BurnReceipt>)> {
        match query {
            StatusQuery::BurnTransaction(tx_hash) => {
                let burn = extract_burn_receipt(&self.provider, &self.source, tx_hash)
                    .await
                    .map_err(|e| e.at_step(Step::ExtractMessage))?;
                Ok((burn.message_hash(), Some(burn)))
            }
            StatusQuery::MessageHash(hash) => Ok((hash, None)),
        }
    }

    fn report(&self, burn: Option<&BurnReceipt>, record: AttestationRecord) -> StatusReport {
        StatusReport {
            source_chain: self.source.chain.to_string(),
            message_hash: record.message_hash,
            status: record.status,
            burn_tx_hash: burn.map(|b| b.tx_hash),
            nonce: burn.map(|b| b.nonce),
            destination_domain: burn.map(|b| b.destination_domain),
            amount: burn.map(|b| UsdcAmount::from_base_units(b.amount).to_decimal_string()),
            attestation: record.signature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;
    use crate::protocol::DomainId;
    use crate::receipt::TransactionOutcome;
    use crate::testing::{
        burn_message, message_sent_log, FakeAttestationProvider, FakeBlockchainProvider, FakeClock,
    };
    use alloy_chains::NamedChain;
    use alloy_primitives::{keccak256, Address, Bytes, U256};
    use std::time::Duration;

    struct Harness {
        checker: StatusChecker<FakeBlockchainProvider, FakeAttestationProvider, FakeClock>,
        attestations: FakeAttestationProvider,
        clock: FakeClock,
        burn_tx_hash: TxHash,
        message_hash: FixedBytes<32>,
    }

    fn harness() -> Harness {
        let source = ChainDescriptor::for_chain(NamedChain::BaseSepolia, None).unwrap();
        let provider = FakeBlockchainProvider::new();
        let message = burn_message(
            DomainId::Base,
            DomainId::Ethereum,
            3,
            source.usdc,
            Address::repeat_byte(0x11),
            Address::repeat_byte(0x22),
            U256::from(2_500_000u64),
        )
        .encode();
        let message_hash = keccak256(&message);
        let burn_tx_hash = TxHash::repeat_byte(0xbb);
        provider.add_receipt(TransactionOutcome {
            tx_hash: burn_tx_hash,
            success: true,
            block_number: Some(1),
            logs: vec![message_sent_log(source.message_transmitter, message)],
        });

        let attestations = FakeAttestationProvider::new();
        let clock = FakeClock::new();
        let checker = StatusChecker::builder()
            .source(source)
            .provider(provider)
            .attestation_provider(attestations.clone())
            .clock(clock.clone())
            .polling(
                PollingConfig::default()
                    .with_poll_interval(Duration::from_secs(5))
                    .with_timeout(Duration::from_secs(30)),
            )
            .build();

        Harness {
            checker,
            attestations,
            clock,
            burn_tx_hash,
            message_hash,
        }
    }

    #[tokio::test]
    async fn test_check_by_burn_transaction() {
        let h = harness();
        h.attestations.add_always_pending(h.message_hash);

        let report = h
            .checker
            .check(StatusQuery::BurnTransaction(h.burn_tx_hash))
            .await
            .unwrap();

        assert_eq!(report.message_hash, h.message_hash);
        assert_eq!(report.status, AttestationStatus::Pending);
        assert_eq!(report.burn_tx_hash, Some(h.burn_tx_hash));
        assert_eq!(report.nonce, Some(3));
        assert_eq!(report.amount.as_deref(), Some("2.500000"));
        assert!(!report.is_complete());
        assert_eq!(h.clock.sleep_count(), 0);
    }

    #[tokio::test]
    async fn test_check_by_message_hash_unindexed() {
        let h = harness();
        let report = h
            .checker
            .check(StatusQuery::MessageHash(h.message_hash))
            .await
            .unwrap();

        assert_eq!(report.status, AttestationStatus::Pending);
        assert!(report.burn_tx_hash.is_none());
        assert!(report.nonce.is_none());
    }

    #[tokio::test]
    async fn test_wait_until_complete() {
        let h = harness();
        h.attestations.add_response_sequence(
            h.message_hash,
            vec![
                crate::protocol::AttestationResponse::pending(),
                crate::protocol::AttestationResponse::complete(Bytes::from_static(&[7; 65])),
            ],
        );

        let report = h
            .checker
            .wait(StatusQuery::MessageHash(h.message_hash))
            .await
            .unwrap();
        assert!(report.is_complete());
        assert_eq!(h.clock.total_sleep_time(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_wait_times_out() {
        let h = harness();
        h.attestations.add_always_pending(h.message_hash);

        let err = h
            .checker
            .wait(StatusQuery::BurnTransaction(h.burn_tx_hash))
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::AttestationTimeout { .. }));
        assert_eq!(err.step(), Some(Step::Attestation));
        assert_eq!(h.attestations.get_call_count(h.message_hash), 7);
    }

    #[tokio::test]
    async fn test_unknown_burn_transaction() {
        let h = harness();
        let err = h
            .checker
            .check(StatusQuery::BurnTransaction(TxHash::repeat_byte(0x01)))
            .await
            .unwrap_err();
        assert_eq!(err.step(), Some(Step::ExtractMessage));
    }
}
