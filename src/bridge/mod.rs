// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Core CCTP bridge implementation
//!
//! The burn → attestation → mint orchestrator, the read-only status checker
//! and the pieces they share: receipt confirmation, message extraction and
//! attestation polling.

mod cctp;
mod config;
mod params;
mod poller;
mod receipts;
mod report;
mod status;

pub use cctp::CctpBridge;
pub use config::{
    PollingConfig, ATTESTATION_TIMEOUT_HEADROOM, DEFAULT_POLL_INTERVAL, MAX_ATTESTATION_TIMEOUT,
    MIN_ATTESTATION_TIMEOUT,
};
pub use params::{parse_recipient, TransferRequest};
pub use poller::AttestationPoller;
pub use receipts::{extract_burn_receipt, wait_for_confirmation};
pub use report::{StatusReport, TransferReport};
pub use status::{StatusChecker, StatusQuery};
