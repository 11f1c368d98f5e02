// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! CCTP protocol types and definitions
//!
//! Domain identifiers, the v1 message layout and the attestation service's
//! response format.

mod attestation;
mod domain_id;
mod message;

pub use attestation::{Attestation, AttestationRecord, AttestationResponse, AttestationStatus};
pub use domain_id::{DomainId, InvalidDomainId};
pub use message::{
    address_to_bytes32, bytes32_to_address, message_hash, BurnMessage, BurnReceipt, CctpMessage,
    MessageHeader,
};
