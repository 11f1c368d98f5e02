// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Attestation service wire types.

use std::fmt;

use alloy_primitives::{hex::FromHex, keccak256, Bytes, FixedBytes};
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `GET /attestations/{messageHash}`.
///
/// **API Quirk**: the service sometimes returns the string `"PENDING"` for the
/// attestation field instead of `null` while the attestation is not ready.
/// That value is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationResponse {
    pub status: AttestationStatus,
    #[serde(default, deserialize_with = "deserialize_optional_bytes_or_pending")]
    pub attestation: Option<Bytes>,
    /// The attested message, echoed back by some deployments of the service.
    #[serde(default, deserialize_with = "deserialize_optional_bytes_or_pending")]
    pub message: Option<Bytes>,
}

impl AttestationResponse {
    pub fn pending() -> Self {
        Self {
            status: AttestationStatus::Pending,
            attestation: None,
            message: None,
        }
    }

    pub fn complete(attestation: Bytes) -> Self {
        Self {
            status: AttestationStatus::Complete,
            attestation: Some(attestation),
            message: None,
        }
    }

    /// Returns `false` when the service echoed a message whose keccak256 is
    /// not `message_hash`.
    pub fn matches_message_hash(&self, message_hash: FixedBytes<32>) -> bool {
        self.message
            .as_ref()
            .is_none_or(|message| keccak256(message) == message_hash)
    }
}

/// Handles the following cases:
/// - Valid hex string (with or without "0x") → `Some(Bytes)`
/// - "PENDING" in any case, empty string, null or missing → `None`
/// - Invalid hex → error
fn deserialize_optional_bytes_or_pending<'de, D>(deserializer: D) -> Result<Option<Bytes>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;

    match opt {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("pending") => Ok(None),
        Some(s) => Bytes::from_hex(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttestationStatus {
    Complete,
    Pending,
    PendingConfirmations,
    Failed,
}

impl AttestationStatus {
    /// Whether polling should continue on this status.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending | Self::PendingConfirmations)
    }
}

impl fmt::Display for AttestationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Complete => "complete",
            Self::Pending => "pending",
            Self::PendingConfirmations => "pending_confirmations",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// A completed attestation, ready to be submitted with its message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attestation {
    pub message_hash: FixedBytes<32>,
    pub signature: Bytes,
}

/// The attestation state of a message as last observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttestationRecord {
    pub message_hash: FixedBytes<32>,
    pub status: AttestationStatus,
    pub signature: Option<Bytes>,
}

impl AttestationRecord {
    pub fn into_attestation(self) -> Option<Attestation> {
        match (self.status, self.signature) {
            (AttestationStatus::Complete, Some(signature)) if !signature.is_empty() => {
                Some(Attestation {
                    message_hash: self.message_hash,
                    signature,
                })
            }
            _ => None,
        }
    }
}
