// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! CCTP v1 message format.
//!
//! `MessageSent(bytes)` carries a message made of a fixed header followed by a
//! burn body. Only the fields the toolkit reports on are decoded; the bytes
//! themselves are always submitted to the destination chain untouched.
//!
//! Reference: <https://developers.circle.com/stablecoins/message-format>

use alloy_primitives::{keccak256, Address, Bytes, FixedBytes, TxHash, U256};
use serde::Serialize;

use super::DomainId;
use crate::error::{BridgeError, Result};

/// Left-pads an EVM address to the `bytes32` form CCTP uses for recipients.
#[inline]
pub fn address_to_bytes32(address: Address) -> FixedBytes<32> {
    address.into_word()
}

/// Takes the low 20 bytes of a `bytes32` address.
#[inline]
pub fn bytes32_to_address(word: FixedBytes<32>) -> Address {
    Address::from_word(word)
}

/// The attestation service indexes messages by `keccak256(message)`.
#[inline]
pub fn message_hash(message: &[u8]) -> FixedBytes<32> {
    keccak256(message)
}

/// v1 message header.
///
/// | field | type |
/// |---|---|
/// | version | uint32 |
/// | sourceDomain | uint32 |
/// | destinationDomain | uint32 |
/// | nonce | uint64 |
/// | sender | bytes32 |
/// | recipient | bytes32 |
/// | destinationCaller | bytes32 |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    pub version: u32,
    pub source_domain: DomainId,
    pub destination_domain: DomainId,
    pub nonce: u64,
    pub sender: FixedBytes<32>,
    pub recipient: FixedBytes<32>,
    pub destination_caller: FixedBytes<32>,
}

impl MessageHeader {
    pub const SIZE: usize = 116;

    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::SIZE);
        bytes.extend_from_slice(&self.version.to_be_bytes());
        bytes.extend_from_slice(&self.source_domain.as_u32().to_be_bytes());
        bytes.extend_from_slice(&self.destination_domain.as_u32().to_be_bytes());
        bytes.extend_from_slice(&self.nonce.to_be_bytes());
        bytes.extend_from_slice(self.sender.as_slice());
        bytes.extend_from_slice(self.recipient.as_slice());
        bytes.extend_from_slice(self.destination_caller.as_slice());
        bytes
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(malformed(format!(
                "header needs {} bytes, got {}",
                Self::SIZE,
                bytes.len()
            )));
        }

        let source_domain = read_u32(bytes, 4);
        let destination_domain = read_u32(bytes, 8);

        Ok(Self {
            version: read_u32(bytes, 0),
            source_domain: DomainId::try_from(source_domain)
                .map_err(|e| malformed(format!("source domain: {e}")))?,
            destination_domain: DomainId::try_from(destination_domain)
                .map_err(|e| malformed(format!("destination domain: {e}")))?,
            nonce: u64::from_be_bytes(fixed(bytes, 12)),
            sender: FixedBytes::from_slice(&bytes[20..52]),
            recipient: FixedBytes::from_slice(&bytes[52..84]),
            destination_caller: FixedBytes::from_slice(&bytes[84..116]),
        })
    }
}

/// v1 burn message body, following the header.
///
/// | field | type |
/// |---|---|
/// | version | uint32 |
/// | burnToken | bytes32 |
/// | mintRecipient | bytes32 |
/// | amount | uint256 |
/// | messageSender | bytes32 |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnMessage {
    pub version: u32,
    pub burn_token: Address,
    pub mint_recipient: Address,
    pub amount: U256,
    pub message_sender: Address,
}

impl BurnMessage {
    pub const SIZE: usize = 132;

    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::SIZE);
        bytes.extend_from_slice(&self.version.to_be_bytes());
        bytes.extend_from_slice(address_to_bytes32(self.burn_token).as_slice());
        bytes.extend_from_slice(address_to_bytes32(self.mint_recipient).as_slice());
        bytes.extend_from_slice(&self.amount.to_be_bytes::<32>());
        bytes.extend_from_slice(address_to_bytes32(self.message_sender).as_slice());
        bytes
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(malformed(format!(
                "burn body needs {} bytes, got {}",
                Self::SIZE,
                bytes.len()
            )));
        }

        Ok(Self {
            version: read_u32(bytes, 0),
            burn_token: bytes32_to_address(FixedBytes::from_slice(&bytes[4..36])),
            mint_recipient: bytes32_to_address(FixedBytes::from_slice(&bytes[36..68])),
            amount: U256::from_be_slice(&bytes[68..100]),
            message_sender: bytes32_to_address(FixedBytes::from_slice(&bytes[100..132])),
        })
    }
}

/// A full burn message as emitted on the source chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CctpMessage {
    pub header: MessageHeader,
    pub body: BurnMessage,
}

impl CctpMessage {
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let header = MessageHeader::decode(bytes)?;
        let body = BurnMessage::decode(&bytes[MessageHeader::SIZE..])?;
        Ok(Self { header, body })
    }

    pub fn encode(&self) -> Bytes {
        let mut bytes = self.header.encode();
        bytes.extend_from_slice(&self.body.encode());
        Bytes::from(bytes)
    }
}

/// What a confirmed burn leaves behind: enough to resume the transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BurnReceipt {
    pub tx_hash: TxHash,
    pub message: Bytes,
    pub nonce: u64,
    pub source_domain: DomainId,
    pub destination_domain: DomainId,
    pub amount: U256,
    pub mint_recipient: Address,
}

impl BurnReceipt {
    /// Decodes the emitted message, rejecting anything that is not a v1 burn.
    pub fn from_message(tx_hash: TxHash, message: Bytes) -> Result<Self> {
        let decoded = CctpMessage::decode(&message)?;
        Ok(Self {
            tx_hash,
            nonce: decoded.header.nonce,
            source_domain: decoded.header.source_domain,
            destination_domain: decoded.header.destination_domain,
            amount: decoded.body.amount,
            mint_recipient: decoded.body.mint_recipient,
            message,
        })
    }

    pub fn message_hash(&self) -> FixedBytes<32> {
        message_hash(&self.message)
    }
}

fn malformed(reason: String) -> BridgeError {
    BridgeError::MalformedMessage { reason }
}

fn fixed<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[offset..offset + N]);
    out
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes(fixed(bytes, offset))
}
