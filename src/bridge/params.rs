// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use alloy_primitives::Address;
use bon::Builder;

use crate::amount::UsdcAmount;
use crate::error::{BridgeError, Result};

/// One cross-chain transfer, as requested by the caller.
///
/// The recipient is kept as given so that a malformed address is reported
/// by validation rather than by whoever built the request.
#[derive(Builder, Debug, Clone)]
pub struct TransferRequest {
    sender: Address,
    #[builder(into)]
    recipient: String,
    amount: UsdcAmount,
}

impl TransferRequest {
    pub fn sender(&self) -> Address {
        self.sender
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn amount(&self) -> UsdcAmount {
        self.amount
    }
}

/// Parses a 20-byte hex address and rejects the zero address.
pub fn parse_recipient(input: &str) -> Result<Address> {
    let trimmed = input.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| {
            BridgeError::InvalidInput(format!("recipient {input:?} must be 0x-prefixed"))
        })?;

    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(BridgeError::InvalidInput(format!(
            "recipient {input:?} is not a 20-byte hex address"
        )));
    }

    let address: Address = trimmed
        .parse()
        .map_err(|e| BridgeError::InvalidInput(format!("recipient {input:?}: {e}")))?;

    if address.is_zero() {
        return Err(BridgeError::InvalidInput(
            "recipient must not be the zero address".to_string(),
        ));
    }
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U256};
    use rstest::rstest;

    #[test]
    fn test_transfer_request_builder() {
        let request = TransferRequest::builder()
            .sender(Address::ZERO)
            .recipient("0x742d35Cc6634C0532925a3b844Bc9e7595f8fA0d")
            .amount(UsdcAmount::from_base_units(U256::from(1000)))
            .build();

        assert_eq!(request.sender(), Address::ZERO);
        assert_eq!(request.recipient(), "0x742d35Cc6634C0532925a3b844Bc9e7595f8fA0d");
        assert_eq!(request.amount().base_units(), U256::from(1000));
    }

    #[test]
    fn test_parse_recipient() {
        assert_eq!(
            parse_recipient(" 0x742d35cc6634c0532925a3b844bc9e7595f8fa0d ").unwrap(),
            address!("742d35cc6634c0532925a3b844bc9e7595f8fa0d")
        );
    }

    #[rstest]
    #[case("")]
    #[case("742d35cc6634c0532925a3b844bc9e7595f8fa0d")]
    #[case("0x742d35cc6634c0532925a3b844bc9e7595f8fa")]
    #[case("0x742d35cc6634c0532925a3b844bc9e7595f8fa0d00")]
    #[case("0x742d35cc6634c0532925a3b844bc9e7595f8fzzz")]
    #[case("0x0000000000000000000000000000000000000000")]
    fn test_parse_recipient_rejects(#[case] input: &str) {
        assert!(matches!(
            parse_recipient(input),
            Err(BridgeError::InvalidInput(_))
        ));
    }
}
