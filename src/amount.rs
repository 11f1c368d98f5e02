// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Decimal USDC amounts.
//!
//! The CLI takes human amounts such as `10.00`; contracts take base units.
//! [`UsdcAmount`] is the only place the two are converted.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::utils::{format_units, parse_units};
use alloy_primitives::U256;
use serde::Serialize;

use crate::error::{BridgeError, Result};

/// USDC uses 6 decimals on every chain CCTP supports.
pub const USDC_DECIMALS: u8 = 6;

/// An amount of USDC held as base units (1 USDC = 1_000_000).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UsdcAmount(U256);

impl UsdcAmount {
    pub const ZERO: Self = Self(U256::ZERO);

    pub const fn from_base_units(units: U256) -> Self {
        Self(units)
    }

    pub const fn base_units(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parses a non-negative decimal string with at most 6 fractional digits.
    pub fn parse_decimal(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(BridgeError::InvalidInput("amount is empty".to_string()));
        }

        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (trimmed, None),
        };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !fraction.is_none_or(all_digits) {
            return Err(BridgeError::InvalidInput(format!(
                "amount {trimmed:?} is not a non-negative decimal number"
            )));
        }
        if whole.is_empty() && fraction.is_none_or(str::is_empty) {
            return Err(BridgeError::InvalidInput(format!(
                "amount {trimmed:?} has no digits"
            )));
        }
        if fraction.is_some_and(|f| f.len() > usize::from(USDC_DECIMALS)) {
            return Err(BridgeError::InvalidInput(format!(
                "amount {trimmed:?} has more than {USDC_DECIMALS} decimal places"
            )));
        }

        let normalized = match (whole.is_empty(), fraction) {
            (true, Some(f)) => format!("0.{f}"),
            (false, Some("")) => whole.to_string(),
            _ => trimmed.to_string(),
        };

        let units = parse_units(&normalized, USDC_DECIMALS)
            .map_err(|e| BridgeError::InvalidInput(format!("amount {trimmed:?}: {e}")))?;
        Ok(Self(units.get_absolute()))
    }

    /// Formats base units as a decimal string with exactly 6 fractional digits.
    pub fn to_decimal_string(&self) -> String {
        format_base_units(self.0, USDC_DECIMALS)
    }
}

/// Formats a raw token amount with the token's own decimals.
pub fn format_base_units(units: U256, decimals: u8) -> String {
    format_units(units, decimals).unwrap_or_else(|_| units.to_string())
}

impl FromStr for UsdcAmount {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_decimal(s)
    }
}

impl fmt::Display for UsdcAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} USDC", self.to_decimal_string())
    }
}

impl From<U256> for UsdcAmount {
    fn from(units: U256) -> Self {
        Self(units)
    }
}
