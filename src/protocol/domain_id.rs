// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! CCTP domain identifiers.
//!
//! Circle assigns every CCTP chain a domain ID which is used in burn messages
//! instead of the EVM chain ID. Testnets share the domain of their mainnet.
//!
//! Reference: <https://developers.circle.com/stablecoins/supported-domains>

use std::fmt;

use serde::Serialize;

/// CCTP v1 domains of the chains this crate bridges between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DomainId {
    /// Ethereum mainnet and Sepolia (0)
    Ethereum = 0,
    /// Avalanche C-Chain and Fuji (1)
    Avalanche = 1,
    /// OP Mainnet and OP Sepolia (2)
    Optimism = 2,
    /// Arbitrum One and Arbitrum Sepolia (3)
    Arbitrum = 3,
    /// Base and Base Sepolia (6)
    Base = 6,
    /// Polygon PoS and Amoy (7)
    Polygon = 7,
}

impl DomainId {
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// ```rust
    /// use usdc_cctp::DomainId;
    ///
    /// assert_eq!(DomainId::from_u32(6), Some(DomainId::Base));
    /// assert_eq!(DomainId::from_u32(5), None);
    /// ```
    #[inline]
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Ethereum),
            1 => Some(Self::Avalanche),
            2 => Some(Self::Optimism),
            3 => Some(Self::Arbitrum),
            6 => Some(Self::Base),
            7 => Some(Self::Polygon),
            _ => None,
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ethereum => "Ethereum",
            Self::Avalanche => "Avalanche",
            Self::Optimism => "Optimism",
            Self::Arbitrum => "Arbitrum",
            Self::Base => "Base",
            Self::Polygon => "Polygon",
        }
    }
}

impl From<DomainId> for u32 {
    #[inline]
    fn from(domain: DomainId) -> Self {
        domain.as_u32()
    }
}

impl TryFrom<u32> for DomainId {
    type Error = InvalidDomainId;

    #[inline]
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::from_u32(value).ok_or(InvalidDomainId(value))
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_u32())
    }
}

impl Serialize for DomainId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.as_u32())
    }
}

/// A domain number outside the supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDomainId(pub u32);

impl fmt::Display for InvalidDomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported CCTP domain {}", self.0)
    }
}

impl std::error::Error for InvalidDomainId {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DomainId::Ethereum, 0)]
    #[case(DomainId::Avalanche, 1)]
    #[case(DomainId::Optimism, 2)]
    #[case(DomainId::Arbitrum, 3)]
    #[case(DomainId::Base, 6)]
    #[case(DomainId::Polygon, 7)]
    fn test_domain_values(#[case] domain: DomainId, #[case] value: u32) {
        assert_eq!(domain.as_u32(), value);
        assert_eq!(u32::from(domain), value);
        assert_eq!(DomainId::try_from(value), Ok(domain));
    }

    #[rstest]
    #[case(4)]
    #[case(5)]
    #[case(10)]
    #[case(999)]
    fn test_unsupported_domains(#[case] value: u32) {
        assert_eq!(DomainId::try_from(value), Err(InvalidDomainId(value)));
    }

    #[test]
    fn test_display() {
        insta::assert_snapshot!(DomainId::Base.to_string(), @"Base (6)");
        insta::assert_snapshot!(InvalidDomainId(9).to_string(), @"unsupported CCTP domain 9");
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&DomainId::Polygon).unwrap(), "7");
    }
}
