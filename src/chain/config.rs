// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use alloy_chains::NamedChain;
use alloy_primitives::Address;

use super::addresses::*;
use crate::{BridgeError, DomainId, Result};

/// Static CCTP v1 facts about a chain.
///
/// Implemented on [`NamedChain`]; every method errors with
/// [`BridgeError::UnsupportedChain`] outside the supported set.
///
/// ```rust
/// use alloy_chains::NamedChain;
/// use usdc_cctp::{CctpChain, DomainId};
///
/// assert_eq!(NamedChain::BaseSepolia.cctp_domain_id().unwrap(), DomainId::Base);
/// assert!(NamedChain::Fantom.cctp_domain_id().is_err());
/// ```
pub trait CctpChain {
    /// <https://developers.circle.com/stablecoins/supported-domains>
    fn cctp_domain_id(&self) -> Result<DomainId>;
    fn token_messenger_address(&self) -> Result<Address>;
    fn message_transmitter_address(&self) -> Result<Address>;
    /// Native USDC token contract.
    fn usdc_address(&self) -> Result<Address>;
    /// Public RPC endpoint used when no `USDC_RPC_<CHAIN>` override is set.
    fn default_rpc_url(&self) -> Result<&'static str>;
    /// Block explorer base URL, without a trailing slash.
    fn explorer_url(&self) -> Result<&'static str>;
    /// The average time to attestation of the chain, according to the CCTP docs:
    /// <https://developers.circle.com/stablecoins/required-block-confirmations>
    fn confirmation_average_time_seconds(&self) -> Result<u64>;

    fn is_cctp_supported(&self) -> bool {
        self.cctp_domain_id().is_ok()
    }
}

impl CctpChain for NamedChain {
    fn cctp_domain_id(&self) -> Result<DomainId> {
        use NamedChain::*;

        match self {
            Mainnet | Sepolia => Ok(DomainId::Ethereum),
            Avalanche | AvalancheFuji => Ok(DomainId::Avalanche),
            Optimism | OptimismSepolia => Ok(DomainId::Optimism),
            Arbitrum | ArbitrumSepolia => Ok(DomainId::Arbitrum),
            Base | BaseSepolia => Ok(DomainId::Base),
            Polygon | PolygonAmoy => Ok(DomainId::Polygon),
            _ => Err(BridgeError::UnsupportedChain(*self)),
        }
    }

    fn token_messenger_address(&self) -> Result<Address> {
        use NamedChain::*;

        match self {
            Mainnet => Ok(ETHEREUM_TOKEN_MESSENGER),
            Avalanche => Ok(AVALANCHE_TOKEN_MESSENGER),
            Optimism => Ok(OPTIMISM_TOKEN_MESSENGER),
            Arbitrum => Ok(ARBITRUM_TOKEN_MESSENGER),
            Base => Ok(BASE_TOKEN_MESSENGER),
            Polygon => Ok(POLYGON_TOKEN_MESSENGER),
            // Testnets
            AvalancheFuji => Ok(AVALANCHE_FUJI_TOKEN_MESSENGER),
            Sepolia | OptimismSepolia | ArbitrumSepolia | BaseSepolia | PolygonAmoy => {
                Ok(TESTNET_TOKEN_MESSENGER)
            }
            _ => Err(BridgeError::UnsupportedChain(*self)),
        }
    }

    fn message_transmitter_address(&self) -> Result<Address> {
        use NamedChain::*;

        match self {
            Mainnet => Ok(ETHEREUM_MESSAGE_TRANSMITTER),
            Avalanche => Ok(AVALANCHE_MESSAGE_TRANSMITTER),
            Optimism => Ok(OPTIMISM_MESSAGE_TRANSMITTER),
            Arbitrum => Ok(ARBITRUM_MESSAGE_TRANSMITTER),
            Base => Ok(BASE_MESSAGE_TRANSMITTER),
            Polygon => Ok(POLYGON_MESSAGE_TRANSMITTER),
            // Testnets
            AvalancheFuji => Ok(AVALANCHE_FUJI_MESSAGE_TRANSMITTER),
            ArbitrumSepolia => Ok(ARBITRUM_SEPOLIA_MESSAGE_TRANSMITTER),
            Sepolia | OptimismSepolia | BaseSepolia | PolygonAmoy => {
                Ok(TESTNET_MESSAGE_TRANSMITTER)
            }
            _ => Err(BridgeError::UnsupportedChain(*self)),
        }
    }

    fn usdc_address(&self) -> Result<Address> {
        use NamedChain::*;

        match self {
            Mainnet => Ok(ETHEREUM_USDC),
            Sepolia => Ok(SEPOLIA_USDC),
            Avalanche => Ok(AVALANCHE_USDC),
            AvalancheFuji => Ok(AVALANCHE_FUJI_USDC),
            Optimism => Ok(OPTIMISM_USDC),
            OptimismSepolia => Ok(OPTIMISM_SEPOLIA_USDC),
            Arbitrum => Ok(ARBITRUM_USDC),
            ArbitrumSepolia => Ok(ARBITRUM_SEPOLIA_USDC),
            Base => Ok(BASE_USDC),
            BaseSepolia => Ok(BASE_SEPOLIA_USDC),
            Polygon => Ok(POLYGON_USDC),
            PolygonAmoy => Ok(POLYGON_AMOY_USDC),
            _ => Err(BridgeError::UnsupportedChain(*self)),
        }
    }

    fn default_rpc_url(&self) -> Result<&'static str> {
        use NamedChain::*;

        match self {
            Mainnet => Ok("https://eth.llamarpc.com"),
            Sepolia => Ok("https://ethereum-sepolia-rpc.publicnode.com"),
            Avalanche => Ok("https://api.avax.network/ext/bc/C/rpc"),
            AvalancheFuji => Ok("https://api.avax-test.network/ext/bc/C/rpc"),
            Optimism => Ok("https://mainnet.optimism.io"),
            OptimismSepolia => Ok("https://sepolia.optimism.io"),
            Arbitrum => Ok("https://arbitrum.llamarpc.com"),
            ArbitrumSepolia => Ok("https://arbitrum-sepolia-rpc.publicnode.com"),
            Base => Ok("https://base.llamarpc.com"),
            BaseSepolia => Ok("https://base-sepolia-rpc.publicnode.com"),
            Polygon => Ok("https://polygon.llamarpc.com"),
            PolygonAmoy => Ok("https://rpc-amoy.polygon.technology"),
            _ => Err(BridgeError::UnsupportedChain(*self)),
        }
    }

    fn explorer_url(&self) -> Result<&'static str> {
        use NamedChain::*;

        match self {
            Mainnet => Ok("https://etherscan.io"),
            Sepolia => Ok("https://sepolia.etherscan.io"),
            Avalanche => Ok("https://snowtrace.io"),
            AvalancheFuji => Ok("https://testnet.snowtrace.io"),
            Optimism => Ok("https://optimistic.etherscan.io"),
            OptimismSepolia => Ok("https://sepolia-optimism.etherscan.io"),
            Arbitrum => Ok("https://arbiscan.io"),
            ArbitrumSepolia => Ok("https://sepolia.arbiscan.io"),
            Base => Ok("https://basescan.org"),
            BaseSepolia => Ok("https://sepolia.basescan.org"),
            Polygon => Ok("https://polygonscan.com"),
            PolygonAmoy => Ok("https://amoy.polygonscan.com"),
            _ => Err(BridgeError::UnsupportedChain(*self)),
        }
    }

    fn confirmation_average_time_seconds(&self) -> Result<u64> {
        use NamedChain::*;

        match self {
            Mainnet | Arbitrum | Base | Optimism => Ok(19 * 60),
            Avalanche => Ok(20),
            Polygon => Ok(8 * 60),
            // Testnets
            Sepolia => Ok(60),
            ArbitrumSepolia | AvalancheFuji | BaseSepolia | OptimismSepolia | PolygonAmoy => Ok(20),
            _ => Err(BridgeError::UnsupportedChain(*self)),
        }
    }
}

pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(180);

/// (chain, required confirmations, receipt timeout)
pub const CHAIN_CONFIRMATION_CONFIG: &[(NamedChain, u64, Duration)] = &[
    (NamedChain::Mainnet, 2, Duration::from_secs(300)),
    (NamedChain::Arbitrum, 1, Duration::from_secs(120)),
    (NamedChain::Optimism, 1, Duration::from_secs(120)),
    (NamedChain::Polygon, 15, Duration::from_secs(180)),
    (NamedChain::Avalanche, 3, Duration::from_secs(120)),
    (NamedChain::Base, 1, Duration::from_secs(120)),
];

/// How long to wait for a submitted transaction, and how deep it must be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationConfig {
    pub required_confirmations: u64,
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            required_confirmations: 1,
            timeout: DEFAULT_CONFIRMATION_TIMEOUT,
            poll_interval: Duration::from_secs(2),
        }
    }
}

impl ConfirmationConfig {
    /// Chain-specific defaults; testnets and unknown chains get one
    /// confirmation within three minutes.
    pub fn for_chain(chain: &NamedChain) -> Self {
        CHAIN_CONFIRMATION_CONFIG
            .iter()
            .find(|(ch, _, _)| ch == chain)
            .map(|(_, confirmations, timeout)| Self {
                required_confirmations: *confirmations,
                timeout: *timeout,
                ..Self::default()
            })
            .unwrap_or_default()
    }

    pub fn with_required_confirmations(mut self, confirmations: u64) -> Self {
        self.required_confirmations = confirmations.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use rstest::rstest;

    #[rstest]
    #[case(NamedChain::Mainnet, DomainId::Ethereum)]
    #[case(NamedChain::Sepolia, DomainId::Ethereum)]
    #[case(NamedChain::AvalancheFuji, DomainId::Avalanche)]
    #[case(NamedChain::OptimismSepolia, DomainId::Optimism)]
    #[case(NamedChain::Arbitrum, DomainId::Arbitrum)]
    #[case(NamedChain::BaseSepolia, DomainId::Base)]
    #[case(NamedChain::PolygonAmoy, DomainId::Polygon)]
    fn test_domain_ids(#[case] chain: NamedChain, #[case] domain: DomainId) {
        assert_eq!(chain.cctp_domain_id().unwrap(), domain);
        assert!(chain.is_cctp_supported());
    }

    #[rstest]
    #[case(NamedChain::Mainnet)]
    #[case(NamedChain::Sepolia)]
    #[case(NamedChain::Avalanche)]
    #[case(NamedChain::AvalancheFuji)]
    #[case(NamedChain::Optimism)]
    #[case(NamedChain::OptimismSepolia)]
    #[case(NamedChain::Arbitrum)]
    #[case(NamedChain::ArbitrumSepolia)]
    #[case(NamedChain::Base)]
    #[case(NamedChain::BaseSepolia)]
    #[case(NamedChain::Polygon)]
    #[case(NamedChain::PolygonAmoy)]
    fn test_supported_chains_have_full_table(#[case] chain: NamedChain) {
        assert!(chain.token_messenger_address().is_ok());
        assert!(chain.message_transmitter_address().is_ok());
        assert!(chain.usdc_address().is_ok());
        assert!(chain.default_rpc_url().unwrap().starts_with("https://"));
        assert!(!chain.explorer_url().unwrap().ends_with('/'));
        assert!(chain.confirmation_average_time_seconds().is_ok());
    }

    #[rstest]
    #[case(NamedChain::Fantom)]
    #[case(NamedChain::Unichain)]
    #[case(NamedChain::BinanceSmartChain)]
    fn test_unsupported_chains(#[case] chain: NamedChain) {
        assert!(!chain.is_cctp_supported());
        assert!(matches!(
            chain.usdc_address(),
            Err(BridgeError::UnsupportedChain(c)) if c == chain
        ));
        assert!(chain.token_messenger_address().is_err());
        assert!(chain.default_rpc_url().is_err());
    }

    #[test]
    fn test_sepolia_message_transmitter() {
        assert_eq!(
            NamedChain::Sepolia.message_transmitter_address().unwrap(),
            address!("7865fafc2db2093669d92c0f33aeef291086befd")
        );
        assert_eq!(
            NamedChain::ArbitrumSepolia
                .message_transmitter_address()
                .unwrap(),
            address!("acf1ceef35caac005e15888ddb8a3515c41b4872")
        );
    }

    #[rstest]
    #[case(NamedChain::Mainnet, 2, 300)]
    #[case(NamedChain::Polygon, 15, 180)]
    #[case(NamedChain::Base, 1, 120)]
    #[case(NamedChain::BaseSepolia, 1, 180)]
    fn test_confirmation_config(
        #[case] chain: NamedChain,
        #[case] confirmations: u64,
        #[case] timeout_secs: u64,
    ) {
        let config = ConfirmationConfig::for_chain(&chain);
        assert_eq!(config.required_confirmations, confirmations);
        assert_eq!(config.timeout, Duration::from_secs(timeout_secs));
    }

    #[test]
    fn test_confirmation_builders() {
        let config = ConfirmationConfig::default()
            .with_required_confirmations(0)
            .with_timeout(Duration::from_secs(10))
            .with_poll_interval(Duration::from_millis(500));
        assert_eq!(config.required_confirmations, 1);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.poll_interval, Duration::from_millis(500));
    }
}
