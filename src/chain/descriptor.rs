// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use alloy_chains::NamedChain;
use alloy_primitives::{Address, TxHash};
use bon::Builder;
use serde::Serialize;
use url::Url;

use super::config::{CctpChain, ConfirmationConfig};
use crate::{BridgeError, DomainId, Result};

pub const IRIS_API: &str = "https://iris-api.circle.com";
pub const IRIS_API_SANDBOX: &str = "https://iris-api-sandbox.circle.com";

/// Mainnet or testnet. Bridging never crosses the two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
}

impl Network {
    pub fn is_mainnet(&self) -> bool {
        matches!(self, Self::Mainnet)
    }

    /// Circle's attestation service for this network.
    pub fn attestation_api_url(&self) -> &'static str {
        match self {
            Self::Mainnet => IRIS_API,
            Self::Testnet => IRIS_API_SANDBOX,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        })
    }
}

/// The chain names accepted on the command line.
///
/// Each name maps to a mainnet and a testnet [`NamedChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportedChain {
    Ethereum,
    Avalanche,
    Optimism,
    Arbitrum,
    Base,
    Polygon,
}

impl SupportedChain {
    pub const ALL: [SupportedChain; 6] = [
        Self::Ethereum,
        Self::Avalanche,
        Self::Optimism,
        Self::Arbitrum,
        Self::Base,
        Self::Polygon,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::Avalanche => "avalanche",
            Self::Optimism => "optimism",
            Self::Arbitrum => "arbitrum",
            Self::Base => "base",
            Self::Polygon => "polygon",
        }
    }

    pub const fn named_chain(&self, network: Network) -> NamedChain {
        match (self, network) {
            (Self::Ethereum, Network::Mainnet) => NamedChain::Mainnet,
            (Self::Ethereum, Network::Testnet) => NamedChain::Sepolia,
            (Self::Avalanche, Network::Mainnet) => NamedChain::Avalanche,
            (Self::Avalanche, Network::Testnet) => NamedChain::AvalancheFuji,
            (Self::Optimism, Network::Mainnet) => NamedChain::Optimism,
            (Self::Optimism, Network::Testnet) => NamedChain::OptimismSepolia,
            (Self::Arbitrum, Network::Mainnet) => NamedChain::Arbitrum,
            (Self::Arbitrum, Network::Testnet) => NamedChain::ArbitrumSepolia,
            (Self::Base, Network::Mainnet) => NamedChain::Base,
            (Self::Base, Network::Testnet) => NamedChain::BaseSepolia,
            (Self::Polygon, Network::Mainnet) => NamedChain::Polygon,
            (Self::Polygon, Network::Testnet) => NamedChain::PolygonAmoy,
        }
    }

    /// Reverse of [`SupportedChain::named_chain`].
    pub fn from_named_chain(chain: NamedChain) -> Option<(Self, Network)> {
        Self::ALL.into_iter().find_map(|name| {
            [Network::Mainnet, Network::Testnet]
                .into_iter()
                .find(|network| name.named_chain(*network) == chain)
                .map(|network| (name, network))
        })
    }

    /// Environment variable overriding this chain's RPC endpoint, e.g. `USDC_RPC_BASE`.
    pub fn rpc_env_var(&self) -> String {
        format!("USDC_RPC_{}", self.as_str().to_ascii_uppercase())
    }
}

impl fmt::Display for SupportedChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupportedChain {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|chain| chain.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|c| c.as_str()).collect();
                BridgeError::InvalidInput(format!(
                    "unknown chain {s:?}, expected one of: {}",
                    names.join(", ")
                ))
            })
    }
}

/// Everything needed to talk to CCTP and USDC on one chain.
///
/// Resolved once per invocation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct ChainDescriptor {
    pub chain: NamedChain,
    pub domain: DomainId,
    pub rpc_url: Url,
    pub token_messenger: Address,
    pub message_transmitter: Address,
    pub usdc: Address,
    #[builder(into)]
    pub explorer_url: String,
    pub average_attestation_time: Duration,
    #[builder(default)]
    pub confirmations: ConfirmationConfig,
}

impl ChainDescriptor {
    /// Builds the descriptor from the static table, with an optional RPC override.
    pub fn for_chain(chain: NamedChain, rpc_override: Option<Url>) -> Result<Self> {
        let rpc_url = match rpc_override {
            Some(url) => url,
            None => Url::parse(chain.default_rpc_url()?)?,
        };

        Ok(Self {
            chain,
            domain: chain.cctp_domain_id()?,
            rpc_url,
            token_messenger: chain.token_messenger_address()?,
            message_transmitter: chain.message_transmitter_address()?,
            usdc: chain.usdc_address()?,
            explorer_url: chain.explorer_url()?.to_string(),
            average_attestation_time: Duration::from_secs(
                chain.confirmation_average_time_seconds()?,
            ),
            confirmations: ConfirmationConfig::for_chain(&chain),
        })
    }

    pub fn resolve(
        name: SupportedChain,
        network: Network,
        rpc_override: Option<Url>,
    ) -> Result<Self> {
        Self::for_chain(name.named_chain(network), rpc_override)
    }

    pub fn network(&self) -> Network {
        if self.chain.is_testnet() {
            Network::Testnet
        } else {
            Network::Mainnet
        }
    }

    pub fn is_testnet(&self) -> bool {
        self.chain.is_testnet()
    }

    pub fn tx_url(&self, tx_hash: TxHash) -> String {
        format!("{}/tx/{tx_hash}", self.explorer_url.trim_end_matches('/'))
    }
}

impl fmt::Display for ChainDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [domain {}]", self.chain, self.domain.as_u32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use rstest::rstest;

    #[rstest]
    #[case(SupportedChain::Ethereum, Network::Testnet, NamedChain::Sepolia)]
    #[case(SupportedChain::Ethereum, Network::Mainnet, NamedChain::Mainnet)]
    #[case(SupportedChain::Avalanche, Network::Testnet, NamedChain::AvalancheFuji)]
    #[case(SupportedChain::Optimism, Network::Testnet, NamedChain::OptimismSepolia)]
    #[case(SupportedChain::Arbitrum, Network::Mainnet, NamedChain::Arbitrum)]
    #[case(SupportedChain::Base, Network::Testnet, NamedChain::BaseSepolia)]
    #[case(SupportedChain::Polygon, Network::Testnet, NamedChain::PolygonAmoy)]
    fn test_named_chain_mapping(
        #[case] name: SupportedChain,
        #[case] network: Network,
        #[case] expected: NamedChain,
    ) {
        assert_eq!(name.named_chain(network), expected);
        assert_eq!(SupportedChain::from_named_chain(expected), Some((name, network)));
    }

    #[test]
    fn test_parse_chain_names() {
        assert_eq!("Base".parse::<SupportedChain>().unwrap(), SupportedChain::Base);
        assert_eq!(
            " polygon ".parse::<SupportedChain>().unwrap(),
            SupportedChain::Polygon
        );
        let err = "solana".parse::<SupportedChain>().unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @r#"Invalid input: unknown chain "solana", expected one of: ethereum, avalanche, optimism, arbitrum, base, polygon"#
        );
    }

    #[test]
    fn test_rpc_env_var() {
        assert_eq!(SupportedChain::Base.rpc_env_var(), "USDC_RPC_BASE");
        assert_eq!(SupportedChain::Ethereum.rpc_env_var(), "USDC_RPC_ETHEREUM");
    }

    #[test]
    fn test_resolve_base_sepolia() {
        let descriptor =
            ChainDescriptor::resolve(SupportedChain::Base, Network::Testnet, None).unwrap();

        assert_eq!(descriptor.chain, NamedChain::BaseSepolia);
        assert_eq!(descriptor.domain, DomainId::Base);
        assert_eq!(
            descriptor.usdc,
            address!("036cbd53842c5426634e7929541ec2318f3dcf7e")
        );
        assert_eq!(
            descriptor.rpc_url.as_str(),
            "https://base-sepolia-rpc.publicnode.com/"
        );
        assert_eq!(descriptor.network(), Network::Testnet);
        assert_eq!(descriptor.average_attestation_time, Duration::from_secs(20));
    }

    #[test]
    fn test_rpc_override_wins() {
        let url = Url::parse("http://localhost:8545").unwrap();
        let descriptor =
            ChainDescriptor::resolve(SupportedChain::Ethereum, Network::Mainnet, Some(url.clone()))
                .unwrap();
        assert_eq!(descriptor.rpc_url, url);
        assert!(!descriptor.is_testnet());
    }

    #[test]
    fn test_explorer_link() {
        let descriptor =
            ChainDescriptor::resolve(SupportedChain::Ethereum, Network::Testnet, None).unwrap();
        insta::assert_snapshot!(
            descriptor.tx_url(TxHash::ZERO),
            @"https://sepolia.etherscan.io/tx/0x0000000000000000000000000000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_attestation_urls() {
        assert_eq!(
            Network::Mainnet.attestation_api_url(),
            "https://iris-api.circle.com"
        );
        assert_eq!(
            Network::Testnet.attestation_api_url(),
            "https://iris-api-sandbox.circle.com"
        );
        assert_eq!(Network::default(), Network::Testnet);
    }
}
