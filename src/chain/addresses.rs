// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Contract addresses for CCTP v1 and native USDC across supported chains
//!
//! Mainnet addresses: <https://developers.circle.com/stablecoins/evm-smart-contracts>
//! Testnet addresses: <https://developers.circle.com/stablecoins/usdc-on-test-networks>

use alloy_primitives::{address, Address};

// TokenMessenger

/// <https://etherscan.io/address/0xbd3fa81b58ba92a82136038b25adec7066af3155>
pub const ETHEREUM_TOKEN_MESSENGER: Address = address!("bd3fa81b58ba92a82136038b25adec7066af3155");

/// <https://snowtrace.io/address/0x6b25532e1060ce10cc3b0a99e5683b91bfde6982>
pub const AVALANCHE_TOKEN_MESSENGER: Address = address!("6b25532e1060ce10cc3b0a99e5683b91bfde6982");

/// <https://optimistic.etherscan.io/address/0x2B4069517957735bE00ceE0fadAE88a26365528f>
pub const OPTIMISM_TOKEN_MESSENGER: Address = address!("2b4069517957735be00cee0fadae88a26365528f");

/// <https://arbiscan.io/address/0x19330d10D9Cc8751218eaf51E8885D058642E08A>
pub const ARBITRUM_TOKEN_MESSENGER: Address = address!("19330d10d9cc8751218eaf51e8885d058642e08a");

/// <https://basescan.org/address/0x1682Ae6375C4E4A97e4B583BC394c861A46D8962>
pub const BASE_TOKEN_MESSENGER: Address = address!("1682ae6375c4e4a97e4b583bc394c861a46d8962");

/// <https://polygonscan.com/address/0x9daF8c91AEFAE50b9c0E69629D3F6Ca40cA3B3FE>
pub const POLYGON_TOKEN_MESSENGER: Address = address!("9daf8c91aefae50b9c0e69629d3f6ca40ca3b3fe");

/// Shared by Sepolia, OP Sepolia, Arbitrum Sepolia, Base Sepolia and Polygon Amoy.
pub const TESTNET_TOKEN_MESSENGER: Address = address!("9f3b8679c73c2fef8b59b4f3444d4e156fb70aa5");

/// <https://testnet.snowtrace.io/address/0xeb08f243E5d3FCFF26A9E38Ae5520A669f4019d0>
pub const AVALANCHE_FUJI_TOKEN_MESSENGER: Address =
    address!("eb08f243e5d3fcff26a9e38ae5520a669f4019d0");

// MessageTransmitter

/// <https://etherscan.io/address/0x0a992d191DEeC32aFe36203Ad87D7d289a738F81>
pub const ETHEREUM_MESSAGE_TRANSMITTER: Address =
    address!("0a992d191deec32afe36203ad87d7d289a738f81");

/// <https://snowtrace.io/address/0x8186359af5f57fbb40c6b14a588d2a59c0c29880>
pub const AVALANCHE_MESSAGE_TRANSMITTER: Address =
    address!("8186359af5f57fbb40c6b14a588d2a59c0c29880");

/// <https://optimistic.etherscan.io/address/0x4D41f22c5a0e5c74090899E5a8Fb597a8842b3e8>
pub const OPTIMISM_MESSAGE_TRANSMITTER: Address =
    address!("4d41f22c5a0e5c74090899e5a8fb597a8842b3e8");

/// <https://arbiscan.io/address/0xC30362313FBBA5cf9163F0bb16a0e01f01a896ca>
pub const ARBITRUM_MESSAGE_TRANSMITTER: Address =
    address!("c30362313fbba5cf9163f0bb16a0e01f01a896ca");

/// <https://basescan.org/address/0xAD09780d193884d503182aD4588450C416D6F9D4>
pub const BASE_MESSAGE_TRANSMITTER: Address = address!("ad09780d193884d503182ad4588450c416d6f9d4");

/// <https://polygonscan.com/address/0xF3be9355363857F3e001be68856A2f96b4C39Ba9>
pub const POLYGON_MESSAGE_TRANSMITTER: Address =
    address!("f3be9355363857f3e001be68856a2f96b4c39ba9");

/// Shared by Sepolia, OP Sepolia, Base Sepolia and Polygon Amoy.
pub const TESTNET_MESSAGE_TRANSMITTER: Address =
    address!("7865fafc2db2093669d92c0f33aeef291086befd");

/// <https://sepolia.arbiscan.io/address/0xacf1ceef35caac005e15888ddb8a3515c41b4872>
pub const ARBITRUM_SEPOLIA_MESSAGE_TRANSMITTER: Address =
    address!("acf1ceef35caac005e15888ddb8a3515c41b4872");

/// <https://testnet.snowtrace.io/address/0xa9fB1b3009DCb79E2fe346c16a604B8Fa8aE0a79>
pub const AVALANCHE_FUJI_MESSAGE_TRANSMITTER: Address =
    address!("a9fb1b3009dcb79e2fe346c16a604b8fa8ae0a79");

// USDC

/// <https://etherscan.io/token/0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48>
pub const ETHEREUM_USDC: Address = address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");

/// <https://sepolia.etherscan.io/token/0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238>
pub const SEPOLIA_USDC: Address = address!("1c7d4b196cb0c7b01d743fbc6116a902379c7238");

/// <https://snowtrace.io/token/0xB97EF9Ef8734C71904D8002F8b6Bc66Dd9c48a6E>
pub const AVALANCHE_USDC: Address = address!("b97ef9ef8734c71904d8002f8b6bc66dd9c48a6e");

/// <https://testnet.snowtrace.io/token/0x5425890298aed601595a70AB815c96711a31Bc65>
pub const AVALANCHE_FUJI_USDC: Address = address!("5425890298aed601595a70ab815c96711a31bc65");

/// <https://optimistic.etherscan.io/token/0x0b2C639c533813f4Aa9D7837CAf62653d097Ff85>
pub const OPTIMISM_USDC: Address = address!("0b2c639c533813f4aa9d7837caf62653d097ff85");

/// <https://sepolia-optimism.etherscan.io/token/0x5fd84259d66Cd46123540766Be93DFE6D43130D7>
pub const OPTIMISM_SEPOLIA_USDC: Address = address!("5fd84259d66cd46123540766be93dfe6d43130d7");

/// <https://arbiscan.io/token/0xaf88d065e77c8cC2239327C5EDb3A432268e5831>
pub const ARBITRUM_USDC: Address = address!("af88d065e77c8cc2239327c5edb3a432268e5831");

/// <https://sepolia.arbiscan.io/token/0x75faf114eafb1BDbe2F0316DF893fd58CE46AA4d>
pub const ARBITRUM_SEPOLIA_USDC: Address = address!("75faf114eafb1bdbe2f0316df893fd58ce46aa4d");

/// <https://basescan.org/token/0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913>
pub const BASE_USDC: Address = address!("833589fcd6edb6e08f4c7c32d4f71b54bda02913");

/// <https://sepolia.basescan.org/token/0x036CbD53842c5426634e7929541eC2318f3dCF7e>
pub const BASE_SEPOLIA_USDC: Address = address!("036cbd53842c5426634e7929541ec2318f3dcf7e");

/// <https://polygonscan.com/token/0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359>
pub const POLYGON_USDC: Address = address!("3c499c542cef5e3811e1192ce70d8cc03d5c3359");

/// <https://amoy.polygonscan.com/token/0x41E94Eb019C0762f9Bfcf9Fb1E58725BfB0e7582>
pub const POLYGON_AMOY_USDC: Address = address!("41e94eb019c0762f9bfcf9fb1e58725bfb0e7582");
