// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Environment-driven settings.
//!
//! | Variable | Meaning |
//! |---|---|
//! | `USDC_PRIVATE_KEY` | hex signing key, required to send, bridge or mint |
//! | `USDC_RPC_<CHAIN>` | RPC endpoint override, e.g. `USDC_RPC_BASE` |
//! | `USDC_ATTESTATION_API` | attestation service base URL |
//! | `USDC_POLL_INTERVAL_SECS` | attestation poll interval |
//! | `USDC_ATTESTATION_TIMEOUT_SECS` | overall attestation budget |
//!
//! A `.env` file in the working directory is loaded first when present.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use alloy_signer_local::PrivateKeySigner;
use url::Url;

use crate::bridge::PollingConfig;
use crate::chain::{ChainDescriptor, Network, SupportedChain};
use crate::error::{BridgeError, Result, Step};

pub const PRIVATE_KEY_VAR: &str = "USDC_PRIVATE_KEY";
pub const ATTESTATION_API_VAR: &str = "USDC_ATTESTATION_API";
pub const POLL_INTERVAL_VAR: &str = "USDC_POLL_INTERVAL_SECS";
pub const ATTESTATION_TIMEOUT_VAR: &str = "USDC_ATTESTATION_TIMEOUT_SECS";

#[derive(Clone, Default)]
pub struct Settings {
    private_key: Option<String>,
    rpc_overrides: HashMap<SupportedChain, String>,
    attestation_api: Option<String>,
    poll_interval: Option<Duration>,
    attestation_timeout: Option<Duration>,
}

impl Settings {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let rpc_overrides = SupportedChain::ALL
            .iter()
            .filter_map(|chain| get(&chain.rpc_env_var()).map(|url| (*chain, url)))
            .collect();

        Ok(Self {
            private_key: get(PRIVATE_KEY_VAR),
            rpc_overrides,
            attestation_api: get(ATTESTATION_API_VAR),
            poll_interval: get(POLL_INTERVAL_VAR)
                .map(|v| parse_secs(POLL_INTERVAL_VAR, &v))
                .transpose()?,
            attestation_timeout: get(ATTESTATION_TIMEOUT_VAR)
                .map(|v| parse_secs(ATTESTATION_TIMEOUT_VAR, &v))
                .transpose()?,
        })
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    pub fn signer(&self) -> Result<PrivateKeySigner> {
        let key = self.private_key.as_deref().ok_or_else(|| {
            BridgeError::InvalidConfig(format!("{PRIVATE_KEY_VAR} is not set"))
        })?;
        key.parse::<PrivateKeySigner>()
            .map_err(|_| {
                BridgeError::InvalidConfig(format!("{PRIVATE_KEY_VAR} is not a valid private key"))
            })
    }

    pub fn rpc_override(&self, chain: SupportedChain) -> Result<Option<Url>> {
        self.rpc_overrides
            .get(&chain)
            .map(|url| {
                Url::parse(url).map_err(|e| {
                    BridgeError::InvalidConfig(format!("{}: {e}", chain.rpc_env_var()))
                })
            })
            .transpose()
    }

    /// The chain's descriptor with any RPC override applied.
    pub fn chain(&self, chain: SupportedChain, network: Network) -> Result<ChainDescriptor> {
        let rpc_override = self.rpc_override(chain)?;
        ChainDescriptor::resolve(chain, network, rpc_override)
            .map_err(|e| e.at_step(Step::Configure))
    }

    /// Override, or Circle's service for `network`.
    pub fn attestation_api(&self, network: Network) -> String {
        self.attestation_api
            .clone()
            .unwrap_or_else(|| network.attestation_api_url().to_string())
    }

    /// Source-chain defaults with any environment overrides applied.
    pub fn polling_config(&self, source: &ChainDescriptor) -> PollingConfig {
        let mut config = PollingConfig::for_chain(source);
        if let Some(interval) = self.poll_interval {
            config = config.with_poll_interval(interval);
        }
        if let Some(timeout) = self.attestation_timeout {
            config = config.with_timeout(timeout);
        }
        config
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "<redacted>"),
            )
            .field("rpc_overrides", &self.rpc_overrides)
            .field("attestation_api", &self.attestation_api)
            .field("poll_interval", &self.poll_interval)
            .field("attestation_timeout", &self.attestation_timeout)
            .finish()
    }
}

fn parse_secs(var: &str, value: &str) -> Result<Duration> {
    value
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| {
            BridgeError::InvalidConfig(format!(
                "{var} must be a whole number of seconds, got {value:?}"
            ))
        })
}
