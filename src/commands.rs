// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! One function per subcommand. Each resolves its chains and providers from
//! the environment, runs one library operation and prints the report.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use alloy_primitives::{Address, FixedBytes, TxHash};
use anyhow::{bail, Context as _, Result};
use serde::Serialize;
use tracing::info;
use usdc_cctp::providers::{http_provider, signing_provider, IrisAttestationProvider, TokioClock};
use usdc_cctp::{
    CctpBridge, ChainDescriptor, Network, ProviderConfig, Settings, StatusChecker, StatusQuery,
    SupportedChain, TransferRequest, UsdcAmount, UsdcClient,
};

pub struct Context {
    pub network: Network,
    pub json: bool,
    pub assume_yes: bool,
}

impl Context {
    fn settings(&self) -> Result<Settings> {
        Settings::from_env().context("failed to read settings from the environment")
    }

    fn emit<T: Serialize + Display>(&self, report: &T) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(report)?);
        } else {
            println!("{report}");
        }
        Ok(())
    }

    /// Mainnet moves real funds, so it needs an explicit "yes".
    fn confirm(&self, action: &str) -> Result<()> {
        if self.network != Network::Mainnet || self.assume_yes {
            return Ok(());
        }

        eprint!("About to {action} on MAINNET. Type 'yes' to continue: ");
        io::stderr().flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if answer.trim() != "yes" {
            bail!("aborted");
        }
        Ok(())
    }

    fn attestation_provider(&self, settings: &Settings) -> Result<IrisAttestationProvider> {
        let base_url = settings.attestation_api(self.network);
        info!(base_url = %base_url, event = "attestation_api_selected");
        Ok(IrisAttestationProvider::with_config(
            base_url,
            &ProviderConfig::default(),
        )?)
    }
}

fn route(
    settings: &Settings,
    network: Network,
    from: SupportedChain,
    to: SupportedChain,
) -> Result<(ChainDescriptor, ChainDescriptor)> {
    if from == to {
        bail!("source and destination chains must differ");
    }
    Ok((settings.chain(from, network)?, settings.chain(to, network)?))
}

pub async fn balance(ctx: &Context, chain: SupportedChain, address: Option<Address>) -> Result<()> {
    let settings = ctx.settings()?;
    let owner = match address {
        Some(address) => address,
        None if settings.has_private_key() => settings.signer()?.address(),
        None => bail!("pass --address or set USDC_PRIVATE_KEY"),
    };
    let descriptor = settings.chain(chain, ctx.network)?;

    let client = UsdcClient::builder()
        .provider(http_provider(descriptor.rpc_url.clone()))
        .clock(TokioClock)
        .chain(descriptor)
        .build();

    let report = client.balance(owner).await?;
    ctx.emit(&report)
}

pub async fn send(
    ctx: &Context,
    chain: SupportedChain,
    to: &str,
    amount: UsdcAmount,
) -> Result<()> {
    let settings = ctx.settings()?;
    let signer = settings.signer()?;
    let descriptor = settings.chain(chain, ctx.network)?;
    ctx.confirm(&format!("send {amount} to {to} on {chain}"))?;

    let from = signer.address();
    let client = UsdcClient::builder()
        .provider(signing_provider(
            descriptor.rpc_url.clone(),
            signer,
            ProviderConfig::default(),
        ))
        .clock(TokioClock)
        .chain(descriptor)
        .build();

    let report = client.send(from, to, amount).await?;
    ctx.emit(&report)
}

pub async fn bridge(
    ctx: &Context,
    from: SupportedChain,
    to: SupportedChain,
    recipient: Option<String>,
    amount: UsdcAmount,
) -> Result<()> {
    let settings = ctx.settings()?;
    let signer = settings.signer()?;
    let (source, destination) = route(&settings, ctx.network, from, to)?;

    let sender = signer.address();
    let recipient = recipient.unwrap_or_else(|| sender.to_string());
    ctx.confirm(&format!("bridge {amount} from {from} to {to} for {recipient}"))?;

    let bridge = CctpBridge::builder()
        .source_provider(signing_provider(
            source.rpc_url.clone(),
            signer.clone(),
            ProviderConfig::default(),
        ))
        .destination_provider(signing_provider(
            destination.rpc_url.clone(),
            signer,
            ProviderConfig::default(),
        ))
        .attestation_provider(ctx.attestation_provider(&settings)?)
        .clock(TokioClock)
        .polling(settings.polling_config(&source))
        .source(source)
        .destination(destination)
        .build();

    let request = TransferRequest::builder()
        .sender(sender)
        .recipient(recipient)
        .amount(amount)
        .build();

    let report = bridge.transfer(&request).await?;
    ctx.emit(&report)
}

pub async fn status(
    ctx: &Context,
    chain: SupportedChain,
    tx: Option<TxHash>,
    message_hash: Option<FixedBytes<32>>,
    wait: bool,
) -> Result<()> {
    let query = match (tx, message_hash) {
        (Some(tx), _) => StatusQuery::BurnTransaction(tx),
        (None, Some(hash)) => StatusQuery::MessageHash(hash),
        (None, None) => bail!("pass --tx or --message-hash"),
    };

    let settings = ctx.settings()?;
    let source = settings.chain(chain, ctx.network)?;

    let checker = StatusChecker::builder()
        .provider(http_provider(source.rpc_url.clone()))
        .attestation_provider(ctx.attestation_provider(&settings)?)
        .clock(TokioClock)
        .polling(settings.polling_config(&source))
        .source(source)
        .build();

    let report = if wait {
        checker.wait(query).await?
    } else {
        checker.check(query).await?
    };
    ctx.emit(&report)
}

pub async fn mint(
    ctx: &Context,
    from: SupportedChain,
    to: SupportedChain,
    burn_tx_hash: TxHash,
) -> Result<()> {
    let settings = ctx.settings()?;
    let signer = settings.signer()?;
    let (source, destination) = route(&settings, ctx.network, from, to)?;
    ctx.confirm(&format!("mint the burn {burn_tx_hash} from {from} on {to}"))?;

    let sender = signer.address();
    let bridge = CctpBridge::builder()
        .source_provider(http_provider(source.rpc_url.clone()))
        .destination_provider(signing_provider(
            destination.rpc_url.clone(),
            signer,
            ProviderConfig::default(),
        ))
        .attestation_provider(ctx.attestation_provider(&settings)?)
        .clock(TokioClock)
        .polling(settings.polling_config(&source))
        .source(source)
        .destination(destination)
        .build();

    let report = bridge.resume(sender, burn_tx_hash).await?;
    ctx.emit(&report)
}
