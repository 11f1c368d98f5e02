// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::process::ExitCode;

use alloy_primitives::{Address, FixedBytes, TxHash};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use usdc_cctp::{BridgeError, Network, SupportedChain, UsdcAmount};

mod commands;

#[derive(Parser)]
#[command(name = "usdc", version, about = "USDC balances, transfers and CCTP bridging")]
struct Cli {
    /// Use mainnet chains and Circle's production attestation service
    #[arg(long, global = true)]
    mainnet: bool,

    /// Print the result as JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Skip the mainnet confirmation prompt
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the USDC balance of an address
    Balance {
        #[arg(long)]
        chain: SupportedChain,
        /// Defaults to the address of USDC_PRIVATE_KEY
        #[arg(long)]
        address: Option<Address>,
    },
    /// Transfer USDC to another address on the same chain
    Send {
        #[arg(long)]
        chain: SupportedChain,
        #[arg(long)]
        to: String,
        /// Decimal USDC, e.g. 10.5
        #[arg(long)]
        amount: UsdcAmount,
    },
    /// Burn on one chain, wait for the attestation and mint on another
    Bridge {
        #[arg(long)]
        from: SupportedChain,
        #[arg(long)]
        to: SupportedChain,
        /// Defaults to the sender's own address
        #[arg(long)]
        recipient: Option<String>,
        /// Decimal USDC, e.g. 10.5
        #[arg(long)]
        amount: UsdcAmount,
    },
    /// Look up the attestation of a burn
    Status {
        /// Chain the burn happened on
        #[arg(long)]
        chain: SupportedChain,
        /// Burn transaction hash
        #[arg(long, conflicts_with = "message_hash", required_unless_present = "message_hash")]
        tx: Option<TxHash>,
        #[arg(long)]
        message_hash: Option<FixedBytes<32>>,
        /// Poll until the attestation is complete or the timeout is reached
        #[arg(long)]
        wait: bool,
    },
    /// Finish a transfer whose burn already confirmed
    Mint {
        #[arg(long)]
        from: SupportedChain,
        #[arg(long)]
        to: SupportedChain,
        /// Burn transaction hash on the source chain
        #[arg(long)]
        tx: TxHash,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let network = if cli.mainnet {
        Network::Mainnet
    } else {
        Network::Testnet
    };
    let ctx = commands::Context {
        network,
        json: cli.json,
        assume_yes: cli.yes,
    };

    let route = match cli.command {
        Commands::Bridge { from, to, .. } | Commands::Mint { from, to, .. } => Some((from, to)),
        _ => None,
    };

    let result = match cli.command {
        Commands::Balance { chain, address } => commands::balance(&ctx, chain, address).await,
        Commands::Send { chain, to, amount } => commands::send(&ctx, chain, &to, amount).await,
        Commands::Bridge {
            from,
            to,
            recipient,
            amount,
        } => commands::bridge(&ctx, from, to, recipient, amount).await,
        Commands::Status {
            chain,
            tx,
            message_hash,
            wait,
        } => commands::status(&ctx, chain, tx, message_hash, wait).await,
        Commands::Mint { from, to, tx } => commands::mint(&ctx, from, to, tx).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&e, network, route);
            ExitCode::FAILURE
        }
    }
}

/// Source and destination chain of a cross-chain command.
type Route = (SupportedChain, SupportedChain);

fn report_failure(err: &anyhow::Error, network: Network, route: Option<Route>) {
    eprintln!("error: {err:#}");

    let Some(bridge_err) = err.chain().find_map(|e| e.downcast_ref::<BridgeError>()) else {
        return;
    };
    if let Some(step) = bridge_err.step() {
        eprintln!("failed step: {step}");
    }
    if let Some(hint) = resume_hint(bridge_err, network, route) {
        eprintln!("{hint}");
    }
}

/// What to tell the user about funds already burned, if any were.
///
/// A burn without a message hash that failed in the burn step was broadcast
/// but never confirmed, so it may still revert or be dropped.
fn resume_hint(err: &BridgeError, network: Network, route: Option<Route>) -> Option<String> {
    let (burn_tx_hash, message_hash) = err.resume_point()?;
    let flag = match network {
        Network::Mainnet => " --mainnet",
        Network::Testnet => "",
    };

    let unconfirmed =
        message_hash.is_none() && matches!(err.root(), BridgeError::BurnFailed { .. });
    let headline = if unconfirmed {
        "the burn was broadcast but not confirmed"
    } else {
        "the burn is confirmed; the funds are not lost"
    };
    let mut lines = vec![headline.to_string(), format!("  burn tx:      {burn_tx_hash}")];
    if let Some(hash) = message_hash {
        lines.push(format!("  message hash: {hash}"));
    }

    match (route, unconfirmed) {
        (Some((from, _)), true) => lines.push(format!(
            "check it with: usdc status --chain {from} --tx {burn_tx_hash}{flag}"
        )),
        (Some((from, to)), false) => lines.push(format!(
            "finish with: usdc mint --from {from} --to {to} --tx {burn_tx_hash}{flag}"
        )),
        (None, _) => {}
    }
    Some(lines.join("\n"))
}
