// CLI tool for the Curvepad launch platform.
//
// This binary drives the launch and fee-settlement flows from the command
// line, signing with a local keypair file.

use std::fs;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use solana_sdk::pubkey::Pubkey;
use tracing_subscriber::EnvFilter;

use curvepad_sdk::client::BroadcastOutcome;
use curvepad_sdk::core::amount::{format_sol, parse_sol};
use curvepad_sdk::core::types::{ClaimRole, LaunchRequest, SocialLinks};
use curvepad_sdk::pipeline::{DevBuyResult, LaunchOutcome, LocalWallet};
use curvepad_sdk::{CurvepadClient, SdkConfig, SdkError};

#[derive(Parser)]
#[command(name = "curvepad")]
#[command(about = "Curvepad launch platform CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Platform API base URL
    #[arg(long, default_value = "http://localhost:3000/api")]
    api_url: String,

    /// RPC URL used for confirmation polling
    #[arg(long, default_value = "http://localhost:8899")]
    rpc_url: String,

    /// Path to wallet keypair file
    #[arg(long, default_value = "~/.config/solana/id.json")]
    wallet: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch a new token on a bonding-curve pool
    Launch {
        /// Token name
        #[arg(long)]
        name: String,

        /// Token symbol
        #[arg(long)]
        symbol: String,

        /// Path to the token image (png, jpeg, gif or webp)
        #[arg(long)]
        image: String,

        /// Token description
        #[arg(long)]
        description: Option<String>,

        /// Project website URL
        #[arg(long)]
        website: Option<String>,

        /// Twitter handle or URL
        #[arg(long)]
        twitter: Option<String>,

        /// Telegram group URL
        #[arg(long)]
        telegram: Option<String>,

        /// Same-session dev buy, in SOL (e.g. "0.5")
        #[arg(long)]
        dev_buy: Option<String>,
    },

    /// Quote a swap against a launched pool
    Quote {
        /// Base mint of the pool
        mint: String,

        /// Amount in SOL
        amount: String,

        /// Quote a sell instead of a buy
        #[arg(long)]
        sell: bool,
    },

    /// Execute a swap against a launched pool
    Swap {
        /// Base mint of the pool
        mint: String,

        /// Amount in SOL
        amount: String,

        /// Sell into the pool instead of buying
        #[arg(long)]
        sell: bool,
    },

    /// Show live fee counters for a pool
    Fees {
        /// Base mint of the pool
        mint: String,
    },

    /// Claim the creator share of accrued pool fees
    ClaimCreator {
        /// Base mint of the pool
        mint: String,
    },

    /// Claim the partner share of accrued pool fees
    ClaimPartner {
        /// Base mint of the pool
        mint: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = SdkConfig::localnet()
        .with_api_url(&cli.api_url)
        .with_rpc_url(&cli.rpc_url);
    let client = CurvepadClient::new(config);
    let wallet = LocalWallet::from_file(shellexpand(&cli.wallet))
        .with_context(|| format!("loading wallet from {}", cli.wallet))?;

    match cli.command {
        Commands::Launch {
            name,
            symbol,
            image,
            description,
            website,
            twitter,
            telegram,
            dev_buy,
        } => {
            let image_bytes =
                fs::read(&image).with_context(|| format!("reading image {image}"))?;
            let mut req = LaunchRequest::new(name, symbol, image_bytes);
            req.description = description;
            req.socials = SocialLinks {
                website,
                twitter,
                telegram,
            };
            req.dev_buy_lamports = dev_buy
                .as_deref()
                .map(parse_sol)
                .transpose()
                .context("parsing dev buy amount")?;

            match client.launch(&req, &wallet) {
                LaunchOutcome::Confirmed {
                    token,
                    signature,
                    dev_buy,
                } => {
                    println!("launched {} ({})", token.symbol, token.mint);
                    println!("signature: {signature}");
                    print_dev_buy(dev_buy);
                }
                LaunchOutcome::ConfirmedUnindexed {
                    mint,
                    signature,
                    warning,
                    dev_buy,
                } => {
                    println!("launched {mint} (registry warning: {warning})");
                    println!("signature: {signature}");
                    print_dev_buy(dev_buy);
                }
                LaunchOutcome::Unknown { mint, signature } => {
                    println!("launch outcome unknown for {mint}");
                    println!("check signature {signature} on an explorer before retrying");
                }
                LaunchOutcome::Failed { reached, reason } => {
                    anyhow::bail!(
                        "launch failed at {}: {:?}",
                        reached.as_str(),
                        reason
                    );
                }
            }
        }

        Commands::Quote { mint, amount, sell } => {
            let mint = Pubkey::from_str(&mint).context("parsing mint")?;
            let lamports = parse_sol(&amount).context("parsing amount")?;
            let estimated = client.swap.quote(&mint, lamports, !sell)?;
            println!("estimated output: {estimated}");
        }

        Commands::Swap { mint, amount, sell } => {
            let mint = Pubkey::from_str(&mint).context("parsing mint")?;
            let lamports = parse_sol(&amount).context("parsing amount")?;
            match client.swap.execute(&mint, lamports, &wallet, !sell)? {
                BroadcastOutcome::Confirmed { signature } => {
                    println!("swap confirmed: {signature}");
                }
                BroadcastOutcome::Unknown { signature } => {
                    return Err(SdkError::ConfirmationTimeout(signature.to_string()).into());
                }
            }
        }

        Commands::Fees { mint } => {
            let mint = Pubkey::from_str(&mint).context("parsing mint")?;
            let metrics = client.fees.fee_metrics(&mint)?;
            println!("creator base:  {}", metrics.creator_base);
            println!("creator quote: {} ({} SOL)", metrics.creator_quote, sol_or_dash(metrics.creator_quote));
            println!("partner base:  {}", metrics.partner_base);
            println!("partner quote: {} ({} SOL)", metrics.partner_quote, sol_or_dash(metrics.partner_quote));
        }

        Commands::ClaimCreator { mint } => {
            let mint = Pubkey::from_str(&mint).context("parsing mint")?;
            let outcome = client.claim(&mint, &wallet, ClaimRole::Creator)?;
            print_claim(outcome)?;
        }

        Commands::ClaimPartner { mint } => {
            let mint = Pubkey::from_str(&mint).context("parsing mint")?;
            let outcome = client.claim(&mint, &wallet, ClaimRole::Partner)?;
            print_claim(outcome)?;
        }
    }

    Ok(())
}

fn print_claim(outcome: BroadcastOutcome) -> Result<()> {
    match outcome {
        BroadcastOutcome::Confirmed { signature } => {
            println!("claim confirmed: {signature}");
            Ok(())
        }
        BroadcastOutcome::Unknown { signature } => {
            Err(SdkError::ConfirmationTimeout(signature.to_string()).into())
        }
    }
}

fn print_dev_buy(dev_buy: Option<DevBuyResult>) {
    match dev_buy {
        Some(DevBuyResult::Executed { signature }) => {
            println!("dev buy confirmed: {signature}");
        }
        Some(DevBuyResult::Unconfirmed { signature }) => {
            println!("dev buy outcome unknown: {signature}");
        }
        Some(DevBuyResult::Failed { message }) => {
            println!("dev buy failed (launch unaffected): {message}");
        }
        None => {}
    }
}

/// Quote counters are raw lamports; only display as SOL when they fit in u64.
fn sol_or_dash(raw: u128) -> String {
    u64::try_from(raw)
        .map(format_sol)
        .unwrap_or_else(|_| "-".to_string())
}

fn shellexpand(path: &str) -> String {
    match (path.strip_prefix("~/"), std::env::var("HOME")) {
        (Some(rest), Ok(home)) => format!("{home}/{rest}"),
        _ => path.to_string(),
    }
}
