//! Command line front end for the quote client.
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use cryptoquote::prelude::*;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cryptoquote")]
#[command(about = "CoinGecko prices, charts and lookup history", long_about = None)]
struct Cli {
    /// Search history database (overrides CRYPTOQUOTE_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current price in USD and BRL (recorded in history)
    Price {
        /// CoinGecko asset id (e.g., bitcoin)
        #[arg(default_value = "bitcoin")]
        asset: String,
    },
    /// Daily USD market chart
    Chart {
        #[arg(default_value = "bitcoin")]
        asset: String,

        /// Days of history to fetch
        #[arg(short, long, default_value_t = DEFAULT_SERIES_DAYS)]
        days: u32,
    },
    /// USD OHLC candles
    Ohlc {
        #[arg(default_value = "bitcoin")]
        asset: String,

        /// Days of history to fetch
        #[arg(short, long, default_value_t = DEFAULT_SERIES_DAYS)]
        days: u32,
    },
    /// Most recent lookups
    History,
    /// Keep refreshing popular assets until interrupted
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let mut config = QuoteConfig::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    let client = QuoteClient::builder().config(config).build().await?;

    match cli.command {
        Commands::Price { asset } => {
            let Some(q) = client.get_current_price(&asset).await else {
                bail!("price for {} is unavailable", asset);
            };
            println!("{:<12} {:>16} {:>16} {:>10}", "Asset", "USD", "BRL", "24h%");
            println!("{}", "-".repeat(58));
            println!(
                "{:<12} {:>16.2} {:>16.2} {:>10}",
                q.asset_id,
                q.usd,
                q.brl,
                q.usd_24h_change.map(|c| format!("{:+.2}", c)).unwrap_or_else(|| "-".into()),
            );
            if let Some(cap) = q.usd_market_cap {
                println!("Market cap (USD): {:.0}", cap);
            }
            if let Some(vol) = q.usd_24h_volume {
                println!("24h volume (USD): {:.0}", vol);
            }
        }
        Commands::Chart { asset, days } => {
            let Some(series) = client.get_market_series(&asset, days).await else {
                bail!("market chart for {} is unavailable", asset);
            };
            println!("{:<22} {:>16} {:>20} {:>18}", "Date", "Price", "Market cap", "Volume");
            for (i, p) in series.prices.iter().enumerate() {
                let cap = series.market_caps.get(i).map(|c| format!("{:.0}", c.value));
                let vol = series.volumes.get(i).map(|v| format!("{:.0}", v.value));
                println!(
                    "{:<22} {:>16.2} {:>20} {:>18}",
                    format_time(p.time),
                    p.value,
                    cap.unwrap_or_else(|| "-".into()),
                    vol.unwrap_or_else(|| "-".into()),
                );
            }
        }
        Commands::Ohlc { asset, days } => {
            let Some(candles) = client.get_ohlc_series(&asset, days).await else {
                bail!("OHLC series for {} is unavailable", asset);
            };
            println!("{:<22} {:>12} {:>12} {:>12} {:>12}", "Date", "Open", "High", "Low", "Close");
            for c in &candles {
                println!(
                    "{:<22} {:>12.2} {:>12.2} {:>12.2} {:>12.2}",
                    format_time(c.time),
                    c.open,
                    c.high,
                    c.low,
                    c.close
                );
            }
        }
        Commands::History => {
            let records = client.recent_history().await;
            if records.is_empty() {
                println!("No lookups recorded yet.");
                return Ok(());
            }
            println!("{:<5} {:<14} {:<22} {:>14} {:>14} {:>8}", "Id", "Asset", "When (UTC)", "USD", "BRL", "24h%");
            for r in &records {
                println!(
                    "{:<5} {:<14} {:<22} {:>14} {:>14} {:>8}",
                    r.id,
                    r.asset_id,
                    r.observed_at.format("%Y-%m-%d %H:%M:%S"),
                    r.price_usd.map(|x| format!("{:.2}", x)).unwrap_or_else(|| "-".into()),
                    r.price_brl.map(|x| format!("{:.2}", x)).unwrap_or_else(|| "-".into()),
                    r.change_24h.map(|x| format!("{:+.2}", x)).unwrap_or_else(|| "-".into()),
                );
            }
        }
        Commands::Watch => {
            let (mut scheduler, mut rx) = Scheduler::start(&client);
            loop {
                tokio::select! {
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let snapshot = rx.borrow_and_update().clone();
                        print_snapshot(&snapshot);
                    }
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
            scheduler.shutdown();
        }
    }

    Ok(())
}

fn format_time(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}

fn print_snapshot(snapshot: &PopularSnapshot) {
    let when = snapshot
        .refreshed_at
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".into());
    println!("── {} ──", when);
    for q in &snapshot.quotes {
        println!(
            "{:<12} {:>14.2} USD {:>14.2} BRL {:>8}",
            q.asset_id,
            q.usd,
            q.brl,
            q.usd_24h_change.map(|c| format!("{:+.2}%", c)).unwrap_or_else(|| "-".into()),
        );
    }
}
