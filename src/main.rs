//! SOLARMINE — Solar + grid Bitcoin mining economics calculator
//!
//! Entry point. Loads configuration, initialises structured logging,
//! then either serves the interactive dashboard or runs a single
//! calculation from the command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use solarmine::catalog::MinerCatalog;
use solarmine::config::AppConfig;
use solarmine::dashboard::{self, DashboardState};
use solarmine::engine;
use solarmine::types::{MinerModel, SiteInputs};

#[derive(Parser)]
#[command(name = "solarmine")]
#[command(about = "Daily economics of solar + grid powered Bitcoin mining")]
struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the interactive dashboard
    Serve {
        /// Bind address (overrides [server] host)
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides [server] port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one calculation and print the result
    Calc {
        /// Miner model, e.g. "Antminer S21" or "whatsminer-m60s"
        #[arg(short, long)]
        model: Option<MinerModel>,

        /// Number of miners
        #[arg(short, long)]
        qty: Option<u32>,

        /// Grid electricity price in $/kWh
        #[arg(long)]
        grid_cost: Option<f64>,

        /// Network hashprice in $/TH/day
        #[arg(long)]
        hashprice: Option<f64>,

        /// Solar system size in kW
        #[arg(long)]
        solar_kw: Option<f64>,

        /// Bitcoin price in USD
        #[arg(long)]
        btc_price: Option<f64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List supported miner models
    Miners,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    let loaded = AppConfig::load_optional(&cli.config)?;
    let cfg = loaded.clone().unwrap_or_default();

    init_logging(&cfg);

    if loaded.is_none() {
        info!(path = %cli.config, "No config file found, using defaults");
    }

    let catalog = MinerCatalog::standard();

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| cfg.server.host.clone());
            let port = port.unwrap_or(cfg.server.port);
            let addr: SocketAddr = format!("{host}:{port}")
                .parse()
                .with_context(|| format!("Invalid bind address: {host}:{port}"))?;

            info!(
                model = %cfg.defaults.miner_model,
                qty = cfg.defaults.miner_qty,
                grid_cost = cfg.defaults.grid_cost_per_kwh,
                hashprice = cfg.defaults.hashprice_per_th_per_day,
                "SOLARMINE starting up"
            );

            let state = Arc::new(DashboardState::new(catalog, cfg.defaults.clone()));
            dashboard::serve(state, addr).await?;
        }

        Commands::Calc {
            model,
            qty,
            grid_cost,
            hashprice,
            solar_kw,
            btc_price,
            json,
        } => {
            let d = &cfg.defaults;
            let inputs = SiteInputs {
                solar_size_kw: solar_kw.unwrap_or(d.solar_size_kw),
                miner_model: model.unwrap_or(d.miner_model),
                miner_qty: qty.unwrap_or(d.miner_qty),
                grid_cost_per_kwh: grid_cost.unwrap_or(d.grid_cost_per_kwh),
                btc_price_usd: btc_price.unwrap_or(d.btc_price_usd),
                hashprice_per_th_per_day: hashprice.unwrap_or(d.hashprice_per_th_per_day),
            };

            let report = engine::evaluate(&catalog, &inputs)?;
            if json {
                let out = serde_json::to_string_pretty(&report)
                    .context("Failed to serialise report")?;
                println!("{out}");
            } else {
                println!("{report}");
            }
        }

        Commands::Miners => {
            println!("{:<20} {:>12} {:>10} {:>10}", "Model", "Hashrate", "Power", "J/TH");
            println!("{}", "-".repeat(55));
            for e in catalog.entries() {
                println!(
                    "{:<20} {:>7.0} TH/s {:>8.0} W {:>10.2}",
                    e.model.name(),
                    e.hashrate_th_per_s,
                    e.power_watts,
                    e.efficiency_j_per_th
                );
            }
        }
    }

    Ok(())
}

/// Initialise the `tracing` subscriber. Logs go to stderr so `calc --json`
/// output stays machine-readable.
fn init_logging(cfg: &AppConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("solarmine=info"));

    let json_logging = cfg.logging.json || std::env::var("SOLARMINE_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
