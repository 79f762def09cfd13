//! # tb-cli
//!
//! Command-line client for placing orders on Binance USDT-M Futures Testnet.
//!
//! Credentials come from the environment (`BINANCE_API_KEY`,
//! `BINANCE_API_SECRET`); the base URL can be overridden with
//! `BINANCE_BASE_URL`.
//!
//! # Usage
//!
//! ```bash
//! # Market BUY 0.001 BTC
//! tb-cli --symbol BTCUSDT --side BUY --type MARKET --quantity 0.001
//!
//! # Limit SELL 0.001 BTC @ 90000 USDT
//! tb-cli --symbol BTCUSDT --side SELL --type LIMIT --quantity 0.001 --price 90000
//!
//! # Stop-Market BUY trigger @ 85000
//! tb-cli --symbol BTCUSDT --side BUY --type STOP_MARKET --quantity 0.001 --stop-price 85000
//!
//! # Stop-Limit SELL trigger @ 85000, limit @ 84900
//! tb-cli --symbol BTCUSDT --side SELL --type STOP --quantity 0.001 --stop-price 85000 --price 84900
//! ```
//!
//! Exits 0 on successful placement or dry-run, non-zero on any validation
//! or execution failure. Secrets and signatures are never printed.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use tb_core::config::{ClientConfig, Credentials};
use tb_core::types::order::OrderIntent;
use tb_core::validate::validate_intent;
use tb_exec::order::build_order_params;
use tb_exec::{HttpTransport, OrderExecutor, Signer};

/// Place orders on Binance Futures Testnet (USDT-M).
#[derive(Parser)]
#[command(name = "tb-cli", about = "Place orders on Binance Futures Testnet (USDT-M)")]
struct Cli {
    /// Trading pair, e.g. BTCUSDT.
    #[arg(long, value_name = "SYMBOL")]
    symbol: String,

    /// Order side: BUY or SELL.
    #[arg(long)]
    side: String,

    /// Order type: MARKET, LIMIT, STOP_MARKET, or STOP.
    #[arg(long = "type")]
    order_type: String,

    /// Order quantity (base asset).
    #[arg(long, value_name = "QTY")]
    quantity: String,

    /// Limit price (required for LIMIT and STOP orders).
    #[arg(long)]
    price: Option<String>,

    /// Stop trigger price (required for STOP_MARKET / STOP orders).
    #[arg(long)]
    stop_price: Option<String>,

    /// Time-in-force: GTC, IOC, or FOK (default: GTC).
    #[arg(long)]
    tif: Option<String>,

    /// Validate inputs and print the request WITHOUT placing the order.
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Optional log directory for file output.
    #[arg(long)]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tb_core::logging::init_logging(&cli.log_level, cli.log_dir.as_deref());

    // 1. Validate all inputs — failure here never touches the network.
    let intent = match validate_intent(
        &cli.symbol,
        &cli.side,
        &cli.order_type,
        &cli.quantity,
        cli.price.as_deref(),
        cli.stop_price.as_deref(),
        cli.tif.as_deref(),
    ) {
        Ok(intent) => intent,
        Err(e) => {
            error!("input validation failed: {e}");
            anyhow::bail!("validation error: {e}");
        }
    };

    print_request_summary(&intent);

    // 2. Dry-run: show the would-be parameter set and stop.
    if cli.dry_run {
        let params = build_order_params(&intent);
        println!("\ndry-run — order NOT placed. Request parameters:");
        for (key, value) in &params {
            println!("  {key} = {value}");
        }
        info!("dry-run complete for {} {}", intent.side, intent.symbol);
        return Ok(());
    }

    // 3. Credentials and client setup.
    let credentials = Credentials::from_env()?;
    let config = ClientConfig::from_env();
    info!("using endpoint {}", config.base_url);

    let signer = Signer::new(credentials, config.recv_window)?;
    let transport = HttpTransport::new(&config, signer.api_key().to_string())?;
    let executor = OrderExecutor::new(signer, transport);

    // 4. Place the order.
    let result = executor.place(&intent).await?;

    println!("\norder placed successfully\n");
    println!("{}", result.summary());
    Ok(())
}

/// Print the validated request before any network activity.
fn print_request_summary(intent: &OrderIntent) {
    println!("order request:");
    println!("  Symbol      : {}", intent.symbol);
    println!("  Side        : {}", intent.side);
    println!("  Type        : {}", intent.order_type);
    println!("  Quantity    : {}", intent.quantity);
    println!(
        "  Price       : {}",
        intent
            .price
            .map(|p| p.to_string())
            .unwrap_or_else(|| "N/A".into())
    );
    println!(
        "  Stop Price  : {}",
        intent
            .stop_price
            .map(|p| p.to_string())
            .unwrap_or_else(|| "N/A".into())
    );
    println!("  TIF         : {}", intent.time_in_force);
}
