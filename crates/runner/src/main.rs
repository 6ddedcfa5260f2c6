//! Orderdesk runner
//!
//! Wires the REST gateway into a `TradingDesk`, restores or links a
//! session, then tails the position book to stdout until Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};

use orderdesk_core::Credentials;
use orderdesk_engine::TradingDesk;
use orderdesk_gateway::{GatewayConfig, RestTradingService, SystemClock};

const SNAPSHOT_INTERVAL: Duration = Duration::from_secs(5);

fn print_help() {
    eprintln!(
        r#"orderdesk - brokerage order entry and position tracking

USAGE:
    orderdesk [OPTIONS]

OPTIONS:
    --help              Print this help message

ENVIRONMENT VARIABLES:
    ORDERDESK_BASE_URL      Trading service base URL
                            (default: http://localhost:8080/api/trading)
    ORDERDESK_CLIENT_ID     Broker client id (enables linking)
    ORDERDESK_ACCESS_TOKEN  Broker access token (enables linking)
    RUST_LOG                Log level filter
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::args().any(|arg| arg == "--help" || arg == "-h") {
        print_help();
        return Ok(());
    }

    let base_url = std::env::var("ORDERDESK_BASE_URL")
        .unwrap_or_else(|_| orderdesk_gateway::config::DEFAULT_BASE_URL.to_string());
    info!("Trading service: {}", base_url);

    let service = Arc::new(RestTradingService::new(
        GatewayConfig::new(base_url),
        Arc::new(SystemClock::new()),
    ));
    let mut desk = TradingDesk::new(service);

    // Pick up an existing session, otherwise link with env credentials
    if let Some(account) = desk.restore().await {
        info!("Restored session for account {}", account.client_id);
    } else {
        let client_id = std::env::var("ORDERDESK_CLIENT_ID").ok();
        let access_token = std::env::var("ORDERDESK_ACCESS_TOKEN").ok();
        match (client_id, access_token) {
            (Some(client_id), Some(access_token)) => {
                let credentials = Credentials::new(client_id, access_token);
                let account = desk.link(&credentials).await?;
                info!("Linked account {}", account.client_id);
            }
            _ => {
                eprintln!(
                    "No active session and no credentials; set \
                     ORDERDESK_CLIENT_ID and ORDERDESK_ACCESS_TOKEN"
                );
                std::process::exit(1);
            }
        }
    }

    let mut snapshot = tokio::time::interval(SNAPSHOT_INTERVAL);
    loop {
        tokio::select! {
            _ = snapshot.tick() => print_positions(&desk),
            result = tokio::signal::ctrl_c() => {
                if let Err(err) = result {
                    warn!("Ctrl-C handler failed: {err}");
                }
                break;
            }
        }
    }

    desk.unlink();
    info!("Shut down");
    Ok(())
}

fn print_positions(desk: &TradingDesk) {
    let positions = desk.positions();
    if positions.is_empty() {
        println!("-- no open positions --");
        return;
    }
    println!(
        "{:<16} {:>6} {:>6} {:>12} {:>12} {:>12}",
        "SYMBOL", "SIDE", "QTY", "AVG", "LTP", "P&L"
    );
    for p in &positions {
        println!(
            "{:<16} {:>6} {:>6} {:>12} {:>12} {:>12}",
            p.symbol,
            format!("{:?}", p.side),
            p.quantity,
            p.avg_price,
            p.ltp,
            p.pnl
        );
    }
}
