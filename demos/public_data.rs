//! Example: Fetching public market data from Bitfinex.
//!
//! This example demonstrates public endpoints on both API generations,
//! without authentication.
//!
//! Run with: cargo run --example public_data

use bitfinex_api_client::rest::{RestClient, endpoints};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // v2 platform status: [1] means operative, [0] maintenance
    let v2 = RestClient::v2();
    println!("=== Platform Status ===");
    let status = v2.call_public(endpoints::v2::PLATFORM_STATUS).await?;
    println!("{status}");

    // v2 ticker for one symbol
    println!("\n=== BTC/USD Ticker (v2) ===");
    let ticker = v2.call_public("ticker/tBTCUSD").await?;
    println!("{ticker}");

    // v2 tickers for several symbols via query parameters
    println!("\n=== Tickers (v2) ===");
    let tickers = v2
        .call_public_with_params(endpoints::v2::TICKERS, &[("symbols", "tBTCUSD,tETHUSD")])
        .await?;
    println!("{tickers}");

    // The legacy v1 API is still live for a few endpoints
    let v1 = RestClient::v1();
    println!("\n=== BTC/USD Ticker (v1) ===");
    let ticker = v1.call_public("pubticker/btcusd").await?;
    println!("{ticker}");

    Ok(())
}
