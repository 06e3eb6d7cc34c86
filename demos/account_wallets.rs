//! Example: v2 authenticated endpoints.
//!
//! Run with: cargo run --example account_wallets

use std::sync::Arc;

use bitfinex_api_client::auth::EnvCredentials;
use bitfinex_api_client::rest::{ApiVersion, RestClient, endpoints};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let credentials = match EnvCredentials::try_from_env() {
        Some(creds) => Arc::new(creds),
        None => {
            println!("Set BITFINEX_API_KEY and BITFINEX_API_SECRET to run this example.");
            return Ok(());
        }
    };

    let client = RestClient::builder(ApiVersion::V2)
        .credentials(credentials)
        .user_agent("bitfinex-api-client-examples/account_wallets")
        .build();

    println!("=== Wallets ===");
    let wallets = client
        .call_auth(endpoints::v2::WALLETS, &serde_json::json!({}))
        .await?;
    println!("{wallets}");

    println!("\n=== Active Orders ===");
    let orders = client
        .call_auth(endpoints::v2::ORDERS, &serde_json::json!({}))
        .await?;
    println!("{orders}");

    Ok(())
}
