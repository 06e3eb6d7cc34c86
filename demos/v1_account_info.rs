//! Example: legacy v1 authenticated endpoints.
//!
//! Run with: cargo run --example v1_account_info

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

    let client = RestClient::builder(ApiVersion::V1)
        .credentials(credentials)
        .build();

    println!("=== Account Info ===");
    let info = client
        .call_auth(endpoints::v1::ACCOUNT_INFOS, &serde_json::json!({}))
        .await?;
    println!("{info}");

    println!("\n=== Balances ===");
    let balances = client
        .call_auth(endpoints::v1::BALANCES, &serde_json::json!({}))
        .await?;
    println!("{balances}");

    Ok(())
}
