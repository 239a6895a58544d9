//! Command-line client for the part lookup endpoint.

use anyhow::Result;
use clap::Parser;
use partlink_utils::ErrorResponse;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::process::ExitCode;
use std::time::Duration;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "partlink-client")]
#[command(author, version, about = "Look a part number up across every configured supplier")]
struct Cli {
    /// Part number to look up, e.g. 0510210200
    part_number: String,

    /// Base URL of the aggregator service
    #[arg(long, env = "PARTLINK_API_BASE_URL", default_value = "http://localhost:8080")]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[derive(Debug, Error)]
enum LookupError {
    #[error("API Error: {} - {message}", .status.as_u16())]
    Api { status: StatusCode, message: String },

    #[error("Request Error: {0}")]
    Request(#[from] reqwest::Error),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let client = Client::builder()
        .timeout(Duration::from_secs(cli.timeout))
        .build()?;

    println!("Fetching details for part: {}...", cli.part_number);

    match fetch_part(&client, &cli.base_url, &cli.part_number).await {
        Ok(summary) => {
            println!("Part Data: {}", serde_json::to_string_pretty(&summary)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            eprintln!("{}", error);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn fetch_part(client: &Client, base_url: &str, part_number: &str) -> Result<Value, LookupError> {
    let response = client
        .get(parts_url(base_url))
        .query(&[("partNumber", part_number)])
        .send()
        .await?;

    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.bytes().await?;
    Err(LookupError::Api {
        status,
        message: error_message(status, &body),
    })
}

fn parts_url(base_url: &str) -> String {
    format!("{}/parts", base_url.trim_end_matches('/'))
}

/// The server's error message, or the status reason when the body is not an error document.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorResponse>(body)
        .map(|error| error.message)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Unknown error").to_string())
}
