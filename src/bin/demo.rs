//! Exercises a running server with a few Hebrew sample offers and saves each
//! result as JSON.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use studio_ai::models::{GenerateImageResponse, OfferRequest};
use studio_ai::server::GENERATE_IMAGE_PATH;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const PAUSE_BETWEEN_REQUESTS: Duration = Duration::from_secs(3);

#[derive(Debug, Parser)]
#[command(name = "demo")]
#[command(about = "Send sample offers to a running Studio AI server")]
struct CliArgs {
    /// Base URL of the running server.
    #[arg(long, default_value = "http://localhost:8000")]
    base_url: String,

    /// Directory the result files are written to.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

struct DemoCase {
    product: &'static str,
    offer: &'static str,
    description: &'static str,
}

const DEMO_CASES: &[DemoCase] = &[
    DemoCase {
        product: "נעלי ספורט מעוצבות",
        offer: "50% הנחה",
        description: "Stylish sport shoes with 50% discount",
    },
    DemoCase {
        product: "עוגת שוקולד עשירה",
        offer: "מהדורה מוגבלת",
        description: "Rich chocolate cake - limited edition",
    },
    DemoCase {
        product: "תיק עור איכותי",
        offer: "קולקציה חדשה",
        description: "High-quality leather bag - new collection",
    },
];

#[derive(Debug, Serialize)]
struct DemoResult<'a> {
    request: &'a OfferRequest,
    response: &'a GenerateImageResponse,
    duration: f64,
    timestamp: String,
}

async fn run_case(
    client: &reqwest::Client,
    args: &CliArgs,
    index: usize,
    case: &DemoCase,
) -> Result<()> {
    let request = OfferRequest {
        product: case.product.to_string(),
        offer: case.offer.to_string(),
    };
    let api_url = format!("{}{}", args.base_url, GENERATE_IMAGE_PATH);

    info!("Demo {}: {}", index, case.description);
    info!("Product: {} | Offer: {}", request.product, request.offer);

    let started = Instant::now();
    let response = match client
        .post(&api_url)
        .json(&request)
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) if e.is_timeout() => {
            warn!("Request timed out (expected on the first call while the model loads)");
            return Ok(());
        }
        Err(e) => return Err(e).context("Request failed"),
    };
    let duration = started.elapsed().as_secs_f64();

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!("Error {}: {}", status, body);
        return Ok(());
    }

    let result: GenerateImageResponse = response.json().await?;
    info!("Success in {:.2} seconds", duration);
    info!("Image URL: {}{}", args.base_url, result.image_url);

    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let path = args
        .output_dir
        .join(format!("demo_result_{}_{}.json", index, timestamp));
    let json = serde_json::to_string_pretty(&DemoResult {
        request: &request,
        response: &result,
        duration,
        timestamp,
    })?;
    std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Result saved to {}", path.display());

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let client = reqwest::Client::new();

    info!("Testing connection to {}", args.base_url);
    if let Err(e) = client
        .get(&args.base_url)
        .timeout(Duration::from_secs(5))
        .send()
        .await
    {
        error!("Server is not running at {}: {}", args.base_url, e);
        error!("Start it first with `cargo run --bin studio-ai`");
        return Ok(());
    }
    info!("Server is running");

    for (i, case) in DEMO_CASES.iter().enumerate() {
        let index = i + 1;
        run_case(&client, &args, index, case).await?;

        if index < DEMO_CASES.len() {
            info!("Waiting {} seconds before next request", PAUSE_BETWEEN_REQUESTS.as_secs());
            tokio::time::sleep(PAUSE_BETWEEN_REQUESTS).await;
        }
    }

    info!("Demo completed; generated images are under static/generated_images/");
    Ok(())
}
