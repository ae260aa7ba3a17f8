//! Preview pipeline handler binary.
//!
//! Reads one trigger-event JSON document from stdin, runs the pipeline
//! once with the real collaborators, and writes the result JSON to stdout.
//! The exit code is zero whenever a result was produced; the result's
//! status code carries the invocation outcome.

use tokio::io::AsyncReadExt;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vprev_dispatch::{DispatchConfig, JobSettings, TranscodeClient};
use vprev_handler::{HandlerConfig, PreviewPipeline};
use vprev_media::GifTransformer;
use vprev_models::StorageEvent;
use vprev_storage::{S3Store, StorageConfig};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("vprev=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting vprev-handler");

    let config = match HandlerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let settings = match JobSettings::load(&config.job_template_path).await {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to load job template: {}", e);
            std::process::exit(1);
        }
    };

    let mut raw_event = String::new();
    if let Err(e) = tokio::io::stdin().read_to_string(&mut raw_event).await {
        error!("Failed to read trigger event from stdin: {}", e);
        std::process::exit(1);
    }

    let event: StorageEvent = match serde_json::from_str(&raw_event) {
        Ok(e) => e,
        Err(e) => {
            error!("Failed to parse trigger event: {}", e);
            std::process::exit(1);
        }
    };

    let store = match S3Store::new(StorageConfig {
        region: config.region.clone(),
        endpoint_url: std::env::var("S3_ENDPOINT_URL").ok(),
        access_key_id: std::env::var("S3_ACCESS_KEY_ID").ok(),
        secret_access_key: std::env::var("S3_SECRET_ACCESS_KEY").ok(),
    })
    .await
    {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to create object store client: {}", e);
            std::process::exit(1);
        }
    };

    let dispatcher = match TranscodeClient::new(DispatchConfig::from_env(&config.region)) {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to create transcode client: {}", e);
            std::process::exit(1);
        }
    };

    let pipeline = PreviewPipeline::new(config, settings, store, GifTransformer::new(), dispatcher);
    let result = pipeline.handle(&event).await;

    match serde_json::to_string(&result) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Failed to serialize result: {}", e);
            std::process::exit(1);
        }
    }
}
