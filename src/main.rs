use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use cardguard::config::Config;
use cardguard::ingest::upload;
use cardguard::pipeline::ScreeningPipeline;
use cardguard::scoring::LogisticClassifier;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // Initialize structured logging (set RUST_LOG=debug for more output)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "config.toml".to_string());
    let input_path = args.next();

    let config = Config::load(&config_path)?;
    tracing::info!(model = %config.model.name, "Configuration loaded from {}", config_path);

    let classifier = Arc::new(LogisticClassifier::from_config(&config.model)?);
    let pipeline = Arc::new(ScreeningPipeline::new(&config, classifier));

    // One-shot mode: score a CSV file and print the report
    if let Some(path) = input_path {
        let table = upload::parse_csv_file(&path)?;
        tracing::info!(rows = table.row_count(), "Scoring {}", path);
        let report = pipeline
            .screen(&table)
            .map_err(|e| eyre::eyre!("Failed to screen '{}': {}", path, e))?;
        println!("{}", report);
        return Ok(());
    }

    if !config.server.enabled {
        tracing::warn!("No input file given and API server disabled, nothing to do");
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    let server = {
        let shutdown = shutdown.clone();
        let config = config.clone();
        tokio::spawn(async move {
            if let Err(e) = cardguard::api::serve(pipeline, &config, shutdown).await {
                tracing::error!(error = %e, "API server failed");
            }
        })
    };

    tracing::info!("CardGuard ready. Press Ctrl+C to stop.");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received, draining in-flight requests...");
    shutdown.cancel();
    let _ = server.await;

    tracing::info!("CardGuard stopped gracefully");
    Ok(())
}
