use clap::Parser;
use route_mapper::domain::ports::ConfigProvider;
use route_mapper::utils::{logger, validation::Validate};
use route_mapper::{CliConfig, LocalStorage, OsrmClient, RoutePlanner, RouteSession};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // Logging
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting route-mapper");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // Load and validate configuration
    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    let client = OsrmClient::from_config(&config)?;
    let storage = LocalStorage::new(config.output_dir().to_string());
    let planner = RoutePlanner::from_config(client, storage, &config)?;
    let session = RouteSession::new(planner);

    match session.submit(cli.form()).await {
        Ok(outcome) => {
            let location = std::fs::canonicalize(&outcome.artifact_path)
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| outcome.artifact_path.clone());

            println!(
                "✅ Route map saved as {}. Total Distance: {:.2} km",
                outcome.artifact_path, outcome.distance_km
            );
            println!("🗺️  Open: file://{}", location);
        }
        Err(e) => {
            tracing::error!(
                "❌ Route planning failed: {} (Category: {:?})",
                e,
                e.category()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
