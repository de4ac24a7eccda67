use clap::Parser;
use poi_finder::app::report;
use poi_finder::domain::ports::Storage;
use poi_finder::utils::error::ErrorSeverity;
use poi_finder::utils::{logger, validation::Validate};
use poi_finder::{build_finder, CliConfig, FinderError, LocalStorage, ResultOrigin};
use std::path::Path;

fn exit_with(e: &FinderError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting poi-finder");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = cli.validate() {
        exit_with(&e);
    }

    let request = cli.search_request()?;
    let config = match cli.load_finder_config() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    let finder = build_finder(&config, cli.seed)?;

    let outcome = finder.find(request).await;
    if let Some(route) = &outcome.route {
        tracing::info!(
            "🛣️ Route: {}, {}{}",
            route.distance_text,
            route.duration_text,
            if route.synthetic { " (approximate)" } else { "" }
        );
    }
    match outcome.origin {
        ResultOrigin::Live => tracing::info!("✅ Found {} POIs", outcome.pois.len()),
        ResultOrigin::Fallback => {
            tracing::warn!("⚠️ Providers unavailable, showing {} placeholder POIs", outcome.pois.len())
        }
    }

    let rendered = match report::render(&outcome, cli.format) {
        Ok(bytes) => bytes,
        Err(e) => exit_with(&e),
    };

    match &cli.output {
        Some(output) => {
            let path = Path::new(output);
            let base = path
                .parent()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default();
            let file_name = path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("pois.{}", cli.format.extension()));

            let storage = LocalStorage::new(base);
            if let Err(e) = storage.write_file(&file_name, &rendered).await {
                exit_with(&e);
            }
            tracing::info!("📁 Output saved to: {}", output);
        }
        None => {
            println!("{}", String::from_utf8_lossy(&rendered));
        }
    }

    Ok(())
}
