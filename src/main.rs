use clap::Parser;
use listing_scrape::{ExportOutcome, Scraper};

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    ::log::info!(
        "Starting scrape of {} pages from {}",
        config.page_count(),
        config.base_url
    );
    if let Ok(json) = serde_json::to_string(&config) {
        ::log::debug!("Configuration: {}", json);
    }

    let start_time = std::time::Instant::now();
    let summary = Scraper::new(config).run().await;

    ::log::info!(
        "Scrape complete - fetched {} of {} pages, {} records in {:.2} seconds",
        summary.pages_fetched,
        summary.pages_attempted,
        summary.records,
        start_time.elapsed().as_secs_f64()
    );
    if let ExportOutcome::Written(path) = &summary.export {
        ::log::info!("Output written to {}", path.display());
    }
}
