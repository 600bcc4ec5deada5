use clap::Parser;
use listing_scrape::{ConfigError, ScrapeConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "listing-scrape")]
#[command(about = "Scrapes product listings from paginated pages into a CSV file")]
#[command(version)]
pub struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listing URL the page number is appended to
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Number of pages to fetch, starting at 1
    #[arg(short, long, allow_hyphen_values = true)]
    pub pages: Option<String>,

    /// Output file prefix (".csv" is appended)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Pause after each request in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

impl Args {
    /// Build the run configuration: defaults, then the config file, then flags.
    ///
    /// An invalid `--pages` value is logged and ignored.
    pub fn into_config(self) -> Result<ScrapeConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ScrapeConfig::from_file(path)?,
            None => ScrapeConfig::default(),
        };

        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(pages) = &self.pages {
            config.set_page_count_str(pages);
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }

        config.validate()?;
        Ok(config)
    }
}
