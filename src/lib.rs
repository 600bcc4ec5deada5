// Re-export modules
pub mod config;
pub mod export;
pub mod fetchers;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{ConfigError, ScrapeConfig};
pub use export::ExportOutcome;
pub use results::{Collected, ItemRecord};

use fetchers::{FixedDelay, HttpFetcher, PageFetcher, PageResult, Throttle};
use parsers::{ItemExtractor, ListingCardExtractor};

/// Counts and export result of one full run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub pages_attempted: usize,
    pub pages_fetched: usize,
    pub records: usize,
    pub export: ExportOutcome,
}

/// Fetch, extract and export pipeline for one listing site.
///
/// The fetcher, throttle and extractor default to plain HTTP, the configured
/// fixed delay and the listing card strategy; each can be swapped out.
pub struct Scraper<F = HttpFetcher, T = FixedDelay, E = ListingCardExtractor> {
    config: ScrapeConfig,
    fetcher: F,
    throttle: T,
    extractor: E,
}

impl Scraper {
    /// Create a scraper with the default HTTP fetcher and listing extractor
    pub fn new(config: ScrapeConfig) -> Self {
        let throttle = FixedDelay::from_millis(config.delay_ms);
        Self {
            config,
            fetcher: HttpFetcher::new(),
            throttle,
            extractor: ListingCardExtractor::new(),
        }
    }
}

impl<F, T, E> Scraper<F, T, E> {
    /// Replace the page fetcher
    pub fn with_fetcher<G: PageFetcher>(self, fetcher: G) -> Scraper<G, T, E> {
        Scraper {
            config: self.config,
            fetcher,
            throttle: self.throttle,
            extractor: self.extractor,
        }
    }

    /// Replace the pause applied after each request
    pub fn with_throttle<U: Throttle>(self, throttle: U) -> Scraper<F, U, E> {
        Scraper {
            config: self.config,
            fetcher: self.fetcher,
            throttle,
            extractor: self.extractor,
        }
    }

    /// Replace the extraction strategy
    pub fn with_extractor<X: ItemExtractor>(self, extractor: X) -> Scraper<F, T, X> {
        Scraper {
            config: self.config,
            fetcher: self.fetcher,
            throttle: self.throttle,
            extractor,
        }
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }
}

impl<F, T, E> Scraper<F, T, E>
where
    F: PageFetcher,
    T: Throttle,
    E: ItemExtractor,
{
    async fn fetch_and_extract(&self) -> (Vec<PageResult>, Collected) {
        let results = fetchers::fetch_all(
            &self.fetcher,
            &self.throttle,
            &self.config.base_url,
            self.config.page_count(),
        )
        .await;

        let markup = fetchers::successful_markup(&results);
        let collected = parsers::extract_all(&self.extractor, &markup, Collected::new());
        ::log::info!("Data has been scraped from the website");

        (results, collected)
    }

    /// Fetch every configured page and collect the complete records
    pub async fn scrape(&self) -> Collected {
        self.fetch_and_extract().await.1
    }

    /// Run the whole pipeline and write `<output_path>.csv`
    pub async fn run(&self) -> RunSummary {
        let (results, collected) = self.fetch_and_extract().await;
        let export = export::export(&collected, &self.config.output_path);

        RunSummary {
            pages_attempted: results.len(),
            pages_fetched: results.iter().filter(|r| r.is_success()).count(),
            records: collected.len(),
            export,
        }
    }
}
