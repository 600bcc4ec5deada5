use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use url::Url;

/// Errors raised while loading or validating a scrape configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("output path must not be empty")]
    EmptyOutputPath,
}

/// Configuration for one scrape run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeConfig {
    /// Listing URL that expects a page number appended to it
    pub base_url: String,

    /// Number of pages to fetch, starting at page 1
    page_count: u32,

    /// Output file prefix; `.csv` is appended when writing
    pub output_path: String,

    /// Pause after each page request, in milliseconds
    pub delay_ms: u64,
}

/// Config file shape before the page count has been checked
#[derive(Debug, Deserialize)]
struct RawScrapeConfig {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default)]
    page_count: Option<Value>,
    #[serde(default = "default_output_path")]
    output_path: String,
    #[serde(default = "default_delay_ms")]
    delay_ms: u64,
}

/// Laptop listing of the webscraper.io static e-commerce test site
fn default_base_url() -> String {
    "https://webscraper.io/test-sites/e-commerce/static/computers/laptops?page=".to_string()
}

fn default_page_count() -> u32 {
    21
}

fn default_output_path() -> String {
    "data".to_string()
}

/// One second between requests
fn default_delay_ms() -> u64 {
    1000
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_count: default_page_count(),
            output_path: default_output_path(),
            delay_ms: default_delay_ms(),
        }
    }
}

impl ScrapeConfig {
    /// Create a configuration with the default delay
    pub fn new(base_url: &str, page_count: u32, output_path: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            page_count,
            output_path: output_path.to_string(),
            delay_ms: default_delay_ms(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string.
    ///
    /// A bad `page_count` is not an error: it is logged and the default kept.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawScrapeConfig = serde_json::from_str(json)?;

        let mut config = Self {
            base_url: raw.base_url,
            page_count: default_page_count(),
            output_path: raw.output_path,
            delay_ms: raw.delay_ms,
        };
        if let Some(value) = raw.page_count {
            config.set_page_count_value(&value);
        }
        Ok(config)
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Update the page count. Negative or oversized values are rejected
    /// with a warning and the current value is kept.
    pub fn set_page_count(&mut self, value: i64) -> bool {
        match u32::try_from(value) {
            Ok(count) => {
                self.page_count = count;
                ::log::info!("Updated: the number of pages to be scraped is {}", count);
                true
            }
            Err(_) => {
                ::log::warn!(
                    "Invalid page count {}: must be a non-negative integer, keeping {}",
                    value,
                    self.page_count
                );
                false
            }
        }
    }

    /// Update the page count from user text such as a CLI argument
    pub fn set_page_count_str(&mut self, raw: &str) -> bool {
        match raw.trim().parse::<i64>() {
            Ok(value) => self.set_page_count(value),
            Err(_) => {
                ::log::warn!(
                    "Invalid page count {:?}: not an integer, keeping {}",
                    raw,
                    self.page_count
                );
                false
            }
        }
    }

    /// Update the page count from an untyped JSON value. Only integral
    /// numbers are accepted; floats, strings and booleans are rejected.
    pub fn set_page_count_value(&mut self, value: &Value) -> bool {
        match value.as_i64() {
            Some(v) => self.set_page_count(v),
            None => {
                ::log::warn!(
                    "Invalid page count {}: not an integer, keeping {}",
                    value,
                    self.page_count
                );
                false
            }
        }
    }

    /// Check that the base URL is an absolute http(s) URL and an output
    /// prefix was given
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }

        if self.output_path.trim().is_empty() {
            return Err(ConfigError::EmptyOutputPath);
        }

        Ok(())
    }
}
