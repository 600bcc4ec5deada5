use crate::fetchers::throttle::Throttle;
use crate::utils::page_url;
use std::fmt;
use std::future::Future;

/// One numbered listing page to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    base_url: String,
    page_index: u32,
}

impl PageRequest {
    pub fn new(base_url: &str, page_index: u32) -> Self {
        Self {
            base_url: base_url.to_string(),
            page_index,
        }
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    /// Base URL with the page number appended
    pub fn url(&self) -> String {
        page_url(&self.base_url, self.page_index)
    }
}

/// How a single fetch attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// Status 200 with a readable body
    Success,
    /// Any status other than 200
    HttpError(u16),
    /// DNS, connection or body read failure
    NetworkError(String),
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStatus::Success => write!(f, "success"),
            FetchStatus::HttpError(code) => write!(f, "status code {}", code),
            FetchStatus::NetworkError(message) => write!(f, "network error: {}", message),
        }
    }
}

/// Result of one fetch attempt. Markup is only present on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub url: String,
    pub markup: Option<String>,
    pub status: FetchStatus,
}

impl PageResult {
    pub fn success(url: String, markup: String) -> Self {
        Self {
            url,
            markup: Some(markup),
            status: FetchStatus::Success,
        }
    }

    pub fn http_error(url: String, code: u16) -> Self {
        Self {
            url,
            markup: None,
            status: FetchStatus::HttpError(code),
        }
    }

    pub fn network_error(url: String, message: impl Into<String>) -> Self {
        Self {
            url,
            markup: None,
            status: FetchStatus::NetworkError(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == FetchStatus::Success
    }
}

/// Fetches the markup of a single listing page.
///
/// Implementations never fail: every problem is reported through
/// [`FetchStatus`] so one bad page cannot stop the run.
pub trait PageFetcher {
    fn fetch(&self, request: &PageRequest) -> impl Future<Output = PageResult> + Send;
}

/// Fetch pages `1..=page_count` one after another, pausing after each attempt.
///
/// Exactly `page_count` attempts are made and results come back in page order.
pub async fn fetch_all<F, T>(
    fetcher: &F,
    throttle: &T,
    base_url: &str,
    page_count: u32,
) -> Vec<PageResult>
where
    F: PageFetcher,
    T: Throttle,
{
    ::log::info!("Fetching {} pages from {}", page_count, base_url);

    let mut results = Vec::new();
    for page_index in 1..=page_count {
        let request = PageRequest::new(base_url, page_index);
        let result = fetcher.fetch(&request).await;

        match &result.status {
            FetchStatus::Success => {
                ::log::info!("Successfully fetched page {}: {}", page_index, result.url);
            }
            FetchStatus::HttpError(code) => {
                ::log::warn!(
                    "Error fetching page {}: {} returned status code {}",
                    page_index,
                    result.url,
                    code
                );
            }
            FetchStatus::NetworkError(message) => {
                ::log::error!(
                    "Error fetching page {}: {}: {}",
                    page_index,
                    result.url,
                    message
                );
            }
        }

        results.push(result);
        throttle.pause().await;
    }

    let fetched = results.iter().filter(|r| r.is_success()).count();
    ::log::info!("Fetched {} of {} pages", fetched, page_count);

    results
}

/// Markup of the successful attempts, in page order
pub fn successful_markup(results: &[PageResult]) -> Vec<&str> {
    results
        .iter()
        .filter_map(|r| r.markup.as_deref())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::throttle::NoDelay;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
    use std::time::Duration;

    /// Answers from a fixed script and records every requested URL
    struct ScriptedFetcher {
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedFetcher {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl PageFetcher for ScriptedFetcher {
        async fn fetch(&self, request: &PageRequest) -> PageResult {
            let url = request.url();
            self.calls.lock().unwrap().push(url.clone());
            match request.page_index() {
                2 => PageResult::http_error(url, 404),
                3 => PageResult::network_error(url, "connection refused"),
                n => PageResult::success(url, format!("<p>page {}</p>", n)),
            }
        }
    }

    struct CountingThrottle(AtomicUsize);

    impl Throttle for CountingThrottle {
        async fn pause(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Serves `serve` pages, then never answers again
    struct StallingFetcher {
        calls: AtomicU32,
        serve: u32,
    }

    impl PageFetcher for StallingFetcher {
        async fn fetch(&self, request: &PageRequest) -> PageResult {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call > self.serve {
                std::future::pending::<()>().await;
            }
            PageResult::success(request.url(), String::new())
        }
    }

    #[test]
    fn test_page_request_url() {
        let request = PageRequest::new("https://example.com/list?page=", 12);
        assert_eq!(request.url(), "https://example.com/list?page=12");
    }

    #[tokio::test]
    async fn test_one_attempt_per_page_in_order() {
        let fetcher = ScriptedFetcher::new();
        let results = fetch_all(&fetcher, &NoDelay, "http://site/?page=", 5).await;

        let calls = fetcher.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                "http://site/?page=1",
                "http://site/?page=2",
                "http://site/?page=3",
                "http://site/?page=4",
                "http://site/?page=5",
            ]
        );
        assert_eq!(results.len(), 5);
        assert_eq!(results[1].status, FetchStatus::HttpError(404));
        assert!(matches!(results[2].status, FetchStatus::NetworkError(_)));
    }

    #[tokio::test]
    async fn test_failed_pages_are_skipped() {
        let fetcher = ScriptedFetcher::new();
        let results = fetch_all(&fetcher, &NoDelay, "http://site/?page=", 4).await;

        assert_eq!(
            successful_markup(&results),
            vec!["<p>page 1</p>", "<p>page 4</p>"]
        );
    }

    #[tokio::test]
    async fn test_throttle_runs_after_every_attempt() {
        let fetcher = ScriptedFetcher::new();
        let throttle = CountingThrottle(AtomicUsize::new(0));
        fetch_all(&fetcher, &throttle, "http://site/?page=", 4).await;

        assert_eq!(throttle.0.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_page_count_starts_fetching_without_preallocating() {
        let fetcher = StallingFetcher {
            calls: AtomicU32::new(0),
            serve: 3,
        };

        let run = fetch_all(&fetcher, &NoDelay, "http://site/?page=", u32::MAX);
        let outcome = tokio::time::timeout(Duration::from_secs(1), run).await;

        assert!(outcome.is_err());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_zero_pages_makes_no_requests() {
        let fetcher = ScriptedFetcher::new();
        let results = fetch_all(&fetcher, &NoDelay, "http://site/?page=", 0).await;

        assert!(results.is_empty());
        assert!(fetcher.calls.lock().unwrap().is_empty());
    }
}
