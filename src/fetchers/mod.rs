pub mod fetcher;
pub mod http;
pub mod throttle;

pub use fetcher::{FetchStatus, PageFetcher, PageRequest, PageResult, fetch_all, successful_markup};
pub use http::HttpFetcher;
pub use throttle::{FixedDelay, NoDelay, Throttle};
