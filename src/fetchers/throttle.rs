use std::future::Future;
use std::time::Duration;

/// Pause applied after every page request
pub trait Throttle {
    fn pause(&self) -> impl Future<Output = ()> + Send;
}

/// Sleeps for the same interval after every request, no jitter or backoff
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl FixedDelay {
    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self(Duration::from_secs(1))
    }
}

impl Throttle for FixedDelay {
    async fn pause(&self) {
        ::log::trace!("Throttling for {:?}", self.0);
        tokio::time::sleep(self.0).await;
    }
}

/// Never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Throttle for NoDelay {
    async fn pause(&self) {}
}
