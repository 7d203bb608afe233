//! Probe module for reachability measurements.
//!
//! A probe reports latency as a signed millisecond count: the sign is the
//! only status channel. Failures never escape the probe boundary.

use async_trait::async_trait;
use std::time::{Duration, Instant};

/// A single probe outcome in milliseconds. Negative values mark failures.
pub type Sample = i64;

/// Canonical failure sample.
pub const FAILURE_SAMPLE: Sample = -1;

/// Whether a sample counts as a successful measurement.
pub fn is_success(sample: Sample) -> bool {
    sample >= 0
}

/// A latency probe against a single target.
///
/// Implementations enforce their own timeout and map every internal failure
/// to a failure sample, so one bad target can never stall or abort a cycle.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, target: &str) -> Sample;
}

/// HTTP reachability probe.
///
/// Issues a HEAD request against `https://{target}` and reports elapsed
/// wall-clock milliseconds. Any HTTP response counts as reachable; transport
/// errors and timeouts map to the failure sample. The number is response
/// timing, not ICMP round-trip time.
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    /// Create a probe with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, target: &str) -> Sample {
        let url = format!("https://{}", target);
        let start = Instant::now();

        match self.client.head(&url).send().await {
            Ok(_) => start.elapsed().as_millis() as Sample,
            Err(e) => {
                tracing::debug!("Probe failed for {}: {}", target, e);
                FAILURE_SAMPLE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_convention() {
        assert!(is_success(0));
        assert!(is_success(42));
        assert!(!is_success(FAILURE_SAMPLE));
        assert!(!is_success(-7));
    }

    #[tokio::test]
    async fn test_http_probe_unreachable_host() {
        let probe = HttpProbe::new(Duration::from_millis(200)).unwrap();
        let sample = probe.probe("256.256.256.256").await;
        assert_eq!(sample, FAILURE_SAMPLE);
    }
}
