//! Back-off bounds for rate-limited generation and retry-delay parsing.

use std::sync::OnceLock;
use std::time::Duration;

use rand::Rng;
use regex::Regex;

/// Bounds for the rotation policy in [`RotatingGenerator`](super::RotatingGenerator).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RetryPolicy {
    /// Full sweeps over the candidate list.
    pub passes: usize,
    /// Lower clamp for the back-off between sweeps.
    pub min_backoff: Duration,
    /// Upper clamp for the back-off between sweeps.
    pub max_backoff: Duration,
    /// Random jitter added on top, uniformly in `[0, max_jitter]`.
    pub max_jitter: Duration,
    /// Delay assumed for a rate limit that suggested none.
    pub default_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            passes: 2,
            min_backoff: Duration::from_secs(3),
            max_backoff: Duration::from_secs(20),
            max_jitter: Duration::from_millis(1500),
            default_backoff: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    /// Same passes, no sleeping. Used by tests and offline runs.
    pub fn without_backoff() -> Self {
        Self {
            min_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            max_jitter: Duration::ZERO,
            default_backoff: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Clamps the smallest suggested delay into `[min_backoff, max_backoff]` and adds jitter.
    pub fn backoff(&self, suggested: Duration) -> Duration {
        let base = suggested.clamp(self.min_backoff, self.max_backoff);
        if self.max_jitter.is_zero() {
            return base;
        }
        let jitter = rand::rng().random_range(0.0..=self.max_jitter.as_secs_f64());
        base + Duration::from_secs_f64(jitter)
    }
}

fn retry_patterns() -> &'static [Regex; 2] {
    static PATTERNS: OnceLock<[Regex; 2]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(r"(?i)retry in\s*([0-9]+(?:\.[0-9]+)?)s").expect("valid regex"),
            Regex::new(r#"(?i)"retryDelay"\s*:\s*"([0-9]+(?:\.[0-9]+)?)s""#).expect("valid regex"),
        ]
    })
}

/// Extracts the suggested delay from a rate-limit message
/// (`"Please retry in 12.5s"` or a `"retryDelay": "12s"` detail).
pub fn parse_retry_delay(message: &str) -> Option<Duration> {
    retry_patterns().iter().find_map(|re| {
        re.captures(message)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map(Duration::from_secs_f64)
    })
}
