use std::time::Duration;

use rand::Rng;
use tracing::info;

/// Politeness delay between page requests, drawn uniformly from `[min, max]` seconds.
#[derive(Debug, Clone, Copy)]
pub struct RateLimiter {
    min_secs: f64,
    max_secs: f64,
}

impl RateLimiter {
    /// Bounds are swapped if given in the wrong order; negatives clamp to zero.
    pub fn new(min_secs: f64, max_secs: f64) -> Self {
        let (lo, hi) = if min_secs <= max_secs {
            (min_secs, max_secs)
        } else {
            (max_secs, min_secs)
        };
        Self {
            min_secs: lo.max(0.0),
            max_secs: hi.max(0.0),
        }
    }

    pub fn pick_delay<R: Rng>(&self, rng: &mut R) -> Duration {
        Duration::from_secs_f64(rng.random_range(self.min_secs..=self.max_secs))
    }

    /// Sleep the current thread for a random delay and return it.
    pub fn wait(&self) -> Duration {
        let delay = self.pick_delay(&mut rand::rng());
        info!("Rate limiting: sleeping for {:.2} seconds", delay.as_secs_f64());
        std::thread::sleep(delay);
        delay
    }
}
