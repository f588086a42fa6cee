//! Presentation pacing: the cosmetic "bot is typing" delays.
//!
//! Nothing in the core waits on these; front-ends that want a natural feel
//! ask for a [`Schedule`] and sleep on it themselves.

use std::time::Duration;

use rand::Rng;

pub const DEFAULT_INDICATOR_DELAY_MS: u64 = 300;
pub const DEFAULT_RESPONSE_DELAY_MIN_MS: u64 = 800;
pub const DEFAULT_RESPONSE_DELAY_MAX_MS: u64 = 1200;

/// Delay settings, all measured from the moment the user sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    indicator_delay_ms: u64,
    response_delay_min_ms: u64,
    response_delay_max_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self::new(
            DEFAULT_INDICATOR_DELAY_MS,
            DEFAULT_RESPONSE_DELAY_MIN_MS,
            DEFAULT_RESPONSE_DELAY_MAX_MS,
        )
    }
}

/// When to show the typing indicator and when to show the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub indicator_at: Duration,
    pub response_at: Duration,
}

impl Schedule {
    /// Time between the indicator appearing and the reply replacing it.
    pub fn typing_for(&self) -> Duration {
        self.response_at.saturating_sub(self.indicator_at)
    }
}

impl Pacing {
    /// A reversed response window is swapped.
    pub fn new(indicator_delay_ms: u64, response_min_ms: u64, response_max_ms: u64) -> Self {
        let (response_delay_min_ms, response_delay_max_ms) = if response_min_ms <= response_max_ms
        {
            (response_min_ms, response_max_ms)
        } else {
            (response_max_ms, response_min_ms)
        };
        Self {
            indicator_delay_ms,
            response_delay_min_ms,
            response_delay_max_ms,
        }
    }

    /// No delays at all.
    pub fn disabled() -> Self {
        Self::new(0, 0, 0)
    }

    pub fn is_disabled(&self) -> bool {
        self.indicator_delay_ms == 0 && self.response_delay_max_ms == 0
    }

    pub fn indicator_delay(&self) -> Duration {
        Duration::from_millis(self.indicator_delay_ms)
    }

    pub fn response_window(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.response_delay_min_ms),
            Duration::from_millis(self.response_delay_max_ms),
        )
    }

    /// Draw a response delay uniformly from the configured window.
    pub fn response_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let ms = if self.response_delay_min_ms == self.response_delay_max_ms {
            self.response_delay_min_ms
        } else {
            rng.random_range(self.response_delay_min_ms..=self.response_delay_max_ms)
        };
        Duration::from_millis(ms)
    }

    /// Plan one exchange. The indicator never comes after the reply.
    pub fn schedule<R: Rng + ?Sized>(&self, rng: &mut R) -> Schedule {
        let response_at = self.response_delay(rng);
        Schedule {
            indicator_at: self.indicator_delay().min(response_at),
            response_at,
        }
    }
}
