//! Exponential backoff schedule

use rand::Rng;
use std::time::Duration;
use tokio::time::Instant;

use crate::config::ActivationPollConfig;

/// Exponential backoff with jitter and a total time budget
///
/// Each wait is drawn from `current * (1 ± randomization_factor)`, after
/// which `current` grows by `multiplier` up to `max_interval`. The schedule
/// stops once time spent since construction plus the next wait would exceed
/// `max_elapsed`.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    current_interval: Duration,
    multiplier: f64,
    max_interval: Duration,
    max_elapsed: Duration,
    randomization_factor: f64,
    start: Instant,
}

impl ExponentialBackoff {
    /// Start a schedule now
    pub fn new(config: &ActivationPollConfig) -> Self {
        Self {
            current_interval: Duration::from_millis(config.initial_interval_ms),
            multiplier: config.multiplier,
            max_interval: Duration::from_millis(config.max_interval_ms),
            max_elapsed: Duration::from_millis(config.max_elapsed_ms),
            randomization_factor: config.randomization_factor,
            start: Instant::now(),
        }
    }

    /// Time since the schedule started
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Interval the next wait is drawn around
    pub fn current_interval(&self) -> Duration {
        self.current_interval
    }

    /// Next wait, or `None` when the budget is spent
    pub fn next_backoff(&mut self) -> Option<Duration> {
        let elapsed = self.elapsed();
        let next = randomize(self.current_interval, self.randomization_factor);
        self.grow();

        if elapsed + next > self.max_elapsed {
            return None;
        }
        Some(next)
    }

    fn grow(&mut self) {
        let grown =
            Duration::try_from_secs_f64(self.current_interval.as_secs_f64() * self.multiplier)
                .unwrap_or(self.max_interval);
        self.current_interval = grown.min(self.max_interval);
    }
}

fn randomize(interval: Duration, factor: f64) -> Duration {
    if factor <= 0.0 {
        return interval;
    }

    let center = interval.as_secs_f64();
    let delta = center * factor;
    let value = rand::thread_rng().gen_range((center - delta)..=(center + delta));
    Duration::from_secs_f64(value.max(0.0))
}
