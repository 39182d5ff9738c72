//! Bounded synchronous retry with a fixed delay.
//!
//! Used by the corpus rewrite path: a handful of attempts spaced a couple
//! of seconds apart, then give up and let the caller preserve state for
//! manual recovery. Generation and transport calls are deliberately not
//! retried here; their failure policies live with their callers.

use std::time::Duration;

use tracing::warn;

/// Retry policy: total attempt count and the pause between attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Total number of attempts, including the first.
    pub max_attempts: u32,

    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl RetryConfig {
    /// Default policy for corpus rewrites: 3 attempts, 2 s apart.
    pub const REWRITE: Self = Self {
        max_attempts: 3,
        delay: Duration::from_secs(2),
    };

    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

/// Runs `op` up to `config.max_attempts` times, sleeping between attempts.
///
/// Returns the first success, or the error from the final attempt.
pub fn retry<T, E, F>(config: RetryConfig, label: &str, mut op: F) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Result<T, E>,
{
    let attempts = config.max_attempts.max(1);
    let mut last_err = None;

    for attempt in 1..=attempts {
        match op() {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt < attempts {
                    warn!(
                        %label,
                        attempt,
                        max_attempts = attempts,
                        error = %err,
                        "attempt failed, retrying after delay"
                    );
                    std::thread::sleep(config.delay);
                } else {
                    warn!(%label, attempt, error = %err, "final attempt failed");
                }
                last_err = Some(err);
            }
        }
    }

    // attempts >= 1, so at least one iteration ran and stored an error.
    Err(last_err.expect("retry ran at least one attempt"))
}
