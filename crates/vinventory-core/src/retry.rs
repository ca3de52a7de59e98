//! Per-page retry policy with backoff and a failed-attempt hook.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::error::FetchError;

/// Delay between attempts of the same page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Same delay before every retry.
    Fixed { delay: Duration },
    /// `base * factor^n` after the n-th failure (0-based), capped at `max`.
    Exponential {
        base: Duration,
        factor: f64,
        max: Duration,
    },
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_secs(1),
            factor: 2.0,
            max: Duration::from_secs(30),
        }
    }
}

impl Backoff {
    /// Retry immediately.
    pub const fn none() -> Self {
        Self::Fixed {
            delay: Duration::ZERO,
        }
    }

    /// Delay after the given failed attempt (0-based), before any randomization.
    pub fn delay(self, attempt: u32) -> Duration {
        match self {
            Self::Fixed { delay } => delay,
            Self::Exponential { base, factor, max } => {
                let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
                let seconds = base.as_secs_f64() * factor.powi(exponent);
                if seconds.is_finite() && seconds < max.as_secs_f64() {
                    Duration::from_secs_f64(seconds)
                } else {
                    max
                }
            }
        }
    }
}

/// Details handed to the failed-attempt hook.
#[derive(Debug)]
pub struct FailedAttempt<'a> {
    pub error: &'a FetchError,
    /// 1-based number of the attempt that just failed.
    pub attempt_number: u32,
    pub retries_left: u32,
}

/// Callback invoked after every failed attempt, including the last one.
pub type FailedAttemptHook = Arc<dyn Fn(&FailedAttempt<'_>) + Send + Sync>;

/// Hook that reports the failure through the `log` facade.
pub fn log_failed_attempt() -> FailedAttemptHook {
    Arc::new(|attempt: &FailedAttempt<'_>| {
        log::warn!(
            target: "vinventory",
            "attempt={} retries_left={} code={} error=\"{}\"",
            attempt.attempt_number,
            attempt.retries_left,
            attempt.error.code(),
            attempt.error
        );
    })
}

/// Hook that does nothing.
pub fn ignore_failed_attempt() -> FailedAttemptHook {
    Arc::new(|_: &FailedAttempt<'_>| {})
}

/// Outcome of a page whose attempts all failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryExhausted {
    pub attempts: u32,
    pub error: FetchError,
}

/// Bounded retry applied to every page request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure. Total attempts = `retries + 1`.
    pub retries: u32,
    pub backoff: Backoff,
    /// Scale every delay by a random factor in `[1, 2)`.
    pub randomize: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 2,
            backoff: Backoff::default(),
            randomize: false,
        }
    }
}

impl RetryPolicy {
    pub fn new(retries: u32) -> Self {
        Self {
            retries,
            ..Self::default()
        }
    }

    /// Single attempt, no retry.
    pub fn no_retry() -> Self {
        Self::new(0)
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_randomize(mut self, randomize: bool) -> Self {
        self.randomize = randomize;
        self
    }

    pub const fn total_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self.backoff.delay(attempt);
        if self.randomize {
            delay.mul_f64(1.0 + fastrand::f64())
        } else {
            delay
        }
    }

    /// Runs `operation` until it succeeds or the attempts run out.
    ///
    /// Attempts run one after another; the hook sees every failure before the
    /// backoff sleep.
    pub async fn run<T, F, Fut>(
        &self,
        on_failed_attempt: &FailedAttemptHook,
        mut operation: F,
    ) -> Result<T, RetryExhausted>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let total = self.total_attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;
            let error = match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            let retries_left = total.saturating_sub(attempt);
            on_failed_attempt(&FailedAttempt {
                error: &error,
                attempt_number: attempt,
                retries_left,
            });

            if retries_left == 0 {
                return Err(RetryExhausted {
                    attempts: attempt,
                    error,
                });
            }

            let delay = self.delay_for_attempt(attempt - 1);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }
}
