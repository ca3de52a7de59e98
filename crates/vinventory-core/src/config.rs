use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::time::Duration;

use crate::http_client::HttpRequest;
use crate::retry::{log_failed_attempt, Backoff, FailedAttemptHook, RetryPolicy};

/// Options forwarded unchanged to every page request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOptions {
    pub headers: BTreeMap<String, String>,
    pub timeout: Option<Duration>,
}

impl TransportOptions {
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(crate) fn apply(&self, request: HttpRequest) -> HttpRequest {
        request
            .with_headers(&self.headers)
            .with_timeout(self.timeout)
    }
}

/// Per-call fetch configuration.
#[derive(Clone)]
pub struct FetchConfig {
    pub retry: RetryPolicy,
    pub on_failed_attempt: FailedAttemptHook,
    pub transport: TransportOptions,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            on_failed_attempt: log_failed_attempt(),
            transport: TransportOptions::default(),
        }
    }
}

impl Debug for FetchConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchConfig")
            .field("retry", &self.retry)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl FetchConfig {
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retry.retries = retries;
        self
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.retry.backoff = backoff;
        self
    }

    /// Randomize backoff delays between `1x` and `2x`.
    pub fn with_randomized_backoff(mut self, randomize: bool) -> Self {
        self.retry.randomize = randomize;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn on_failed_attempt(mut self, hook: FailedAttemptHook) -> Self {
        self.on_failed_attempt = hook;
        self
    }

    pub fn with_transport(mut self, transport: TransportOptions) -> Self {
        self.transport = transport;
        self
    }
}
