// ABOUTME: Bounded retry with exponential backoff around any vision transport
// ABOUTME: Retries network, timeout and 5xx failures up to three attempts in total
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use super::{GenerationRequest, TransportError, VisionTransport};
use crate::config::RetrySettings;
use crate::interpretation::RawEnvelope;

/// Hard ceiling on attempts per request
pub const MAX_ATTEMPTS_CAP: u32 = 3;

/// Retry policy for transport calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS_CAP, Duration::from_millis(500))
    }
}

impl RetryPolicy {
    /// Policy with the given attempt budget (clamped to 1..=3) and base delay
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.clamp(1, MAX_ATTEMPTS_CAP),
            base_delay,
        }
    }

    /// Policy from configuration
    #[must_use]
    pub fn from_settings(settings: &RetrySettings) -> Self {
        Self::new(
            settings.max_attempts,
            Duration::from_millis(settings.base_delay_ms),
        )
    }

    /// Single attempt, no waiting
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
        }
    }

    /// Total attempts allowed
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before the attempt following `attempt` (1-based): base, 2x base, 4x base, ...
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2_u32.saturating_pow(attempt.saturating_sub(1)))
    }

    /// Send `request`, retrying retryable failures; returns the last error once attempts run out
    ///
    /// # Errors
    ///
    /// Returns the first non-retryable error, or the last error after the final attempt
    pub async fn execute<T>(
        &self,
        transport: &T,
        request: &GenerationRequest,
    ) -> Result<RawEnvelope, TransportError>
    where
        T: VisionTransport + ?Sized,
    {
        let mut attempt = 1;
        loop {
            match transport.generate(request).await {
                Ok(envelope) => {
                    if attempt > 1 {
                        debug!(attempt, transport = transport.name(), "Transport succeeded after retry");
                    }
                    return Ok(envelope);
                }
                Err(error) if error.is_retryable() && attempt < self.max_attempts => {
                    let delay = self.backoff(attempt);
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "Transport attempt failed, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => {
                    warn!(
                        attempt,
                        retryable = error.is_retryable(),
                        error = %error,
                        "Transport failed"
                    );
                    return Err(error);
                }
            }
        }
    }
}
