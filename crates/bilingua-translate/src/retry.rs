// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Retry policy for translation requests.
//
// Every backend failure is treated as transient: the free endpoint fails
// mostly on rate limits and network blips, so the client retries a fixed
// number of times with a fixed delay and then degrades to a fallback string.

use std::thread;
use std::time::Duration;

use bilingua_core::config::TranslationSettings;
use tracing::{debug, warn};

/// Retry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts per text, including the first.
    pub max_attempts: u32,
    /// Pause after every successful call.
    pub success_pause: Duration,
    /// Wait between a failed attempt and the next one.
    pub retry_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::from(&TranslationSettings::default())
    }
}

impl From<&TranslationSettings> for RetryConfig {
    fn from(settings: &TranslationSettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            success_pause: settings.success_pause,
            retry_delay: settings.retry_delay,
        }
    }
}

/// Result of evaluating whether to retry after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after this delay.
    RetryAfter(Duration),
    /// Maximum attempts exhausted.
    Exhausted,
}

/// Decide what follows failed attempt number `attempt` (1-indexed).
pub fn should_retry(attempt: u32, config: &RetryConfig) -> RetryDecision {
    if attempt >= config.max_attempts {
        warn!(attempt, max = config.max_attempts, "retry limit exhausted");
        RetryDecision::Exhausted
    } else {
        debug!(
            attempt,
            delay_ms = config.retry_delay.as_millis() as u64,
            "scheduling retry"
        );
        RetryDecision::RetryAfter(config.retry_delay)
    }
}

/// Blocks the calling thread between requests.
pub trait Pause {
    fn pause(&self, duration: Duration);
}

/// Sleeps the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPause;

impl Pause for ThreadPause {
    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

impl<P: Pause + ?Sized> Pause for &P {
    fn pause(&self, duration: Duration) {
        (**self).pause(duration)
    }
}
