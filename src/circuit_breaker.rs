//! # Circuit Breaker Module
//!
//! This module implements the circuit breaker pattern for external provider
//! calls. When a food-data provider fails repeatedly, the circuit "opens" and
//! the gateway skips the network entirely, degrading to fallback values until
//! the provider has had time to recover.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::provider_config::BreakerConfig;

/// Circuit breaker for provider operations
///
/// # State Machine
///
/// - **Closed**: Normal operation, calls pass through
/// - **Open**: Failure threshold exceeded, calls degrade immediately
///
/// An open circuit resets automatically once `reset_secs` has elapsed since
/// the last recorded failure; there is no separate half-open state because
/// every provider call already degrades locally on failure.
#[derive(Debug)]
pub struct CircuitBreaker {
    failure_count: Mutex<u32>,
    last_failure_time: Mutex<Option<Instant>>,
    config: BreakerConfig,
}

impl CircuitBreaker {
    /// Create a new circuit breaker with the given configuration
    pub fn new(config: BreakerConfig) -> Self {
        Self {
            failure_count: Mutex::new(0),
            last_failure_time: Mutex::new(None),
            config,
        }
    }

    /// Check if the circuit is open (provider calls should be skipped)
    ///
    /// Returns `true` when the failure count has reached the threshold and
    /// the reset timeout has not yet elapsed. Automatically resets to closed
    /// after the timeout. Thread-safe via internal mutexes.
    pub fn is_open(&self) -> bool {
        let failure_count = *self.failure_count.lock().unwrap();
        let last_failure = *self.last_failure_time.lock().unwrap();

        if failure_count >= self.config.failure_threshold {
            if let Some(last_time) = last_failure {
                if last_time.elapsed() < Duration::from_secs(self.config.reset_secs) {
                    return true;
                }
                // Reset timeout elapsed, close the circuit
                *self.failure_count.lock().unwrap() = 0;
                *self.last_failure_time.lock().unwrap() = None;
            }
        }
        false
    }

    /// Record a failed provider call
    pub fn record_failure(&self) {
        *self.failure_count.lock().unwrap() += 1;
        *self.last_failure_time.lock().unwrap() = Some(Instant::now());
    }

    /// Record a successful provider call, resetting the failure counter
    pub fn record_success(&self) {
        *self.failure_count.lock().unwrap() = 0;
        *self.last_failure_time.lock().unwrap() = None;
    }
}
