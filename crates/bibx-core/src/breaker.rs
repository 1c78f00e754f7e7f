//! Upstream failure breaker.
//!
//! Consecutive upstream failures trip the breaker; while tripped, lookups
//! short-circuit without touching the wire. After a cooldown one probe call
//! is let through: its result decides whether the breaker closes again or
//! re-trips for another cooldown.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Breaker thresholds and cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerConfig {
    /// Consecutive failures that trip the breaker. Zero disables it.
    pub failure_threshold: u32,
    /// How long lookups stay short-circuited before a probe is let through.
    pub cooldown: Duration,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            cooldown: Duration::from_secs(30),
        }
    }
}

impl BreakerConfig {
    /// Config that never trips, for hosts that want raw behavior.
    pub const fn disabled() -> Self {
        Self {
            failure_threshold: 0,
            cooldown: Duration::ZERO,
        }
    }
}

/// Observable breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    Closed,
    Open,
    Probing,
}

#[derive(Debug, Clone, Copy)]
enum Gate {
    Closed { failures: u32 },
    Open { until: Instant },
    Probing,
}

/// Thread-safe failure breaker shared by all lookups against one upstream.
#[derive(Debug)]
pub struct FailureBreaker {
    config: BreakerConfig,
    gate: Mutex<Gate>,
}

impl Default for FailureBreaker {
    fn default() -> Self {
        Self::new(BreakerConfig::default())
    }
}

impl FailureBreaker {
    pub fn new(config: BreakerConfig) -> Self {
        Self {
            config,
            gate: Mutex::new(Gate::Closed { failures: 0 }),
        }
    }

    /// Whether a lookup may go upstream right now. Flipping an expired
    /// `Open` gate to `Probing` happens here, on the caller's clock.
    pub fn allow(&self) -> bool {
        if self.config.failure_threshold == 0 {
            return true;
        }

        let mut gate = self.gate.lock().expect("breaker gate is not poisoned");
        match *gate {
            Gate::Closed { .. } | Gate::Probing => true,
            Gate::Open { until } => {
                if Instant::now() >= until {
                    *gate = Gate::Probing;
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn on_success(&self) {
        let mut gate = self.gate.lock().expect("breaker gate is not poisoned");
        *gate = Gate::Closed { failures: 0 };
    }

    pub fn on_failure(&self) {
        if self.config.failure_threshold == 0 {
            return;
        }

        let mut gate = self.gate.lock().expect("breaker gate is not poisoned");
        *gate = match *gate {
            Gate::Probing => Gate::Open {
                until: Instant::now() + self.config.cooldown,
            },
            Gate::Closed { failures } => {
                let failures = failures.saturating_add(1);
                if failures >= self.config.failure_threshold {
                    Gate::Open {
                        until: Instant::now() + self.config.cooldown,
                    }
                } else {
                    Gate::Closed { failures }
                }
            }
            Gate::Open { until } => Gate::Open { until },
        };
    }

    pub fn state(&self) -> BreakerState {
        let gate = self.gate.lock().expect("breaker gate is not poisoned");
        match *gate {
            Gate::Closed { .. } => BreakerState::Closed,
            Gate::Open { .. } => BreakerState::Open,
            Gate::Probing => BreakerState::Probing,
        }
    }
}
