use anchor_lang::prelude::*;

use crate::constants::{DEFAULT_BREAKER_WINDOW_SECONDS, DEFAULT_MAX_TRIGGERS, MAX_WINDOW_SECONDS};
use crate::errors::SecurityError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    pub max_triggers: u32,
    pub window_duration: i64,
    pub is_active: bool,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            max_triggers: DEFAULT_MAX_TRIGGERS,
            window_duration: DEFAULT_BREAKER_WINDOW_SECONDS,
            is_active: true,
        }
    }
}

impl CircuitBreakerConfig {
    pub fn new(max_triggers: u32, window_duration: i64, is_active: bool) -> Result<Self> {
        require!(max_triggers > 0, SecurityError::InvalidConfig);
        require!(
            window_duration > 0 && window_duration <= MAX_WINDOW_SECONDS,
            SecurityError::InvalidConfig
        );
        Ok(Self { max_triggers, window_duration, is_active })
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CircuitBreakerState {
    pub trigger_count: u32,
    pub window_start: i64,
}

/// Trigger counter over a fixed window `[window_start, window_start + window_duration)`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CircuitBreaker {
    pub config: CircuitBreakerConfig,
    pub state: CircuitBreakerState,
}

impl CircuitBreaker {
    pub const LEN: usize = 4    // max_triggers
        + 8                     // window_duration
        + 1                     // is_active
        + 4                     // trigger_count
        + 8;                    // window_start

    pub fn new(config: CircuitBreakerConfig, now: i64) -> Self {
        Self {
            config,
            state: CircuitBreakerState { trigger_count: 0, window_start: now },
        }
    }

    /// Config changes keep the running window. The count is clamped to the
    /// new maximum.
    pub fn configure(&mut self, config: CircuitBreakerConfig) {
        self.config = config;
        self.state.trigger_count = self.state.trigger_count.min(config.max_triggers);
    }

    /// Counts one anomaly signal. Returns `true` when the breaker trips, in
    /// which case the window is restarted at `now`.
    pub fn record_trigger(&mut self, now: i64) -> Result<bool> {
        let elapsed = now
            .checked_sub(self.state.window_start)
            .ok_or(SecurityError::MathOverflow)?;

        let mut next = self.state;
        if elapsed >= self.config.window_duration {
            next = CircuitBreakerState { trigger_count: 0, window_start: now };
        }
        next.trigger_count = next
            .trigger_count
            .checked_add(1)
            .ok_or(SecurityError::MathOverflow)?;

        let tripped = next.trigger_count >= self.config.max_triggers && self.config.is_active;
        if tripped {
            next = CircuitBreakerState { trigger_count: 0, window_start: now };
        } else {
            next.trigger_count = next.trigger_count.min(self.config.max_triggers);
        }

        self.state = next;
        Ok(tripped)
    }
}
