use anchor_lang::prelude::*;

use crate::constants::{
    DEFAULT_RATE_LIMIT_MAX_CALLS, DEFAULT_RATE_LIMIT_WINDOW_SECONDS, MAX_WINDOW_SECONDS,
};
use crate::errors::SecurityError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_calls: u64,         // calls allowed per window
    pub window_seconds: i64,    // window duration in seconds
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_calls: DEFAULT_RATE_LIMIT_MAX_CALLS,
            window_seconds: DEFAULT_RATE_LIMIT_WINDOW_SECONDS,
        }
    }
}

impl RateLimitConfig {
    pub const LEN: usize = 8 + 8;

    pub fn new(max_calls: u64, window_seconds: i64) -> Result<Self> {
        require!(max_calls > 0, SecurityError::InvalidConfig);
        require!(
            window_seconds > 0 && window_seconds <= MAX_WINDOW_SECONDS,
            SecurityError::InvalidConfig
        );
        Ok(Self { max_calls, window_seconds })
    }
}

#[account]
#[derive(Debug, Default)]
pub struct RateLimitBucket {
    pub manager: Pubkey,        // security manager this bucket counts against
    pub user: Pubkey,           // rate-limited principal
    pub count: u64,             // calls used in current window
    pub window_start: i64,      // when current window started (unix timestamp)
    pub total_calls: u64,       // lifetime call count
    pub bump: u8,
}

impl RateLimitBucket {
    pub const LEN: usize = 8    // discriminator
        + 32                    // manager
        + 32                    // user
        + 8                     // count
        + 8                     // window_start
        + 8                     // total_calls
        + 1;                    // bump

    pub fn is_initialized(&self) -> bool {
        self.manager != Pubkey::default()
    }

    pub fn init(&mut self, manager: Pubkey, user: Pubkey, now: i64, bump: u8) {
        self.manager = manager;
        self.user = user;
        self.count = 0;
        self.window_start = now;
        self.total_calls = 0;
        self.bump = bump;
    }

    /// Spends one call from the current fixed window.
    pub fn consume(&mut self, config: &RateLimitConfig, now: i64) -> Result<()> {
        let elapsed = now
            .checked_sub(self.window_start)
            .ok_or(SecurityError::MathOverflow)?;

        let (count, window_start) = if elapsed >= config.window_seconds {
            (0, now)
        } else {
            (self.count, self.window_start)
        };
        require!(count < config.max_calls, SecurityError::RateLimitExceeded);

        self.count = count + 1;
        self.window_start = window_start;
        self.total_calls = self.total_calls.saturating_add(1);
        Ok(())
    }

    pub fn reset(&mut self, now: i64) {
        self.count = 0;
        self.window_start = now;
    }

    pub fn window_ends_in(&self, config: &RateLimitConfig, now: i64) -> i64 {
        self.window_start
            .saturating_add(config.window_seconds)
            .saturating_sub(now)
            .max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    fn bucket_at(now: i64) -> RateLimitBucket {
        let mut bucket = RateLimitBucket::default();
        bucket.init(Pubkey::new_unique(), Pubkey::new_unique(), now, 255);
        bucket
    }

    #[test]
    fn eleventh_call_in_window_is_rejected() {
        let config = RateLimitConfig::default();
        let mut bucket = bucket_at(1_000);

        for i in 0..10 {
            bucket.consume(&config, 1_000 + i).unwrap();
        }
        assert_eq!(
            bucket.consume(&config, 1_030).unwrap_err(),
            Error::from(SecurityError::RateLimitExceeded)
        );
        assert_eq!(bucket.count, 10);
        assert_eq!(bucket.total_calls, 10);
    }

    #[test]
    fn window_resets_after_a_minute() {
        let config = RateLimitConfig::default();
        let mut bucket = bucket_at(0);
        for _ in 0..10 {
            bucket.consume(&config, 0).unwrap();
        }

        bucket.consume(&config, 61).unwrap();
        assert_eq!(bucket.count, 1);
        assert_eq!(bucket.window_start, 61);
        assert_eq!(bucket.total_calls, 11);
    }

    #[test]
    fn boundary_second_starts_new_window() {
        let config = RateLimitConfig::default();
        let mut bucket = bucket_at(0);
        for _ in 0..10 {
            bucket.consume(&config, 59).unwrap();
        }
        assert!(bucket.consume(&config, 59).is_err());
        bucket.consume(&config, 60).unwrap();
        assert_eq!(bucket.count, 1);
    }

    #[test]
    fn rejected_call_leaves_bucket_untouched() {
        let config = RateLimitConfig::new(1, 60).unwrap();
        let mut bucket = bucket_at(0);
        bucket.consume(&config, 0).unwrap();

        let before = (bucket.count, bucket.window_start, bucket.total_calls);
        assert!(bucket.consume(&config, 30).is_err());
        assert_eq!((bucket.count, bucket.window_start, bucket.total_calls), before);
    }

    #[test]
    fn reset_clears_the_window() {
        let config = RateLimitConfig::default();
        let mut bucket = bucket_at(0);
        for _ in 0..10 {
            bucket.consume(&config, 0).unwrap();
        }
        bucket.reset(5);
        bucket.consume(&config, 6).unwrap();
        assert_eq!(bucket.count, 1);
        assert_eq!(bucket.window_ends_in(&config, 6), 59);
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(RateLimitConfig::new(0, 60).is_err());
        assert!(RateLimitConfig::new(10, 0).is_err());
        assert_eq!(
            RateLimitConfig::new(10, i64::MAX).unwrap_err(),
            Error::from(SecurityError::InvalidConfig)
        );
        RateLimitConfig::new(10, MAX_WINDOW_SECONDS).unwrap();
    }

    #[test]
    fn window_ends_in_saturates_at_extreme_timestamps() {
        let config = RateLimitConfig::new(10, MAX_WINDOW_SECONDS).unwrap();
        let mut bucket = bucket_at(i64::MAX - 10);
        bucket.consume(&config, i64::MAX - 5).unwrap();

        assert_eq!(bucket.window_ends_in(&config, i64::MAX - 5), 5);
        assert_eq!(bucket.window_ends_in(&config, i64::MIN), i64::MAX);
    }

    #[test]
    fn initialized_flag_follows_the_manager_key() {
        let mut bucket = RateLimitBucket::default();
        assert!(!bucket.is_initialized());

        bucket.init(Pubkey::new_unique(), Pubkey::default(), 0, 255);
        assert!(bucket.is_initialized());
    }
}
