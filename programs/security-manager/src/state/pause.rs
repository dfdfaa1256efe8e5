use anchor_lang::prelude::*;

use crate::constants::MAX_REASON_LEN;
use crate::errors::SecurityError;

/// Global halt switch.
///
/// `unpause_at == None` is a permanent pause that only `unpause` lifts. A
/// timed pause stops blocking as soon as `now >= unpause_at`, without anyone
/// having to clear the flag.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PauseState {
    pub is_paused: bool,
    pub reason: String,
    pub paused_at: i64,
    pub unpause_at: Option<i64>,
}

impl PauseState {
    pub const LEN: usize = 1        // is_paused
        + (4 + MAX_REASON_LEN)      // reason
        + 8                         // paused_at
        + (1 + 8);                  // unpause_at

    /// Whether the pause still blocks protected operations at `now`.
    pub fn is_in_effect(&self, now: i64) -> bool {
        self.is_paused && self.unpause_at.map_or(true, |at| now < at)
    }

    pub fn ensure_not_paused(&self, now: i64) -> Result<()> {
        require!(!self.is_in_effect(now), SecurityError::SystemPaused);
        Ok(())
    }

    pub fn pause(&mut self, reason: &str, now: i64, unpause_at: Option<i64>) -> Result<()> {
        require!(reason.len() <= MAX_REASON_LEN, SecurityError::ReasonTooLong);
        require!(!self.is_in_effect(now), SecurityError::AlreadyPaused);

        *self = PauseState {
            is_paused: true,
            reason: reason.to_string(),
            paused_at: now,
            unpause_at,
        };
        Ok(())
    }

    pub fn unpause(&mut self) -> Result<()> {
        require!(self.is_paused, SecurityError::SystemNotPaused);
        *self = PauseState::default();
        Ok(())
    }

    pub fn info(&self, now: i64) -> PauseInfo {
        if !self.is_in_effect(now) {
            return PauseInfo::default();
        }
        PauseInfo {
            is_paused: true,
            reason: self.reason.clone(),
            paused_at: self.paused_at,
            time_until_unpause: self.unpause_at.map_or(0, |at| (at - now).max(0)),
        }
    }
}

/// Snapshot returned by `get_system_pause_info`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PauseInfo {
    pub is_paused: bool,
    pub reason: String,
    pub paused_at: i64,
    pub time_until_unpause: i64,
}
