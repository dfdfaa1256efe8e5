use anchor_lang::prelude::*;

use crate::clock::TimeSource;
use crate::constants::{
    EVENT_AUTO_PAUSE, EVENT_EMERGENCY_PAUSE, EVENT_SYSTEM_UNPAUSED, EVENT_TIMED_PAUSE,
    MAX_PAUSE_DURATION_SECONDS, MAX_REASON_LEN, SEVERITY_AUTO_PAUSE, SEVERITY_PAUSE,
    SEVERITY_UNPAUSE, UNPAUSE_DESCRIPTION,
};
use crate::errors::SecurityError;
use crate::events::SecurityEventDetected;
use crate::state::{
    AutoPauseRules, CircuitBreaker, CircuitBreakerConfig, Comparison, PauseInfo, PauseState, RateLimitBucket,
    RateLimitConfig, Role, RoleRegistry, SecurityStats, SecurityStatsView,
};

/// Parameters accepted by `initialize`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SecurityManagerConfig {
    pub max_triggers: u32,
    pub breaker_window_seconds: i64,
    pub breaker_active: bool,
    pub rate_limit_max_calls: u64,
    pub rate_limit_window_seconds: i64,
}

impl Default for SecurityManagerConfig {
    fn default() -> Self {
        let breaker = CircuitBreakerConfig::default();
        let rate_limit = RateLimitConfig::default();
        Self {
            max_triggers: breaker.max_triggers,
            breaker_window_seconds: breaker.window_duration,
            breaker_active: breaker.is_active,
            rate_limit_max_calls: rate_limit.max_calls,
            rate_limit_window_seconds: rate_limit.window_seconds,
        }
    }
}

/// Outcome of one `trigger_circuit_breaker` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakerTrip {
    pub tripped: bool,
    pub trigger_count: u32,
    /// Set only when this trip moved the system from active to paused.
    pub pause_event: Option<SecurityEventDetected>,
}

#[account]
#[derive(Debug, PartialEq)]
pub struct SecurityManager {
    pub owner: Pubkey,                      // initial admin, part of the PDA seeds
    pub roles: RoleRegistry,
    pub pause: PauseState,
    pub circuit_breaker: CircuitBreaker,
    pub rate_limit: RateLimitConfig,
    pub auto_pause: AutoPauseRules,
    pub stats: SecurityStats,
    pub bump: u8,
}

impl SecurityManager {
    pub const LEN: usize = 8            // discriminator
        + 32                            // owner
        + RoleRegistry::LEN             // roles
        + PauseState::LEN               // pause
        + CircuitBreaker::LEN           // circuit_breaker
        + RateLimitConfig::LEN          // rate_limit
        + AutoPauseRules::LEN           // auto_pause
        + SecurityStats::LEN            // stats
        + 1;                            // bump

    pub fn new(owner: Pubkey, config: &SecurityManagerConfig, now: i64, bump: u8) -> Result<Self> {
        require!(owner != Pubkey::default(), SecurityError::ZeroAddress);
        let breaker = CircuitBreakerConfig::new(
            config.max_triggers,
            config.breaker_window_seconds,
            config.breaker_active,
        )?;
        let rate_limit =
            RateLimitConfig::new(config.rate_limit_max_calls, config.rate_limit_window_seconds)?;

        Ok(Self {
            owner,
            roles: RoleRegistry::new(owner),
            pause: PauseState::default(),
            circuit_breaker: CircuitBreaker::new(breaker, now),
            rate_limit,
            auto_pause: AutoPauseRules::default(),
            stats: SecurityStats::default(),
            bump,
        })
    }

    // ---------------------------------------------------------------------
    // access control
    // ---------------------------------------------------------------------

    pub fn grant_role(&mut self, sender: &Pubkey, role: Role, principal: Pubkey) -> Result<bool> {
        self.roles.authorize(sender, Role::Admin)?;
        self.roles.grant(role, principal)
    }

    pub fn revoke_role(&mut self, sender: &Pubkey, role: Role, principal: &Pubkey) -> Result<bool> {
        self.roles.authorize(sender, Role::Admin)?;
        self.roles.revoke(role, principal)
    }

    // ---------------------------------------------------------------------
    // pause controller
    // ---------------------------------------------------------------------

    pub fn emergency_pause(
        &mut self,
        actor: Pubkey,
        reason: &str,
        clock: &impl TimeSource,
    ) -> Result<SecurityEventDetected> {
        self.roles.authorize(&actor, Role::EmergencyResponder)?;
        let now = clock.unix_timestamp()?;

        self.pause.pause(reason, now, None)?;
        self.stats.record_pause();
        Ok(pause_event(actor, EVENT_EMERGENCY_PAUSE, reason, SEVERITY_PAUSE))
    }

    pub fn timed_pause(
        &mut self,
        actor: Pubkey,
        reason: &str,
        duration: i64,
        clock: &impl TimeSource,
    ) -> Result<SecurityEventDetected> {
        if !self.roles.has_role(&actor, Role::Admin) {
            self.roles.authorize(&actor, Role::EmergencyResponder)?;
        }
        require!(
            duration > 0 && duration <= MAX_PAUSE_DURATION_SECONDS,
            SecurityError::InvalidPauseDuration
        );
        let now = clock.unix_timestamp()?;
        let unpause_at = now.checked_add(duration).ok_or(SecurityError::MathOverflow)?;

        self.pause.pause(reason, now, Some(unpause_at))?;
        self.stats.record_pause();
        Ok(pause_event(actor, EVENT_TIMED_PAUSE, reason, SEVERITY_PAUSE))
    }

    pub fn unpause(&mut self, actor: Pubkey) -> Result<SecurityEventDetected> {
        self.roles.authorize(&actor, Role::EmergencyResponder)?;
        self.pause.unpause()?;
        self.stats.record_unpause();
        Ok(pause_event(actor, EVENT_SYSTEM_UNPAUSED, UNPAUSE_DESCRIPTION, SEVERITY_UNPAUSE))
    }

    pub fn ensure_not_paused(&self, clock: &impl TimeSource) -> Result<()> {
        self.pause.ensure_not_paused(clock.unix_timestamp()?)
    }

    pub fn pause_info(&self, clock: &impl TimeSource) -> Result<PauseInfo> {
        Ok(self.pause.info(clock.unix_timestamp()?))
    }

    // ---------------------------------------------------------------------
    // circuit breaker
    // ---------------------------------------------------------------------

    pub fn configure_circuit_breaker(
        &mut self,
        sender: &Pubkey,
        max_triggers: u32,
        window_duration: i64,
        is_active: bool,
    ) -> Result<()> {
        self.roles.authorize(sender, Role::Admin)?;
        let config = CircuitBreakerConfig::new(max_triggers, window_duration, is_active)?;
        self.circuit_breaker.configure(config);
        Ok(())
    }

    /// Records one anomaly from an authorized caller. A trip pauses the
    /// system in the same call, attributed to `breaker_identity`.
    pub fn trigger_circuit_breaker(
        &mut self,
        caller: &Pubkey,
        breaker_identity: Pubkey,
        reason: &str,
        clock: &impl TimeSource,
    ) -> Result<BreakerTrip> {
        self.roles.authorize(caller, Role::AuthorizedCaller)?;
        require!(reason.len() <= MAX_REASON_LEN, SecurityError::ReasonTooLong);
        let now = clock.unix_timestamp()?;

        let mut breaker = self.circuit_breaker;
        let tripped = breaker.record_trigger(now)?;

        let mut pause = self.pause.clone();
        let pause_event = if tripped && !pause.is_in_effect(now) {
            pause.pause(reason, now, None)?;
            Some(pause_event(breaker_identity, EVENT_EMERGENCY_PAUSE, reason, SEVERITY_PAUSE))
        } else {
            None
        };

        self.circuit_breaker = breaker;
        self.pause = pause;
        if pause_event.is_some() {
            self.stats.record_pause();
        }

        Ok(BreakerTrip {
            tripped,
            trigger_count: breaker.state.trigger_count,
            pause_event,
        })
    }

    // ---------------------------------------------------------------------
    // rate limiter
    // ---------------------------------------------------------------------

    pub fn configure_rate_limit(
        &mut self,
        sender: &Pubkey,
        max_calls: u64,
        window_seconds: i64,
    ) -> Result<()> {
        self.roles.authorize(sender, Role::Admin)?;
        self.rate_limit = RateLimitConfig::new(max_calls, window_seconds)?;
        Ok(())
    }

    pub fn check_rate_limit(&self, bucket: &mut RateLimitBucket, clock: &impl TimeSource) -> Result<()> {
        require!(bucket.user != Pubkey::default(), SecurityError::ZeroAddress);
        bucket.consume(&self.rate_limit, clock.unix_timestamp()?)
    }

    pub fn reset_rate_limit(
        &self,
        sender: &Pubkey,
        bucket: &mut RateLimitBucket,
        clock: &impl TimeSource,
    ) -> Result<()> {
        self.roles.authorize(sender, Role::Admin)?;
        bucket.reset(clock.unix_timestamp()?);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // auto pause
    // ---------------------------------------------------------------------

    pub fn configure_auto_pause(
        &mut self,
        sender: &Pubkey,
        condition_type: &str,
        threshold: u128,
        comparison: Comparison,
        enabled: bool,
        cooldown: i64,
    ) -> Result<()> {
        self.roles.authorize(sender, Role::Admin)?;
        self.auto_pause
            .configure(condition_type, threshold, comparison, enabled, cooldown)
    }

    /// Compares an observed metric against its auto-pause condition and
    /// pauses the system when the condition fires.
    pub fn report_metric(
        &mut self,
        caller: &Pubkey,
        reporter_identity: Pubkey,
        condition_type: &str,
        observed: u128,
        clock: &impl TimeSource,
    ) -> Result<Option<SecurityEventDetected>> {
        self.roles.authorize(caller, Role::AuthorizedCaller)?;
        let now = clock.unix_timestamp()?;

        let condition = self
            .auto_pause
            .find(condition_type)
            .ok_or(SecurityError::UnknownCondition)?;
        if self.pause.is_in_effect(now) || !condition.is_breached(observed, now) {
            return Ok(None);
        }

        self.pause.pause(condition_type, now, None)?;
        if let Some(condition) = self.auto_pause.find_mut(condition_type) {
            condition.last_triggered = Some(now);
        }
        self.stats.record_pause();
        Ok(Some(pause_event(
            reporter_identity,
            EVENT_AUTO_PAUSE,
            condition_type,
            SEVERITY_AUTO_PAUSE,
        )))
    }

    // ---------------------------------------------------------------------
    // views
    // ---------------------------------------------------------------------

    pub fn security_stats(&self, clock: &impl TimeSource) -> Result<SecurityStatsView> {
        let now = clock.unix_timestamp()?;
        Ok(SecurityStatsView {
            total_events: self.stats.total_events,
            total_pauses: self.stats.total_pauses,
            system_paused: self.pause.is_in_effect(now),
        })
    }
}

fn pause_event(actor: Pubkey, event_type: &str, description: &str, severity: u8) -> SecurityEventDetected {
    SecurityEventDetected {
        actor,
        event_type: event_type.to_string(),
        description: description.to_string(),
        severity,
    }
}
