use anchor_lang::prelude::*;

use crate::constants::{MAX_AUTO_PAUSE_CONDITIONS, MAX_CONDITION_TYPE_LEN};
use crate::errors::SecurityError;

/// Side of the threshold on which a condition fires.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    /// Fires when `observed >= threshold`.
    Above,
    /// Fires when `observed < threshold`.
    Below,
}

impl Comparison {
    fn crossed(self, observed: u128, threshold: u128) -> bool {
        match self {
            Comparison::Above => observed >= threshold,
            Comparison::Below => observed < threshold,
        }
    }
}

/// A metric threshold that halts the system when crossed, e.g.
/// `PRICE_DEVIATION` above 2500 bps or `LOW_LIQUIDITY` below 1e22.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct AutoPauseCondition {
    pub condition_type: String,
    pub threshold: u128,
    pub comparison: Comparison,
    pub enabled: bool,
    pub cooldown: i64,
    pub last_triggered: Option<i64>,
}

impl AutoPauseCondition {
    pub const LEN: usize = (4 + MAX_CONDITION_TYPE_LEN)  // condition_type
        + 16                                            // threshold
        + 1                                             // comparison
        + 1                                             // enabled
        + 8                                             // cooldown
        + (1 + 8);                                      // last_triggered

    pub fn is_breached(&self, observed: u128, now: i64) -> bool {
        self.enabled
            && self.comparison.crossed(observed, self.threshold)
            && self
                .last_triggered
                .map_or(true, |at| now.saturating_sub(at) >= self.cooldown)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AutoPauseRules {
    pub conditions: Vec<AutoPauseCondition>,
}

impl AutoPauseRules {
    pub const LEN: usize = 4 + AutoPauseCondition::LEN * MAX_AUTO_PAUSE_CONDITIONS;

    /// Inserts a new condition or replaces the one with the same type.
    /// Replacing keeps the cooldown clock of the existing entry.
    pub fn configure(
        &mut self,
        condition_type: &str,
        threshold: u128,
        comparison: Comparison,
        enabled: bool,
        cooldown: i64,
    ) -> Result<()> {
        require!(
            !condition_type.is_empty() && condition_type.len() <= MAX_CONDITION_TYPE_LEN,
            SecurityError::InvalidConfig
        );
        require!(cooldown >= 0, SecurityError::InvalidConfig);

        if let Some(existing) = self.find_mut(condition_type) {
            existing.threshold = threshold;
            existing.comparison = comparison;
            existing.enabled = enabled;
            existing.cooldown = cooldown;
            return Ok(());
        }

        require!(
            self.conditions.len() < MAX_AUTO_PAUSE_CONDITIONS,
            SecurityError::ConditionCapacityExceeded
        );
        self.conditions.push(AutoPauseCondition {
            condition_type: condition_type.to_string(),
            threshold,
            comparison,
            enabled,
            cooldown,
            last_triggered: None,
        });
        Ok(())
    }

    pub fn find(&self, condition_type: &str) -> Option<&AutoPauseCondition> {
        self.conditions.iter().find(|c| c.condition_type == condition_type)
    }

    pub fn find_mut(&mut self, condition_type: &str) -> Option<&mut AutoPauseCondition> {
        self.conditions.iter_mut().find(|c| c.condition_type == condition_type)
    }
}
