use anchor_lang::prelude::*;

use crate::state::{Comparison, Role};

/// Emitted for every pause and unpause, whoever caused it.
#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityEventDetected {
    pub actor: Pubkey,
    pub event_type: String,
    pub description: String,
    pub severity: u8,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyResponderAdded {
    pub responder: Pubkey,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGranted {
    pub role: Role,
    pub account: Pubkey,
    pub sender: Pubkey,
}

#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRevoked {
    pub role: Role,
    pub account: Pubkey,
    pub sender: Pubkey,
}

#[event]
pub struct ContractAuthorizationChanged {
    pub contract: Pubkey,
    pub enabled: bool,
}

#[event]
pub struct CircuitBreakerConfigured {
    pub max_triggers: u32,
    pub window_duration: i64,
    pub is_active: bool,
}

#[event]
pub struct CircuitBreakerTriggered {
    pub caller: Pubkey,
    pub reason: String,
    pub trigger_count: u32,
    pub tripped: bool,
}

#[event]
pub struct RateLimitConfigured {
    pub max_calls: u64,
    pub window_seconds: i64,
}

#[event]
pub struct AutoPauseConfigured {
    pub condition_type: String,
    pub threshold: u128,
    pub comparison: Comparison,
    pub enabled: bool,
    pub cooldown: i64,
}
