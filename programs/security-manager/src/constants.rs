pub const SECURITY_MANAGER_SEED: &[u8] = b"security_manager";
pub const RATE_LIMIT_SEED: &[u8] = b"rate_limit";

// circuit breaker defaults: 5 triggers per hour
pub const DEFAULT_MAX_TRIGGERS: u32 = 5;
pub const DEFAULT_BREAKER_WINDOW_SECONDS: i64 = 60 * 60;

// per-user quota: 10 calls per minute
pub const DEFAULT_RATE_LIMIT_MAX_CALLS: u64 = 10;
pub const DEFAULT_RATE_LIMIT_WINDOW_SECONDS: i64 = 60;

pub const MAX_PAUSE_DURATION_SECONDS: i64 = 7 * 24 * 60 * 60;
// upper bound for breaker and rate-limit windows
pub const MAX_WINDOW_SECONDS: i64 = 30 * 24 * 60 * 60;

pub const BPS_DENOMINATOR: u128 = 10_000;

// account capacity bounds
pub const MAX_ADMINS: usize = 4;
pub const MAX_EMERGENCY_RESPONDERS: usize = 8;
pub const MAX_AUTHORIZED_CALLERS: usize = 16;
pub const MAX_AUTO_PAUSE_CONDITIONS: usize = 4;
pub const MAX_REASON_LEN: usize = 128;
pub const MAX_CONDITION_TYPE_LEN: usize = 32;

// SecurityEventDetected labels
pub const EVENT_EMERGENCY_PAUSE: &str = "EMERGENCY_PAUSE";
pub const EVENT_TIMED_PAUSE: &str = "TIMED_PAUSE";
pub const EVENT_AUTO_PAUSE: &str = "AUTO_PAUSE";
pub const EVENT_SYSTEM_UNPAUSED: &str = "SYSTEM_UNPAUSED";
pub const UNPAUSE_DESCRIPTION: &str = "System resumed";

pub const SEVERITY_PAUSE: u8 = 10;
pub const SEVERITY_AUTO_PAUSE: u8 = 8;
pub const SEVERITY_UNPAUSE: u8 = 5;
