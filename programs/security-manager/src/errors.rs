use anchor_lang::prelude::*;

#[error_code]
pub enum SecurityError {
    #[msg("Missing required role")]
    MissingRequiredRole,

    #[msg("Not emergency responder")]
    NotEmergencyResponder,

    #[msg("Caller is not an authorized contract")]
    NotAuthorizedCaller,

    #[msg("System is paused.")]
    SystemPaused,

    #[msg("System is not paused.")]
    SystemNotPaused,

    #[msg("System is already paused.")]
    AlreadyPaused,

    #[msg("Cannot remove the last admin.")]
    LastAdmin,

    #[msg("RateLimitExceeded")]
    RateLimitExceeded,

    #[msg("SlippageTooHigh")]
    SlippageTooHigh,

    #[msg("Invalid configuration values.")]
    InvalidConfig,

    #[msg("Invalid amount.")]
    InvalidAmount,

    #[msg("Pause duration must be between 1 second and 7 days.")]
    InvalidPauseDuration,

    #[msg("Reason is too long.")]
    ReasonTooLong,

    #[msg("Zero address not allowed")]
    ZeroAddress,

    #[msg("Role capacity exceeded.")]
    RoleCapacityExceeded,

    #[msg("Too many auto-pause conditions.")]
    ConditionCapacityExceeded,

    #[msg("Unknown auto-pause condition.")]
    UnknownCondition,

    #[msg("Arithmetic overflow.")]
    MathOverflow,
}
