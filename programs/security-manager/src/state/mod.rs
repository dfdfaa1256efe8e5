pub mod auto_pause;
pub mod circuit_breaker;
pub mod manager;
pub mod pause;
pub mod rate_limit;
pub mod roles;
pub mod stats;

pub use auto_pause::{AutoPauseCondition, AutoPauseRules, Comparison};
pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerState};
pub use manager::{BreakerTrip, SecurityManager, SecurityManagerConfig};
pub use pause::{PauseInfo, PauseState};
pub use rate_limit::{RateLimitBucket, RateLimitConfig};
pub use roles::{Role, RoleRegistry};
pub use stats::{SecurityStats, SecurityStatsView};
