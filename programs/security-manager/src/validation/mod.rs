pub mod slippage;
pub mod token;

pub use slippage::{slippage_bps, validate_slippage};
pub use token::{validate_token, TokenProbe};
