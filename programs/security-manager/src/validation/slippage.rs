use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::errors::SecurityError;

/// Shortfall of `actual_amount_out` against a 1:1 expectation from
/// `amount_in`, in basis points rounded half up. Zero when the trade
/// returned at least as much as it put in.
pub fn slippage_bps(amount_in: u64, actual_amount_out: u64) -> u128 {
    let amount_in = amount_in as u128;
    let shortfall = amount_in.saturating_sub(actual_amount_out as u128);
    (shortfall * BPS_DENOMINATOR + amount_in / 2) / amount_in
}

/// Hot-path trade check: a handful of comparisons, no allocation.
pub fn validate_slippage(
    amount_in: u64,
    amount_out_min: u64,
    amount_out_max: u64,
    actual_amount_out: u64,
    max_slippage_bps: u16,
) -> Result<()> {
    require!(amount_in > 0, SecurityError::InvalidAmount);
    require!(amount_out_min <= amount_out_max, SecurityError::InvalidAmount);
    require!(
        actual_amount_out >= amount_out_min && actual_amount_out <= amount_out_max,
        SecurityError::SlippageTooHigh
    );
    require!(
        slippage_bps(amount_in, actual_amount_out) <= max_slippage_bps as u128,
        SecurityError::SlippageTooHigh
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;

    const ONE: u64 = 1_000_000_000_000_000_000;

    fn units(hundredths: u64) -> u64 {
        ONE / 100 * hundredths
    }

    #[test]
    fn exact_output_passes() {
        validate_slippage(ONE, units(95), units(105), ONE, 500).unwrap();
    }

    #[test]
    fn output_below_minimum_is_rejected() {
        assert_eq!(
            validate_slippage(ONE, units(95), units(105), units(80), 500).unwrap_err(),
            Error::from(SecurityError::SlippageTooHigh)
        );
    }

    #[test]
    fn output_above_maximum_is_rejected() {
        assert_eq!(
            validate_slippage(ONE, units(95), units(105), units(106), 500).unwrap_err(),
            Error::from(SecurityError::SlippageTooHigh)
        );
    }

    #[test]
    fn within_bounds_but_over_tolerance_is_rejected() {
        // 7% shortfall against a 5% tolerance
        assert_eq!(
            validate_slippage(ONE, units(90), units(105), units(93), 500).unwrap_err(),
            Error::from(SecurityError::SlippageTooHigh)
        );
        validate_slippage(ONE, units(90), units(105), units(93), 700).unwrap();
    }

    #[test]
    fn surplus_output_has_zero_slippage() {
        assert_eq!(slippage_bps(ONE, units(104)), 0);
        validate_slippage(ONE, units(95), units(105), units(104), 0).unwrap();
    }

    #[test]
    fn slippage_rounds_half_up() {
        assert_eq!(slippage_bps(20_000, 19_999), 1);
        assert_eq!(slippage_bps(30_000, 29_999), 0);
        assert_eq!(slippage_bps(3, 2), 3_333);
    }

    #[test]
    fn degenerate_inputs_are_invalid() {
        assert_eq!(
            validate_slippage(0, 0, 10, 5, 500).unwrap_err(),
            Error::from(SecurityError::InvalidAmount)
        );
        assert_eq!(
            validate_slippage(ONE, units(105), units(95), ONE, 500).unwrap_err(),
            Error::from(SecurityError::InvalidAmount)
        );
    }

    #[test]
    fn extreme_amounts_do_not_overflow() {
        assert_eq!(slippage_bps(u64::MAX, 0), 10_000);
        validate_slippage(u64::MAX, 0, u64::MAX, u64::MAX, 0).unwrap();
    }
}
