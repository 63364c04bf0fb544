use std::sync::Mutex;

use whirlpool_quote_core::BPS_DENOMINATOR;

use crate::{QuoteError, Result};

/// The default slippage tolerance, expressed in basis points. Value of 100 is equivalent to 1%.
pub const DEFAULT_SLIPPAGE_TOLERANCE_BPS: u16 = 100;

/// The currently selected slippage tolerance, expressed in basis points.
pub static SLIPPAGE_TOLERANCE_BPS: Mutex<u16> = Mutex::new(DEFAULT_SLIPPAGE_TOLERANCE_BPS);

/// Sets the currently selected slippage tolerance, expressed in basis points.
pub fn set_slippage_tolerance_bps(tolerance: u16) -> Result<()> {
    if tolerance > BPS_DENOMINATOR {
        return Err(QuoteError::Config(format!(
            "slippage tolerance {tolerance} bps exceeds {BPS_DENOMINATOR} bps"
        )));
    }
    *SLIPPAGE_TOLERANCE_BPS.try_lock().map_err(lock_error)? = tolerance;
    Ok(())
}

/// Reads the currently selected slippage tolerance.
pub fn slippage_tolerance_bps() -> Result<u16> {
    Ok(*SLIPPAGE_TOLERANCE_BPS.try_lock().map_err(lock_error)?)
}

/// Resets the configuration to its default values.
pub fn reset_configuration() -> Result<()> {
    *SLIPPAGE_TOLERANCE_BPS.try_lock().map_err(lock_error)? = DEFAULT_SLIPPAGE_TOLERANCE_BPS;
    Ok(())
}

fn lock_error<E: std::fmt::Display>(err: E) -> QuoteError {
    QuoteError::Config(err.to_string())
}
