#![no_std]

mod error;
mod pool;
mod price;
mod side;

pub use error::*;
pub use pool::*;
pub use price::*;
pub use side::*;

/// Fixed-point scale for prices and growth ratios (18 fractional digits)
pub const PRICE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Denominator for fees expressed in basis points
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Highest accepted fee (100%)
pub const MAX_FEE_BPS: u32 = BPS_DENOMINATOR;

/// Highest accepted exposure-curve exponent
pub const MAX_LEVERAGE: u32 = 8;
