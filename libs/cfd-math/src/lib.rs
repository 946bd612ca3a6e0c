#![no_std]

pub mod full_math;
pub mod position_math;
pub mod rebalance_math;

pub use full_math::*;
pub use position_math::*;
pub use rebalance_math::*;
