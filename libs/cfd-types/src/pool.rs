use crate::Side;
use soroban_sdk::{contracttype, Address};

/// Ledger of the pool - stored in Instance storage, rewritten by every
/// successful mint, redeem and rebalance
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    /// Collateral backing the long side
    pub collateral_long: u128,
    /// Collateral backing the short side
    pub collateral_short: u128,
    /// Price the long side is marked against (PRICE_SCALE)
    pub reference_price_long: u128,
    /// Price the short side is marked against (PRICE_SCALE)
    pub reference_price_short: u128,
    /// Outstanding long exposure-token units
    pub supply_long: u128,
    /// Outstanding short exposure-token units
    pub supply_short: u128,
    /// Mint fee in basis points
    pub fee_bps: u32,
    /// Oracle round of the last mark
    pub last_rebalance_round: u64,
    /// Long collateral was wiped out while units were outstanding
    pub long_wiped: bool,
    /// Short collateral was wiped out while units were outstanding
    pub short_wiped: bool,
}

impl PoolState {
    pub fn new(fee_bps: u32) -> Self {
        Self {
            collateral_long: 0,
            collateral_short: 0,
            reference_price_long: 0,
            reference_price_short: 0,
            supply_long: 0,
            supply_short: 0,
            fee_bps,
            last_rebalance_round: 0,
            long_wiped: false,
            short_wiped: false,
        }
    }

    pub fn collateral(&self, side: Side) -> u128 {
        match side {
            Side::Long => self.collateral_long,
            Side::Short => self.collateral_short,
        }
    }

    pub fn set_collateral(&mut self, side: Side, value: u128) {
        match side {
            Side::Long => self.collateral_long = value,
            Side::Short => self.collateral_short = value,
        }
    }

    pub fn supply(&self, side: Side) -> u128 {
        match side {
            Side::Long => self.supply_long,
            Side::Short => self.supply_short,
        }
    }

    pub fn set_supply(&mut self, side: Side, value: u128) {
        match side {
            Side::Long => self.supply_long = value,
            Side::Short => self.supply_short = value,
        }
    }

    /// Units are outstanding but the side's collateral was wiped out.
    /// Mint prices against this marker, not against a zero balance.
    pub fn is_wiped(&self, side: Side) -> bool {
        match side {
            Side::Long => self.long_wiped,
            Side::Short => self.short_wiped,
        }
    }

    pub fn set_wiped(&mut self, side: Side, wiped: bool) {
        match side {
            Side::Long => self.long_wiped = wiped,
            Side::Short => self.short_wiped = wiped,
        }
    }

    /// Both sides are always marked together
    pub fn set_reference_price(&mut self, price: u128) {
        self.reference_price_long = price;
        self.reference_price_short = price;
    }

    /// Collateral the pool must be custodying
    pub fn total_collateral(&self) -> Option<u128> {
        self.collateral_long.checked_add(self.collateral_short)
    }
}

/// Pool configuration - immutable after initialization
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// Price oracle contract
    pub oracle: Address,
    /// Token deposited as collateral
    pub collateral_token: Address,
    /// Exposure token for the long side
    pub long_token: Address,
    /// Exposure token for the short side
    pub short_token: Address,
    /// Fee recipient
    pub treasury: Address,
    /// Maximum age of an oracle round, in seconds
    pub max_price_age: u64,
    /// Exponent of the exposure curve (1 = linear)
    pub leverage: u32,
}

impl PoolConfig {
    pub fn token(&self, side: Side) -> &Address {
        match side {
            Side::Long => &self.long_token,
            Side::Short => &self.short_token,
        }
    }
}

// ============================================================================
// REBALANCE COMPUTATION TYPES
// ============================================================================

/// Result of pricing a mark-to-market move (pure computation)
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RebalanceDelta {
    /// Collateral moved from short to long (negative: long to short)
    pub delta: i128,
    /// Long collateral reached zero
    pub long_wiped: bool,
    /// Short collateral reached zero
    pub short_wiped: bool,
}

impl RebalanceDelta {
    pub fn none() -> Self {
        Self::default()
    }
}
