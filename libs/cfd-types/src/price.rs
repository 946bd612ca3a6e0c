use soroban_sdk::contracttype;

/// A single attested oracle observation
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceData {
    /// Price of the underlying, scaled by PRICE_SCALE
    pub price: u128,
    /// Oracle round, strictly increasing per update
    pub round: u64,
    /// Ledger timestamp (seconds) at which the round was recorded
    pub timestamp: u64,
}
