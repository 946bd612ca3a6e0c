// ============================================================================
// INVARIANTS MODULE
// ============================================================================
//
// Pure predicates expressing the properties the pool must keep. The oracle
// client and the operations use some of them as runtime guards, the tests
// use all of them.
//
// INVARIANT CATEGORIES:
//
// 1. SOLVENCY INVARIANTS
//    - Custodied collateral covers both sides
//    - A payout never exceeds the side it is drawn from
//
// 2. CONSERVATION INVARIANTS
//    - Rebalancing moves collateral, never creates or destroys it
//    - Mint adds exactly the net deposit, redeem removes exactly the payout
//
// 3. PRICE INVARIANTS
//    - Both sides are marked against the same reference price
//    - Oracle rounds never go backwards
//    - A round is no older than the age limit and not from the future
//
// 4. FEE INVARIANTS
//    - Fee is within [0, 100%] and never exceeds the deposit
//
// ============================================================================

use cfd_types::{PoolState, MAX_FEE_BPS};

// ============================================================================
// SOLVENCY INVARIANTS
// ============================================================================

/// Invariant: the pool holds at least what its ledger says it owes
///
/// Property:
///   custodied >= collateral_long + collateral_short
pub fn custody_covers_state(state: &PoolState, custodied: i128) -> bool {
    match state.total_collateral() {
        Some(total) => custodied >= 0 && (custodied as u128) >= total,
        None => false,
    }
}

/// Invariant: a redemption is paid from the side's own collateral
///
/// Property:
///   collateral_out <= collateral[side]
pub fn payout_covered(collateral_out: u128, side_collateral: u128) -> bool {
    collateral_out <= side_collateral
}

/// Invariant: a side with no units has nothing to be wiped
///
/// Property:
///   wiped[side] => supply[side] > 0
pub fn wiped_sides_have_holders(state: &PoolState) -> bool {
    (!state.long_wiped || state.supply_long > 0) && (!state.short_wiped || state.supply_short > 0)
}

// ============================================================================
// CONSERVATION INVARIANTS
// ============================================================================

/// Invariant: rebalance conserves total collateral
///
/// Property:
///   before.long + before.short == after.long + after.short
pub fn rebalance_conserves(before: &PoolState, after: &PoolState) -> bool {
    before.total_collateral() == after.total_collateral()
}

/// Invariant: a mint grows the ledger by exactly the net deposit
///
/// Property:
///   after.total == before.total + net_in
pub fn mint_conserves(before: &PoolState, after: &PoolState, net_in: u128) -> bool {
    match (before.total_collateral(), after.total_collateral()) {
        (Some(b), Some(a)) => b.checked_add(net_in) == Some(a),
        _ => false,
    }
}

// ============================================================================
// PRICE INVARIANTS
// ============================================================================

/// Invariant: long and short are marked against the same price
pub fn reference_prices_aligned(state: &PoolState) -> bool {
    state.reference_price_long == state.reference_price_short
}

/// Invariant: oracle rounds consumed by the pool never go backwards
///
/// Property:
///   new_round >= last_round
pub fn round_monotonic(last_round: u64, new_round: u64) -> bool {
    new_round >= last_round
}

/// Invariant: an oracle round is used only inside its validity window
///
/// Property:
///   timestamp <= now && now - timestamp <= max_age
pub fn observation_fresh(now: u64, timestamp: u64, max_age: u64) -> bool {
    timestamp <= now && now - timestamp <= max_age
}

// ============================================================================
// FEE INVARIANTS
// ============================================================================

/// Invariant: fee is within valid range
///
/// Property:
///   fee_bps <= 10_000
pub fn fee_valid(state: &PoolState) -> bool {
    state.fee_bps <= MAX_FEE_BPS
}

/// Invariant: fee computation doesn't exceed input amount
///
/// Property:
///   fee_amount <= amount_in
pub fn fee_bounded_by_input(fee_amount: u128, amount_in: u128) -> bool {
    fee_amount <= amount_in
}

// ============================================================================
// TESTS
// ============================================================================
