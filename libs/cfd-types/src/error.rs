use soroban_sdk::contracterror;

/// Failures surfaced by the pool and its math libraries.
///
/// Any of these returned from a pool entry point reverts every mutation
/// performed by that invocation.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    ZeroAmount = 1,
    InsufficientBalance = 2,
    InsufficientPoolCollateral = 3,
    StalePrice = 4,
    OracleUnavailable = 5,
    ArithmeticOverflow = 6,
    DivisionByZero = 7,
    Reentrancy = 8,
    AlreadyInitialized = 9,
    NotInitialized = 10,
    InvalidConfig = 11,
}
