use soroban_sdk::contracttype;

/// One of the two complementary exposure pools.
/// Long gains when the price rises, Short gains when it falls.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Side {
    Long = 0,
    Short = 1,
}

