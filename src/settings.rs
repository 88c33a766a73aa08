use std::fmt::Debug;

/// Block size used by [`BlockDeque`](crate::BlockDeque) when none is given.
pub const DEFAULT_BLOCK_SIZE: usize = 16;

/// Blocks are allocated the first time one of their slots is written.
/// A freshly built or freshly grown store only holds the blocks that content actually landed in.
#[derive(Copy, Clone, Debug, Default)]
pub struct Lazy;

/// Every block of the store is allocated as soon as the store is built, including after growth.
#[derive(Copy, Clone, Debug, Default)]
pub struct Eager;

pub enum AllocationStrategy {
    Lazy,
    Eager,
}

pub(crate) mod seal_allocation_policy {
    pub trait Sealed {
        const STRATEGY: super::AllocationStrategy;
    }
}

/// When the blocks backing a [`BlockDeque`](crate::BlockDeque) are allocated.
pub trait AllocationPolicy: seal_allocation_policy::Sealed + Debug + Copy + Default {}

impl seal_allocation_policy::Sealed for Lazy {
    const STRATEGY: AllocationStrategy = AllocationStrategy::Lazy;
}
impl AllocationPolicy for Lazy {}

impl seal_allocation_policy::Sealed for Eager {
    const STRATEGY: AllocationStrategy = AllocationStrategy::Eager;
}
impl AllocationPolicy for Eager {}

pub(crate) const fn is_eager<A: AllocationPolicy>() -> bool {
    matches!(
        <A as seal_allocation_policy::Sealed>::STRATEGY,
        AllocationStrategy::Eager
    )
}
