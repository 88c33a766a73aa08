//! Physical storage behind a [`BlockDeque`](crate::BlockDeque).
//!
//! A [`BlockStore`] is a flat run of `blocks.len() * B` physical slots split into fixed-size
//! [`Block`]s. It knows nothing about the circular mapping; callers hand it physical slot numbers.

/// Fixed-capacity storage segment. Empty slots hold `None`.
pub(crate) struct Block<T, const B: usize> {
    items: Box<[Option<T>]>,
}

impl<T, const B: usize> Block<T, B> {
    fn new() -> Self {
        Block {
            items: (0..B).map(|_| None).collect(),
        }
    }
}

/// Ordered blocks, some of which may not be allocated yet.
pub(crate) struct BlockStore<T, const B: usize> {
    blocks: Vec<Option<Block<T, B>>>,
}

impl<T, const B: usize> BlockStore<T, B> {
    /// Builds a store of `block_count` blocks, allocating all of them up front when `eager`.
    pub(crate) fn new(block_count: usize, eager: bool) -> Self {
        let blocks = (0..block_count)
            .map(|_| if eager { Some(Block::new()) } else { None })
            .collect();
        BlockStore { blocks }
    }

    /// Number of blocks needed to hold `capacity` slots, never less than one.
    #[inline]
    pub(crate) fn blocks_for(capacity: usize) -> usize {
        capacity.div_ceil(B).max(1)
    }

    #[inline]
    pub(crate) fn block_count(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.blocks.len() * B
    }

    pub(crate) fn allocated_blocks(&self) -> usize {
        self.blocks.iter().filter(|block| block.is_some()).count()
    }

    #[inline]
    pub(crate) fn get(&self, slot: usize) -> Option<&T> {
        self.blocks[slot / B].as_ref()?.items[slot % B].as_ref()
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.blocks[slot / B].as_mut()?.items[slot % B].as_mut()
    }

    /// Empties `slot`, returning what it held.
    #[inline]
    pub(crate) fn take(&mut self, slot: usize) -> Option<T> {
        self.blocks[slot / B].as_mut()?.items[slot % B].take()
    }

    /// Writes `item` into `slot`, allocating the owning block on first write.
    /// Returns the previous occupant.
    #[inline]
    pub(crate) fn put(&mut self, slot: usize, item: T) -> Option<T> {
        let block = self.blocks[slot / B].get_or_insert_with(Block::new);
        block.items[slot % B].replace(item)
    }

    /// Moves the occupant of `from` into `to`, leaving `from` empty.
    #[inline]
    pub(crate) fn shift(&mut self, from: usize, to: usize) {
        if let Some(item) = self.take(from) {
            self.put(to, item);
        }
    }
}
