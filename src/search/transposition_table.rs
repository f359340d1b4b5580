//! Fixed-size transposition table, direct-mapped by Zobrist key.
//!
//! A probe hits only when the stored 64-bit key matches exactly and the
//! stored depth is at least the probed depth; replacement is
//! depth-preferred. The table is advisory: a worker owns its table outright
//! and throws it away when its search call ends.

pub const DEFAULT_LOG2_ENTRIES: u32 = 20;

#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    pub key: u64,
    pub depth: u8,
    pub score: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    index_mask: usize,
    stats: TTStats,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::with_log2_entries(DEFAULT_LOG2_ENTRIES)
    }

    /// A table of `2^log2_entries` slots; deep searches on many-core
    /// machines can tune this down to bound per-worker memory.
    pub fn with_log2_entries(log2_entries: u32) -> Self {
        let count = 1usize << log2_entries.clamp(4, 26);
        Self {
            entries: vec![None; count],
            index_mask: count - 1,
            stats: TTStats::default(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    #[inline]
    fn slot(&self, key: u64) -> usize {
        (key as usize) & self.index_mask
    }

    /// Return the stored score for `key` when it was computed at `depth` or
    /// deeper.
    pub fn probe(&mut self, key: u64, depth: u8) -> Option<i32> {
        self.stats.probes += 1;
        let hit = self.entries[self.slot(key)]
            .filter(|entry| entry.key == key && entry.depth >= depth)
            .map(|entry| entry.score);
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    /// Depth-preferred replacement: equal-or-deeper results overwrite the
    /// slot, shallower ones are dropped.
    pub fn store(&mut self, key: u64, depth: u8, score: i32) {
        let slot = self.slot(key);
        let replace = match self.entries[slot] {
            None => true,
            Some(existing) => depth >= existing.depth,
        };
        if replace {
            self.entries[slot] = Some(TTEntry { key, depth, score });
            self.stats.stores += 1;
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
