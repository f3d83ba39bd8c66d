//! Memory usage snapshots.

use serde::Serialize;

/// Snapshot of how much memory a column holds and how much of it is used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ArenaStats {
    /// Number of allocated blocks.
    pub blocks: usize,
    /// Sum of block capacities in bytes.
    pub reserved_bytes: usize,
    /// Bytes handed out from blocks.
    pub used_bytes: usize,
    /// Number of moved-in overflow entries.
    pub overflow_entries: usize,
    /// Bytes held by overflow entries.
    pub overflow_bytes: usize,
}

impl ArenaStats {
    /// Bytes reserved in blocks but never handed out.
    ///
    /// Includes the tails abandoned when a value did not fit into the last
    /// block.
    #[must_use]
    pub fn wasted_bytes(&self) -> usize {
        self.reserved_bytes - self.used_bytes
    }

    /// Fraction of reserved block bytes in use (1.0 when nothing is reserved).
    #[must_use]
    pub fn utilization(&self) -> f64 {
        if self.reserved_bytes == 0 {
            return 1.0;
        }
        self.used_bytes as f64 / self.reserved_bytes as f64
    }

    /// Total bytes owned by the column (blocks plus overflow entries).
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.reserved_bytes + self.overflow_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stats() {
        let stats = ArenaStats::default();
        assert_eq!(stats.wasted_bytes(), 0);
        assert_eq!(stats.utilization(), 1.0);
        assert_eq!(stats.total_bytes(), 0);
    }

    #[test]
    fn utilization_ratio() {
        let stats = ArenaStats {
            blocks: 1,
            reserved_bytes: 200,
            used_bytes: 50,
            overflow_entries: 2,
            overflow_bytes: 30,
        };
        assert_eq!(stats.wasted_bytes(), 150);
        assert_eq!(stats.utilization(), 0.25);
        assert_eq!(stats.total_bytes(), 230);
    }
}
