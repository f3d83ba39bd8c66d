//! Column configuration.

use crate::arena::DEFAULT_BLOCK_SIZE;
use serde::{Deserialize, Serialize};

/// Default number of rows expected to share one block.
///
/// Assumes values of roughly 40 bytes, so 100 rows fit a 4 KB block.
pub const DEFAULT_ROWS_PER_BLOCK_HINT: usize = 100;

/// Configuration for a column's block arena.
///
/// Columns produced by `slice` and `clone_empty` inherit the configuration
/// of their source.
///
/// # Example
///
/// ```
/// use ixcol_core::ColumnConfig;
///
/// let config = ColumnConfig::default().with_block_size(64 * 1024);
/// assert_eq!(config.block_size, 65_536);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Minimum capacity of a newly allocated block in bytes.
    ///
    /// Values longer than this get a block of their own length.
    #[serde(default = "default_block_size")]
    pub block_size: usize,

    /// Expected rows per block, used to pre-size the block list when a
    /// capacity is reserved up front.
    #[serde(default = "default_rows_per_block_hint")]
    pub rows_per_block_hint: usize,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
            rows_per_block_hint: default_rows_per_block_hint(),
        }
    }
}

impl ColumnConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the block size.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Set the rows-per-block hint.
    pub fn with_rows_per_block_hint(mut self, rows: usize) -> Self {
        self.rows_per_block_hint = rows;
        self
    }

    /// Number of block slots to reserve for `rows` expected rows.
    ///
    /// Always at least one.
    #[must_use]
    pub fn blocks_for_rows(&self, rows: usize) -> usize {
        (rows / self.rows_per_block_hint.max(1)).max(1)
    }
}

fn default_block_size() -> usize {
    DEFAULT_BLOCK_SIZE
}

fn default_rows_per_block_hint() -> usize {
    DEFAULT_ROWS_PER_BLOCK_HINT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ColumnConfig::new();
        assert_eq!(config.block_size, 4096);
        assert_eq!(config.rows_per_block_hint, 100);
    }

    #[test]
    fn builder() {
        let config = ColumnConfig::default()
            .with_block_size(128)
            .with_rows_per_block_hint(8);
        assert_eq!(config.block_size, 128);
        assert_eq!(config.rows_per_block_hint, 8);
    }

    #[test]
    fn blocks_for_rows() {
        let config = ColumnConfig::default();
        assert_eq!(config.blocks_for_rows(0), 1);
        assert_eq!(config.blocks_for_rows(99), 1);
        assert_eq!(config.blocks_for_rows(1000), 10);

        // A zero hint must not divide by zero
        let config = config.with_rows_per_block_hint(0);
        assert_eq!(config.blocks_for_rows(5), 5);
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: ColumnConfig = serde_json::from_str(r#"{"block_size": 512}"#).unwrap();
        assert_eq!(config.block_size, 512);
        assert_eq!(config.rows_per_block_hint, DEFAULT_ROWS_PER_BLOCK_HINT);

        let config: ColumnConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ColumnConfig::default());
    }
}
