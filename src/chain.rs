//! # Chain
//!
//! A chain is a buffer of pointer-sized cells in which every cell stores the index of the next
//! cell to visit. The cells are linked in permutation order so the whole buffer forms a single
//! cycle: following `next` from any cell touches every other cell exactly once before coming back.
//! Storing indices rather than raw addresses keeps the layout (one `usize` per cell) and the
//! load-to-load dependency of a classic pointer chase without any pointer arithmetic on our side.
use crate::config::Config;
use crate::error::BenchError;
use crate::format_size;
use crate::permutation::{PermutationKind, RandomPermutation, bit_reversal};
use log::debug;

/// Size in bytes of one chain cell
pub const CELL_SIZE: usize = std::mem::size_of::<usize>();

/// Single cycle over all cells of a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    /// `cells[i]` is the index of the cell visited after `i`. Always `< cells.len()`.
    cells: Vec<usize>,
}

impl Chain {
    /// Number of cells in the cycle
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false, a chain holds at least one cell
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bytes occupied by the cells
    pub fn size_bytes(&self) -> usize {
        self.cells.len() * CELL_SIZE
    }

    /// Cell visited after `cell`
    pub fn successor(&self, cell: usize) -> usize {
        self.cells[cell]
    }

    /// Read-only view of the cells
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// Endless iterator over the cells visited when chasing from `start` (excluding `start`)
    pub fn walk(&self, start: usize) -> Walk<'_> {
        assert!(start < self.len(), "start cell {start} outside chain of {}", self.len());
        Walk {
            chain: self,
            current: start,
        }
    }
}

/// Iterator returned by [`Chain::walk`]
pub struct Walk<'a> {
    chain: &'a Chain,
    current: usize,
}

impl Iterator for Walk<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.current = self.chain.successor(self.current);
        Some(self.current)
    }
}

/// Builds a [`Chain`] for a given buffer size
#[derive(Debug, Clone, Default)]
pub struct ChainBuilder {
    seed: Option<u64>,
    kind: PermutationKind,
}

impl ChainBuilder {
    /// Random ordering, seeded from OS entropy on every build
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder using the seed and ordering of `config`
    pub fn from_config(config: &Config) -> Self {
        ChainBuilder {
            seed: config.seed,
            kind: config.permutation,
        }
    }

    /// Pin the shuffle seed (every build then yields the same chain)
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set the cell ordering
    pub fn kind(mut self, kind: PermutationKind) -> Self {
        self.kind = kind;
        self
    }

    /// Allocate `size_bytes / CELL_SIZE` cells and link them into one cycle.
    ///
    /// Trailing bytes that don't fill a whole cell are ignored. Fails only when the buffer is too
    /// small to hold a single cell.
    pub fn build(&self, size_bytes: usize) -> Result<Chain, BenchError> {
        let len = size_bytes / CELL_SIZE;
        if len == 0 {
            return Err(BenchError::invalid(format!(
                "{size_bytes} bytes cannot hold a single {CELL_SIZE}-byte cell"
            )));
        }

        let order = match self.kind {
            // engine lives for this build only
            PermutationKind::Random => RandomPermutation::new(self.seed).generate(len),
            PermutationKind::BitReversal => bit_reversal(len),
        };

        let mut cells = vec![0usize; len];
        for pair in order.windows(2) {
            cells[pair[0]] = pair[1];
        }
        cells[order[len - 1]] = order[0];

        debug!(
            "Built {} chain of {} cells ({})",
            self.kind,
            len,
            format_size(size_bytes as u64)
        );
        Ok(Chain { cells })
    }
}
