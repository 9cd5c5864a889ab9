//! Line clearer - scans and compacts full rows after a lock
//!
//! Runs only as part of the lock sequence, and always to completion: a
//! snapshot can never observe a full row that has not been compacted yet.

use blockfall_types::BOARD_HEIGHT;

use crate::grid::Grid;

/// Remove every full row and return how many were removed.
///
/// Scans from the bottom row up. Compaction shifts the rows above down by
/// one, so the same index is re-examined after each removal rather than
/// advancing; simultaneous full rows at any heights cascade correctly.
pub fn sweep_full_rows(grid: &mut Grid) -> u32 {
    let mut removed = 0u32;
    let mut y = 0usize;
    while y < BOARD_HEIGHT as usize {
        if grid.is_row_full(y) {
            grid.compact_row(y);
            removed += 1;
        } else {
            y += 1;
        }
    }
    removed
}
