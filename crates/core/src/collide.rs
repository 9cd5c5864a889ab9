//! Collision engine - the single legality authority for placements
//!
//! Gravity steps, lateral moves, rotations, hard drops and spawns all ask
//! the same question here; nothing else in the engine judges placement.

use blockfall_types::PieceKind;

use crate::grid::Grid;
use crate::pieces;

/// Check whether a piece may occupy the grid at the given anchor.
///
/// True iff every one of the 4 cells lands inside
/// `[0, width) x [0, height)` on an empty cell. Pure check; the grid is
/// never touched.
pub fn can_place(grid: &Grid, kind: PieceKind, rotation: u8, x: i8, y: i8) -> bool {
    pieces::offsets(kind, rotation)
        .iter()
        .all(|&(dx, dy)| grid.is_open(x + dx, y + dy))
}
