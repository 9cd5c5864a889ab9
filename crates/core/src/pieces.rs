//! Piece catalog - tetromino geometry as static data
//!
//! One data table per kind: rotation state -> 4 (dx, dy) offsets relative
//! to the anchor, with the y axis pointing up. Rotation is integer-indexed
//! modulo the kind's state count (1, 2 or 4 depending on symmetry); there
//! is no per-shape dispatch anywhere else in the engine.
//!
//! Successive indices are one clockwise step apart.

use blockfall_types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Offset of a single cell relative to the piece anchor
pub type CellOffset = (i8, i8);

/// Shape of a piece - 4 cell offsets from the anchor
pub type PieceShape = [CellOffset; 4];

const I_SHAPES: [PieceShape; 2] = [
    [(-1, 0), (0, 0), (1, 0), (2, 0)],
    [(0, 1), (0, 0), (0, -1), (0, -2)],
];

const O_SHAPES: [PieceShape; 1] = [[(0, 0), (1, 0), (0, -1), (1, -1)]];

const T_SHAPES: [PieceShape; 4] = [
    [(-1, 0), (0, 0), (1, 0), (0, -1)],
    [(0, 1), (0, 0), (0, -1), (-1, 0)],
    [(1, 0), (0, 0), (-1, 0), (0, 1)],
    [(0, -1), (0, 0), (0, 1), (1, 0)],
];

const S_SHAPES: [PieceShape; 2] = [
    [(0, 1), (0, 0), (1, 0), (1, -1)],
    [(1, 0), (0, 0), (0, -1), (-1, -1)],
];

const Z_SHAPES: [PieceShape; 2] = [
    [(0, 1), (0, 0), (-1, 0), (-1, -1)],
    [(1, 0), (0, 0), (0, 1), (-1, 1)],
];

const J_SHAPES: [PieceShape; 4] = [
    [(1, 1), (0, 1), (0, 0), (0, -1)],
    [(1, -1), (1, 0), (0, 0), (-1, 0)],
    [(-1, -1), (0, -1), (0, 0), (0, 1)],
    [(-1, 1), (-1, 0), (0, 0), (1, 0)],
];

const L_SHAPES: [PieceShape; 4] = [
    [(-1, 1), (0, 1), (0, 0), (0, -1)],
    [(1, 1), (1, 0), (0, 0), (-1, 0)],
    [(1, -1), (0, -1), (0, 0), (0, 1)],
    [(-1, -1), (-1, 0), (0, 0), (1, 0)],
];

fn shape_table(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
    }
}

/// Number of distinct rotation states for a kind
pub fn rotation_states(kind: PieceKind) -> u8 {
    shape_table(kind).len() as u8
}

/// Get the cell offsets for a kind and rotation index
pub fn offsets(kind: PieceKind, rotation: u8) -> PieceShape {
    let table = shape_table(kind);
    table[rotation as usize % table.len()]
}

/// Next rotation index, one clockwise step
pub fn rotate_cw_index(kind: PieceKind, rotation: u8) -> u8 {
    let states = rotation_states(kind);
    (rotation + 1) % states
}

/// Next rotation index, one counter-clockwise step
pub fn rotate_ccw_index(kind: PieceKind, rotation: u8) -> u8 {
    let states = rotation_states(kind);
    (rotation + states - 1) % states
}

/// Minimum dy among the 4 offsets of a rotation state
pub fn min_y(kind: PieceKind, rotation: u8) -> i8 {
    offsets(kind, rotation)
        .iter()
        .fold(i8::MAX, |min, &(_, dy)| min.min(dy))
}

/// Anchor position for a freshly drawn piece: horizontally just right of
/// center, vertically so the piece enters flush with the top rows
pub fn spawn_anchor(kind: PieceKind) -> (i8, i8) {
    (
        BOARD_WIDTH as i8 / 2 + 1,
        BOARD_HEIGHT as i8 - 1 + min_y(kind, 0),
    )
}
