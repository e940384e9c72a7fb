//! Pieces module - tetromino geometry and rotation with wall kicks
//!
//! Shapes are authored once per kind at spawn orientation; every other
//! rotation state is derived on demand by repeating the 90° transform
//! `(x, y) -> (-y, x)` (y grows downward, so that is a clockwise turn on
//! screen). Wall kicks use SRS-style candidate tables, tried strictly in
//! order. Reference: https://tetris.wiki/SRS

use blockfall_types::{PieceKind, Rotation, SPAWN_X, SPAWN_Y};

/// Offset of a single cell relative to the piece origin
pub type CellOffset = (i8, i8);

/// Shape of a piece - 4 cell offsets from the piece origin
pub type PieceShape = [CellOffset; 4];

/// Spawn position for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = (SPAWN_X, SPAWN_Y);

/// Base shape of each kind at rotation North, centered on the piece origin
fn base_shape(kind: PieceKind) -> PieceShape {
    match kind {
        PieceKind::I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
        PieceKind::O => [(0, -1), (1, -1), (0, 0), (1, 0)],
        PieceKind::T => [(0, -1), (-1, 0), (0, 0), (1, 0)],
        PieceKind::S => [(0, -1), (1, -1), (-1, 0), (0, 0)],
        PieceKind::Z => [(-1, -1), (0, -1), (0, 0), (1, 0)],
        PieceKind::J => [(-1, -1), (-1, 0), (0, 0), (1, 0)],
        PieceKind::L => [(1, -1), (-1, 0), (0, 0), (1, 0)],
    }
}

/// One clockwise quarter turn of a cell offset
#[inline]
fn rotate_cw_offset((x, y): CellOffset) -> CellOffset {
    (-y, x)
}

/// Get the shape (cell offsets) for a piece kind and rotation
///
/// Pure and total over the 7x4 domain. The O piece is rotation-invariant:
/// all four rotations map to the same offsets.
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    let mut shape = base_shape(kind);
    if kind == PieceKind::O {
        return shape;
    }
    for _ in 0..rotation.quarter_turns() {
        for offset in &mut shape {
            *offset = rotate_cw_offset(*offset);
        }
    }
    shape
}

/// Get initial shape for a new piece at spawn orientation
pub fn get_spawn_shape(kind: PieceKind) -> PieceShape {
    get_shape(kind, Rotation::North)
}

/// Wall kick candidate table
///
/// Each entry is an ordered list of (dx, dy) offsets to try for one
/// rotation transition. The first candidate that does not collide wins;
/// trying them out of order changes which kicks succeed and is an
/// observable behavior difference, so the order is load-bearing.
pub type KickTable = [[(i8, i8); 5]; 8];

/// Get kick table for a piece class
///
/// Two classes exist: the I piece and everything else. O never consults a
/// table because it never changes shape.
pub fn get_kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    }
}

/// Kick table shared by J, L, S, T, Z
const JLSTZ_KICKS: KickTable = [
    // 0->1 (N->E, clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 0->3 (N->W, counter-clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 1->0 (E->N, counter-clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->2 (E->S, clockwise)
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 2->1 (S->E, counter-clockwise)
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 2->3 (S->W, clockwise)
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3->2 (W->S, counter-clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 3->0 (W->N, clockwise)
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// I piece kick table (wider kicks than JLSTZ)
const I_KICKS: KickTable = [
    // 0->1 (N->E)
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 0->3 (N->W)
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 1->0 (E->N)
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 1->2 (E->S)
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->1 (S->E)
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2->3 (S->W)
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3->2 (W->S)
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 3->0 (W->N)
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
];

/// Get the kick index for a rotation transition
fn get_kick_index(from: Rotation, clockwise: bool) -> usize {
    match (from, clockwise) {
        (Rotation::North, true) => 0,  // N->E
        (Rotation::North, false) => 1, // N->W
        (Rotation::East, false) => 2,  // E->N
        (Rotation::East, true) => 3,   // E->S
        (Rotation::South, false) => 4, // S->E
        (Rotation::South, true) => 5,  // S->W
        (Rotation::West, false) => 6,  // W->S
        (Rotation::West, true) => 7,   // W->N
    }
}

/// Try to rotate a piece with wall kicks
///
/// Returns `Some((new_shape, new_rotation, kick_offset))` on success, `None`
/// if every candidate collides (the piece stays unchanged). Rotating an O
/// piece is a no-op success: same shape, same rotation, zero offset.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    clockwise: bool,
    is_valid: impl Fn(i8, i8) -> bool,
) -> Option<(PieceShape, Rotation, (i8, i8))> {
    if kind == PieceKind::O {
        return Some((base_shape(PieceKind::O), rotation, (0, 0)));
    }

    let new_rotation = if clockwise {
        rotation.rotate_cw()
    } else {
        rotation.rotate_ccw()
    };

    let new_shape = get_shape(kind, new_rotation);
    let kick_table = get_kick_table(kind);
    let kicks = &kick_table[get_kick_index(rotation, clockwise)];

    for &(dx, dy) in kicks.iter() {
        let new_x = x + dx;
        let new_y = y + dy;

        let valid = new_shape
            .iter()
            .all(|&(mx, my)| is_valid(new_x + mx, new_y + my));

        if valid {
            return Some((new_shape, new_rotation, (dx, dy)));
        }
    }

    None
}
