//! Pieces module - shape table and rotation states
//!
//! Every shape is a list of rotation states; every state is four cells inside a
//! 4x4 box. Box cells are numbered 0-15 row by row (first line 0-3, second 4-7, ...)
//! and stored here as `(dx, dy)` with `dx = n % 4` and `dy = n / 4`.
//!
//! The box hangs down from its origin: a cell at `(dx, dy)` of a piece whose
//! origin is `(x, y)` occupies grid cell `(x + dx, y - dy)`.
//!
//! Rotation simply advances to the next state in the list and wraps around.
//! There are no wall kicks: a rotation that does not fit is rejected.

use crate::types::ShapeKind;

/// Offset of a single cell inside the 4x4 shape box
pub type CellOffset = (i8, i8);

/// One rotation state - 4 cell offsets
pub type RotationCells = [CellOffset; 4];

/// Static description of one shape
#[derive(Debug)]
pub struct ShapeDef {
    pub kind: ShapeKind,
    pub rotations: &'static [RotationCells],
}

/// Convert four linear box indices into `(dx, dy)` offsets.
const fn box_cells(idx: [u8; 4]) -> RotationCells {
    let mut out = [(0i8, 0i8); 4];
    let mut i = 0;
    while i < 4 {
        out[i] = ((idx[i] % 4) as i8, (idx[i] / 4) as i8);
        i += 1;
    }
    out
}

const I_ROTATIONS: [RotationCells; 2] = [box_cells([2, 6, 10, 14]), box_cells([4, 5, 6, 7])];

const O_ROTATIONS: [RotationCells; 1] = [box_cells([1, 2, 5, 6])];

const T_ROTATIONS: [RotationCells; 4] = [
    box_cells([1, 4, 5, 6]),
    box_cells([1, 4, 5, 9]),
    box_cells([4, 5, 6, 9]),
    box_cells([1, 5, 6, 9]),
];

const J_ROTATIONS: [RotationCells; 4] = [
    box_cells([1, 2, 5, 9]),
    box_cells([0, 4, 5, 6]),
    box_cells([1, 5, 8, 9]),
    box_cells([4, 5, 6, 10]),
];

const L_ROTATIONS: [RotationCells; 4] = [
    box_cells([0, 1, 5, 9]),
    box_cells([4, 5, 6, 8]),
    box_cells([1, 5, 9, 10]),
    box_cells([2, 4, 5, 6]),
];

const S_ROTATIONS: [RotationCells; 2] = [box_cells([1, 5, 6, 10]), box_cells([1, 2, 4, 5])];

const Z_ROTATIONS: [RotationCells; 2] = [box_cells([1, 4, 5, 8]), box_cells([0, 1, 5, 6])];

/// Shape table, in [`ShapeKind::ALL`] order.
static SHAPES: [ShapeDef; 7] = [
    ShapeDef {
        kind: ShapeKind::I,
        rotations: &I_ROTATIONS,
    },
    ShapeDef {
        kind: ShapeKind::O,
        rotations: &O_ROTATIONS,
    },
    ShapeDef {
        kind: ShapeKind::T,
        rotations: &T_ROTATIONS,
    },
    ShapeDef {
        kind: ShapeKind::J,
        rotations: &J_ROTATIONS,
    },
    ShapeDef {
        kind: ShapeKind::L,
        rotations: &L_ROTATIONS,
    },
    ShapeDef {
        kind: ShapeKind::S,
        rotations: &S_ROTATIONS,
    },
    ShapeDef {
        kind: ShapeKind::Z,
        rotations: &Z_ROTATIONS,
    },
];

/// Look up the static definition of a shape.
pub fn shape_def(kind: ShapeKind) -> &'static ShapeDef {
    &SHAPES[kind.index()]
}

/// Number of rotation states of a shape (1, 2 or 4).
pub fn rotation_count(kind: ShapeKind) -> usize {
    shape_def(kind).rotations.len()
}

/// Box offsets for a shape in the given rotation state.
///
/// Panics if `rotation` is not a valid state index for `kind`.
pub fn get_cells(kind: ShapeKind, rotation: u8) -> RotationCells {
    let rotations = shape_def(kind).rotations;
    assert!(
        (rotation as usize) < rotations.len(),
        "rotation {rotation} out of range for {kind:?}"
    );
    rotations[rotation as usize]
}

/// The rotation state after `rotation`, wrapping to 0 past the last one.
pub fn next_rotation(kind: ShapeKind, rotation: u8) -> u8 {
    let next = rotation as usize + 1;
    if next >= rotation_count(kind) {
        0
    } else {
        next as u8
    }
}

/// Absolute grid positions of a shape placed with its box origin at `(x, y)`.
pub fn absolute_cells(kind: ShapeKind, rotation: u8, x: i8, y: i8) -> [(i8, i8); 4] {
    get_cells(kind, rotation).map(|(dx, dy)| (x + dx, y - dy))
}
