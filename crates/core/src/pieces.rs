//! Pieces module - tetromino shape catalog
//!
//! Every kind has exactly four rotation states. Shapes are stored as four mino
//! offsets `(dx, dy)` from the top-left corner of their bounding box, together
//! with the bounding box itself. Kinds with rotational symmetry repeat shapes:
//! O is identical in all states, I/S/Z repeat states 0 and 1.
//!
//! The table is static data; lookups never allocate.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to the shape's top-left corner
pub type MinoOffset = (i8, i8);

/// One kind at one rotation: four minos inside a `width` x `height` box (<= 4x4)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    minos: [MinoOffset; 4],
    width: u8,
    height: u8,
}

impl Shape {
    const fn new(minos: [MinoOffset; 4], width: u8, height: u8) -> Self {
        Self {
            minos,
            width,
            height,
        }
    }

    /// Mino offsets, row-major within the bounding box
    pub fn minos(&self) -> &[MinoOffset; 4] {
        &self.minos
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the bounding-box cell `(dx, dy)` is part of the shape
    pub fn is_filled(&self, dx: i8, dy: i8) -> bool {
        self.minos.contains(&(dx, dy))
    }
}

const I_FLAT: Shape = Shape::new([(0, 0), (1, 0), (2, 0), (3, 0)], 4, 1);
const I_TALL: Shape = Shape::new([(0, 0), (0, 1), (0, 2), (0, 3)], 1, 4);

const O_SQUARE: Shape = Shape::new([(0, 0), (1, 0), (0, 1), (1, 1)], 2, 2);

// .#.    #.    ###    .#
// ###    ##    .#.    ##
//        #.           .#
const T_SHAPES: [Shape; 4] = [
    Shape::new([(1, 0), (0, 1), (1, 1), (2, 1)], 3, 2),
    Shape::new([(0, 0), (0, 1), (1, 1), (0, 2)], 2, 3),
    Shape::new([(0, 0), (1, 0), (2, 0), (1, 1)], 3, 2),
    Shape::new([(1, 0), (0, 1), (1, 1), (1, 2)], 2, 3),
];

const S_FLAT: Shape = Shape::new([(1, 0), (2, 0), (0, 1), (1, 1)], 3, 2);
const S_TALL: Shape = Shape::new([(0, 0), (0, 1), (1, 1), (1, 2)], 2, 3);

const Z_FLAT: Shape = Shape::new([(0, 0), (1, 0), (1, 1), (2, 1)], 3, 2);
const Z_TALL: Shape = Shape::new([(1, 0), (0, 1), (1, 1), (0, 2)], 2, 3);

// ..#    #.    ###    ##
// ###    #.    #..    .#
//        ##           .#
const L_SHAPES: [Shape; 4] = [
    Shape::new([(2, 0), (0, 1), (1, 1), (2, 1)], 3, 2),
    Shape::new([(0, 0), (0, 1), (0, 2), (1, 2)], 2, 3),
    Shape::new([(0, 0), (1, 0), (2, 0), (0, 1)], 3, 2),
    Shape::new([(0, 0), (1, 0), (1, 1), (1, 2)], 2, 3),
];

// #..    ##    ###    .#
// ###    #.    ..#    .#
//        #.           ##
const J_SHAPES: [Shape; 4] = [
    Shape::new([(0, 0), (0, 1), (1, 1), (2, 1)], 3, 2),
    Shape::new([(0, 0), (1, 0), (0, 1), (0, 2)], 2, 3),
    Shape::new([(0, 0), (1, 0), (2, 0), (2, 1)], 3, 2),
    Shape::new([(1, 0), (1, 1), (0, 2), (1, 2)], 2, 3),
];

/// Catalog indexed by `[PieceKind::index()][Rotation::index()]`
static SHAPES: [[Shape; 4]; 7] = [
    [I_FLAT, I_TALL, I_FLAT, I_TALL],
    [O_SQUARE, O_SQUARE, O_SQUARE, O_SQUARE],
    T_SHAPES,
    [S_FLAT, S_TALL, S_FLAT, S_TALL],
    [Z_FLAT, Z_TALL, Z_FLAT, Z_TALL],
    J_SHAPES,
    L_SHAPES,
];

/// Get the shape for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> &'static Shape {
    &SHAPES[kind.index()][rotation.index() as usize]
}

/// Shape shown for a piece that has not been placed yet
pub fn get_preview_shape(kind: PieceKind) -> &'static Shape {
    get_shape(kind, Rotation::North)
}
