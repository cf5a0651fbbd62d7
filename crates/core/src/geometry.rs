//! Geometry module - board coordinates and the fixed shape catalog
//!
//! Every shape is described by three offsets relative to its origin cell; the
//! origin itself is the fourth cell. Rotation only ever touches the offsets,
//! so a piece always turns about its origin cell rather than about the center
//! of its bounding box. That is what makes the straight piece pivot off-center.

use crate::types::{ShapeKind, SHAPE_COUNT};

/// Integer board coordinate: `x` is the column, `y` the row (row 0 at the top)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub x: i16,
    pub y: i16,
}

impl Coord {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// (x, y) -> (-y, x)
    pub const fn rotate_clockwise(self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }

    /// (x, y) -> (y, -x)
    pub const fn rotate_counterclockwise(self) -> Self {
        Self {
            x: self.y,
            y: -self.x,
        }
    }

    pub const fn offset(self, dx: i16, dy: i16) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::ops::Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        self.offset(rhs.x, rhs.y)
    }
}

/// Rotate a coordinate a quarter turn clockwise about (0, 0)
pub fn rotate_clockwise(c: Coord) -> Coord {
    c.rotate_clockwise()
}

/// Rotate a coordinate a quarter turn counter-clockwise about (0, 0)
pub fn rotate_counterclockwise(c: Coord) -> Coord {
    c.rotate_counterclockwise()
}

/// Offsets of the three non-origin cells of a shape
pub type ShapeOffsets = [Coord; 3];

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub offsets: ShapeOffsets,
}

const fn shape(kind: ShapeKind, offsets: [(i16, i16); 3]) -> Shape {
    Shape {
        kind,
        offsets: [
            Coord::new(offsets[0].0, offsets[0].1),
            Coord::new(offsets[1].0, offsets[1].1),
            Coord::new(offsets[2].0, offsets[2].1),
        ],
    }
}

/// The shape catalog, indexed by [`ShapeKind::index`]
pub const CATALOG: [Shape; SHAPE_COUNT] = [
    shape(ShapeKind::O, [(1, 0), (0, 1), (1, 1)]),
    shape(ShapeKind::S, [(1, 0), (-1, 1), (0, 1)]),
    shape(ShapeKind::Z, [(0, 1), (1, 1), (-1, 0)]),
    shape(ShapeKind::L, [(0, 1), (0, -1), (1, 1)]),
    shape(ShapeKind::J, [(0, 1), (0, -1), (-1, 1)]),
    shape(ShapeKind::T, [(-1, 0), (1, 0), (0, 1)]),
    shape(ShapeKind::I, [(0, 1), (0, -1), (0, 2)]),
];

/// Look up the catalog entry for a shape kind
pub fn catalog_shape(kind: ShapeKind) -> &'static Shape {
    &CATALOG[kind.index()]
}
