//! Piece module - a catalog shape placed on the board
//!
//! A [`Piece`] is a small `Copy` value: origin, the three relative offsets and
//! a color. The session rolls back a rejected move simply by keeping the old
//! value around.

use crate::geometry::{catalog_shape, Coord, CATALOG};
use crate::rng::RandomSource;
use crate::types::{Color, ShapeKind, PALETTE_SIZE, SHAPE_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    /// Absolute position of the origin cell
    pub origin: Coord,
    /// Offsets of the other three cells; only rotation changes them
    pub relative: [Coord; 3],
    pub color: Color,
}

impl Piece {
    /// Place a catalog shape at `origin` in its spawn orientation
    pub fn new(kind: ShapeKind, origin: Coord, color: Color) -> Self {
        Self {
            kind,
            origin,
            relative: catalog_shape(kind).offsets,
            color,
        }
    }

    /// Draw a random color and a random catalog shape, in that order
    ///
    /// No collision check happens here; that is up to the caller.
    pub fn spawn(rng: &mut impl RandomSource, origin: Coord) -> Self {
        let color = Color::from_index(rng.next_range(PALETTE_SIZE as u32));
        let index = rng.next_range(SHAPE_COUNT as u32) as usize;
        let kind = CATALOG[index % SHAPE_COUNT].kind;
        Self::new(kind, origin, color)
    }

    /// The four occupied cells: origin first, then each relative offset
    pub fn cells(&self) -> [Coord; 4] {
        [
            self.origin,
            self.origin + self.relative[0],
            self.origin + self.relative[1],
            self.origin + self.relative[2],
        ]
    }

    pub fn rotate_clockwise(&mut self) {
        for r in &mut self.relative {
            *r = r.rotate_clockwise();
        }
    }

    pub fn rotate_counterclockwise(&mut self) {
        for r in &mut self.relative {
            *r = r.rotate_counterclockwise();
        }
    }

    /// Copy of this piece moved by (dx, dy)
    pub fn shifted(&self, dx: i16, dy: i16) -> Self {
        Self {
            origin: self.origin.offset(dx, dy),
            ..*self
        }
    }

    /// Copy of this piece with its origin moved to `origin`
    pub fn placed_at(&self, origin: Coord) -> Self {
        Self { origin, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u32);

    impl RandomSource for Fixed {
        fn next_range(&mut self, max: u32) -> u32 {
            self.0 % max
        }
    }

    fn red() -> Color {
        Color::new(1).unwrap()
    }

    #[test]
    fn test_cells_origin_first() {
        let p = Piece::new(ShapeKind::T, Coord::new(4, 5), red());
        assert_eq!(
            p.cells(),
            [
                Coord::new(4, 5),
                Coord::new(3, 5),
                Coord::new(5, 5),
                Coord::new(4, 6)
            ]
        );
    }

    #[test]
    fn test_rotation_leaves_origin_alone() {
        let mut p = Piece::new(ShapeKind::I, Coord::new(4, 5), red());
        p.rotate_clockwise();
        assert_eq!(p.origin, Coord::new(4, 5));
        assert_eq!(
            p.relative,
            [Coord::new(-1, 0), Coord::new(1, 0), Coord::new(-2, 0)]
        );
    }

    #[test]
    fn test_straight_piece_pivots_off_center() {
        let mut p = Piece::new(ShapeKind::I, Coord::new(4, 5), red());
        p.rotate_clockwise();
        let xs: Vec<i16> = p.cells().iter().map(|c| c.x).collect();
        // Horizontal after one turn, spanning columns 2..=5 around origin 4.
        assert_eq!(xs.iter().min(), Some(&2));
        assert_eq!(xs.iter().max(), Some(&5));
        assert!(p.cells().iter().all(|c| c.y == 5));
    }

    #[test]
    fn test_clockwise_then_counterclockwise_is_identity() {
        for kind in ShapeKind::ALL {
            let start = Piece::new(kind, Coord::new(4, 4), red());
            let mut p = start;
            p.rotate_clockwise();
            p.rotate_counterclockwise();
            assert_eq!(p, start);
        }
    }

    #[test]
    fn test_spawn_draws_color_then_shape() {
        // Both draws return 3: color index 3 -> color 4, shape index 3 -> L.
        let p = Piece::spawn(&mut Fixed(3), Coord::new(5, 2));
        assert_eq!(p.color.get(), 4);
        assert_eq!(p.kind, ShapeKind::L);
        assert_eq!(p.origin, Coord::new(5, 2));
        assert_eq!(p.relative, catalog_shape(ShapeKind::L).offsets);
    }

    #[test]
    fn test_shifted_and_placed_at() {
        let p = Piece::new(ShapeKind::O, Coord::new(1, 1), red());
        assert_eq!(p.shifted(1, 2).origin, Coord::new(2, 3));
        assert_eq!(p.placed_at(Coord::new(7, 0)).origin, Coord::new(7, 0));
        assert_eq!(p.shifted(1, 2).relative, p.relative);
    }
}
