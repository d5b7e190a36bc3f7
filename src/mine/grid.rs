//! Rock grid layout — maps a linear cell index onto the 4x4 mine face.

use bevy::prelude::*;

use crate::shared::{GRID_DIM, ROCK_SPACING};

/// World (x, y) of a cell's center. Column-major: index / 4 picks the
/// column (x), index % 4 the row (y), both centered on the origin.
pub fn rock_coord(index: usize) -> Vec2 {
    let x = (index / GRID_DIM) as f32 - 1.5;
    let y = (index % GRID_DIM) as f32 - 1.5;
    Vec2::new(x * ROCK_SPACING, y * ROCK_SPACING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_cells() {
        assert_eq!(rock_coord(0), Vec2::new(-2.4, -2.4));
        assert_eq!(rock_coord(3), Vec2::new(-2.4, 2.4));
        assert_eq!(rock_coord(12), Vec2::new(2.4, -2.4));
        assert_eq!(rock_coord(15), Vec2::new(2.4, 2.4));
    }

    #[test]
    fn test_grid_is_centered_and_evenly_spaced() {
        let sum: Vec2 = (0..16).map(rock_coord).sum();
        assert!(sum.length() < 1e-5, "grid should be centered on the origin");

        // Adjacent rows within a column are exactly one spacing apart.
        for col in 0..4 {
            for row in 0..3 {
                let a = rock_coord(col * 4 + row);
                let b = rock_coord(col * 4 + row + 1);
                assert!((b.y - a.y - ROCK_SPACING).abs() < 1e-6);
                assert_eq!(a.x, b.x);
            }
        }
    }

    #[test]
    fn test_all_cells_distinct() {
        for i in 0..16 {
            for j in (i + 1)..16 {
                assert_ne!(rock_coord(i), rock_coord(j), "cells {} and {}", i, j);
            }
        }
    }
}
