//! Axis-aligned collision resolution against the tile grid.
//!
//! Resolution is a pure query: it never mutates the grid and always returns a
//! definite outcome. A rejected displacement is rejected in full; there is no
//! axis-separated sliding along walls.

use glam::Vec2;

use cave_drift_core::{Tile, TileGrid, TileLookup};

/// Outcome of resolving a proposed displacement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    /// Accepted position: the candidate when free, the unchanged current
    /// position when any wall intersected the candidate bounding box.
    pub position: Vec2,
    /// Whether the candidate bounding box intersected a wall tile.
    pub collided: bool,
}

/// Resolves `current + displacement` against wall tiles near the candidate.
///
/// Only the 3x3 tile window centered on the tile containing the candidate
/// position is tested. Callers must keep per-tick displacement at or below one
/// tile length; faster movement would need a wider window. Tiles outside the
/// grid are skipped, so a grid whose edge tiles are open does not fence the
/// crawler in.
#[must_use]
pub fn resolve(grid: &TileGrid, current: Vec2, displacement: Vec2, size: f32) -> Resolution {
    let candidate = current + displacement;
    let tile_length = grid.tile_length();
    if tile_length <= f32::EPSILON {
        return Resolution {
            position: candidate,
            collided: false,
        };
    }

    let focus_column = (candidate.x / tile_length).floor() as i64;
    let focus_row = (candidate.y / tile_length).floor() as i64;

    let mut collided = false;
    for row in focus_row - 1..=focus_row + 1 {
        for column in focus_column - 1..=focus_column + 1 {
            if let TileLookup::InBounds(Tile::Wall) = grid.lookup(column, row) {
                let wall_origin = Vec2::new(
                    column as f32 * tile_length,
                    row as f32 * tile_length,
                );
                if rects_overlap(candidate, size, wall_origin, tile_length) {
                    collided = true;
                }
            }
        }
    }

    if collided {
        Resolution {
            position: current,
            collided: true,
        }
    } else {
        Resolution {
            position: candidate,
            collided: false,
        }
    }
}

/// Strict-inequality overlap test; rectangles that merely share an edge do
/// not collide.
fn rects_overlap(a_origin: Vec2, a_size: f32, b_origin: Vec2, b_size: f32) -> bool {
    a_origin.x < b_origin.x + b_size
        && a_origin.x + a_size > b_origin.x
        && a_origin.y < b_origin.y + b_size
        && a_origin.y + a_size > b_origin.y
}
