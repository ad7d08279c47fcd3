#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawn location scan for freshly generated grids.

use cave_drift_core::{Tile, TileCoord, TileGrid};
use thiserror::Error;

/// Error raised when a grid offers no floor tile to spawn on.
///
/// Grids produced by extreme generation parameters can legitimately be all
/// wall; callers are expected to regenerate rather than treat this as fatal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("grid contains no open floor tile")]
pub struct NoOpenTileError;

/// Scans the grid in row-major order and returns the first floor tile.
///
/// The scan is deterministic, never mutates the grid, and never retries.
pub fn find_spawn(grid: &TileGrid) -> Result<TileCoord, NoOpenTileError> {
    grid.iter()
        .find(|(_, tile)| matches!(tile, Tile::Floor))
        .map(|(coord, _)| coord)
        .ok_or(NoOpenTileError)
}
