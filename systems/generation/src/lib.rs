#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Cellular-automaton cave generator.
//!
//! Generation happens in two stages: a seed pass that consumes one uniform
//! draw per cell, and a configurable number of smoothing passes that apply a
//! local majority rule over each cell's 8-connected neighborhood. Randomness
//! is consumed only by the seed pass; given an identical seeded grid the
//! remaining pipeline is fully deterministic.

use cave_drift_core::{Tile, TileCoord, TileGrid};
use rand::Rng;

const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Configuration parameters required to generate a cave layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    fill_probability: f32,
    smoothing_passes: u32,
    wall_threshold: u8,
}

impl Config {
    /// Creates a new configuration.
    ///
    /// `fill_probability` is the chance in `[0, 1]` that a seeded cell starts
    /// as a wall; `wall_threshold` is the neighbor-count cutoff in `[0, 8]`
    /// applied during smoothing.
    #[must_use]
    pub const fn new(fill_probability: f32, smoothing_passes: u32, wall_threshold: u8) -> Self {
        Self {
            fill_probability,
            smoothing_passes,
            wall_threshold,
        }
    }

    /// Chance that a seeded cell starts as a wall.
    #[must_use]
    pub const fn fill_probability(&self) -> f32 {
        self.fill_probability
    }

    /// Number of smoothing passes applied after seeding.
    #[must_use]
    pub const fn smoothing_passes(&self) -> u32 {
        self.smoothing_passes
    }

    /// Neighbor-count cutoff applied during smoothing.
    #[must_use]
    pub const fn wall_threshold(&self) -> u8 {
        self.wall_threshold
    }

    /// Returns a copy of the configuration with a replaced fill probability.
    #[must_use]
    pub const fn with_fill_probability(self, fill_probability: f32) -> Self {
        Self {
            fill_probability,
            smoothing_passes: self.smoothing_passes,
            wall_threshold: self.wall_threshold,
        }
    }
}

/// Generates a cave layout with the requested dimensions.
///
/// The output carries no connectivity guarantee: isolated floor pockets fully
/// surrounded by walls are an accepted property of the algorithm. Extreme
/// inputs legitimately produce all-wall or all-floor grids.
#[must_use]
pub fn generate<R>(
    config: &Config,
    columns: u32,
    rows: u32,
    tile_length: f32,
    rng: &mut R,
) -> TileGrid
where
    R: Rng + ?Sized,
{
    let mut grid = seed(config, columns, rows, tile_length, rng);
    for _ in 0..config.smoothing_passes {
        grid = smooth(config, &grid);
    }
    grid
}

/// Applies a single smoothing pass over a grid snapshot.
///
/// Every cell's next state is derived from the same prior snapshot: more wall
/// neighbors than the threshold turns the cell into a wall, fewer turns it
/// into floor, and an exact match copies the current state. Neighbor
/// positions outside the grid count as walls, which biases edges and corners
/// toward wall.
#[must_use]
pub fn smooth(config: &Config, grid: &TileGrid) -> TileGrid {
    TileGrid::from_fn(
        grid.columns(),
        grid.rows(),
        grid.tile_length(),
        |coord| {
            let neighbors = wall_neighbor_count(grid, coord);
            if neighbors > config.wall_threshold {
                Tile::Wall
            } else if neighbors < config.wall_threshold {
                Tile::Floor
            } else {
                grid.tile(coord).unwrap_or(Tile::Wall)
            }
        },
    )
}

fn seed<R>(config: &Config, columns: u32, rows: u32, tile_length: f32, rng: &mut R) -> TileGrid
where
    R: Rng + ?Sized,
{
    TileGrid::from_fn(columns, rows, tile_length, |_| {
        if rng.gen::<f32>() < config.fill_probability {
            Tile::Wall
        } else {
            Tile::Floor
        }
    })
}

fn wall_neighbor_count(grid: &TileGrid, coord: TileCoord) -> u8 {
    let column = i64::from(coord.column());
    let row = i64::from(coord.row());

    let mut count = 0;
    for (column_offset, row_offset) in NEIGHBOR_OFFSETS {
        if grid
            .lookup(column + column_offset, row + row_offset)
            .counts_as_wall()
        {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_corner(coord: TileCoord, columns: u32, rows: u32) -> bool {
        let edge_column = coord.column() == 0 || coord.column() + 1 == columns;
        let edge_row = coord.row() == 0 || coord.row() + 1 == rows;
        edge_column && edge_row
    }

    #[test]
    fn neighbor_count_includes_out_of_bounds_positions() {
        let grid = TileGrid::filled(3, 3, 1.0, Tile::Floor);

        assert_eq!(wall_neighbor_count(&grid, TileCoord::new(0, 0)), 5);
        assert_eq!(wall_neighbor_count(&grid, TileCoord::new(1, 0)), 3);
        assert_eq!(wall_neighbor_count(&grid, TileCoord::new(1, 1)), 0);
    }

    #[test]
    fn smoothing_turns_corners_into_walls_on_open_grids() {
        let config = Config::new(0.0, 0, 4);
        let open = TileGrid::filled(6, 5, 1.0, Tile::Floor);

        let smoothed = smooth(&config, &open);

        for (coord, tile) in smoothed.iter() {
            if is_corner(coord, 6, 5) {
                assert_eq!(tile, Tile::Wall, "corner {coord:?} should close");
            } else {
                assert_eq!(tile, Tile::Floor, "cell {coord:?} should stay open");
            }
        }
    }

    #[test]
    fn smoothing_preserves_cells_at_the_exact_threshold() {
        // The center of a cardinal cross has exactly four wall neighbors, so
        // with a threshold of four it must keep whatever state it holds.
        let cross = |center: Tile| {
            TileGrid::from_fn(3, 3, 1.0, |coord| match (coord.column(), coord.row()) {
                (1, 1) => center,
                (1, 0) | (0, 1) | (2, 1) | (1, 2) => Tile::Wall,
                _ => Tile::Floor,
            })
        };
        let config = Config::new(0.0, 0, 4);

        let from_floor = smooth(&config, &cross(Tile::Floor));
        assert_eq!(from_floor.tile(TileCoord::new(1, 1)), Some(Tile::Floor));

        let from_wall = smooth(&config, &cross(Tile::Wall));
        assert_eq!(from_wall.tile(TileCoord::new(1, 1)), Some(Tile::Wall));
    }

    #[test]
    fn smoothing_keeps_saturated_grids_solid() {
        let solid = TileGrid::filled(5, 5, 1.0, Tile::Wall);
        for threshold in 0..=7 {
            let config = Config::new(1.0, 0, threshold);
            let smoothed = smooth(&config, &solid);
            assert!(
                smoothed.iter().all(|(_, tile)| tile.is_wall()),
                "threshold {threshold} opened a saturated grid"
            );
        }
    }

    #[test]
    fn with_fill_probability_replaces_only_the_probability() {
        let config = Config::new(0.45, 5, 4).with_fill_probability(0.3);

        assert_eq!(config.fill_probability(), 0.3);
        assert_eq!(config.smoothing_passes(), 5);
        assert_eq!(config.wall_threshold(), 4);
    }
}
