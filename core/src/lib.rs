#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Cave Drift engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values that systems and
//! adapters react to deterministically. Systems consume event streams, query
//! immutable snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Cave Drift.";

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Open ground the crawler can occupy.
    Floor,
    /// Solid rock that blocks movement.
    Wall,
}

impl Tile {
    /// Reports whether the tile blocks movement.
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Location of a single grid tile expressed as column and row indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    column: u32,
    row: u32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Result of probing the grid at a signed tile position.
///
/// Neighbor counting treats positions outside the grid as solid, so the
/// boundary rule lives in [`TileLookup::counts_as_wall`] and nowhere else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileLookup {
    /// The position lies inside the grid and holds the carried tile.
    InBounds(Tile),
    /// The position lies outside the grid bounds.
    OutOfBounds,
}

impl TileLookup {
    /// Reports whether the probed position counts as a wall.
    #[must_use]
    pub const fn counts_as_wall(self) -> bool {
        match self {
            Self::InBounds(tile) => tile.is_wall(),
            Self::OutOfBounds => true,
        }
    }
}

/// Dense row-major tile grid with fixed dimensions and square tiles.
///
/// A grid is immutable once constructed; regeneration produces a fresh grid
/// that replaces the previous one wholesale.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
    tile_length: f32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Builds a grid by invoking `tile_for` once per cell in row-major order.
    #[must_use]
    pub fn from_fn<F>(columns: u32, rows: u32, tile_length: f32, mut tile_for: F) -> Self
    where
        F: FnMut(TileCoord) -> Tile,
    {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        let mut tiles = Vec::with_capacity(capacity);
        for row in 0..rows {
            for column in 0..columns {
                tiles.push(tile_for(TileCoord::new(column, row)));
            }
        }

        Self {
            columns,
            rows,
            tile_length,
            tiles,
        }
    }

    /// Builds a grid with every cell set to the provided tile.
    #[must_use]
    pub fn filled(columns: u32, rows: u32, tile_length: f32, tile: Tile) -> Self {
        Self::from_fn(columns, rows, tile_length, |_| tile)
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square tile expressed in world units.
    #[must_use]
    pub const fn tile_length(&self) -> f32 {
        self.tile_length
    }

    /// Total width of the grid measured in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Total height of the grid measured in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }

    /// Returns the tile stored at the provided coordinate, if it is in bounds.
    #[must_use]
    pub fn tile(&self, coord: TileCoord) -> Option<Tile> {
        self.index(coord).and_then(|index| self.tiles.get(index)).copied()
    }

    /// Probes the grid at a signed tile position.
    ///
    /// Positions outside `[0, columns) x [0, rows)` report
    /// [`TileLookup::OutOfBounds`].
    #[must_use]
    pub fn lookup(&self, column: i64, row: i64) -> TileLookup {
        if column < 0 || row < 0 {
            return TileLookup::OutOfBounds;
        }

        let coord = match (u32::try_from(column), u32::try_from(row)) {
            (Ok(column), Ok(row)) => TileCoord::new(column, row),
            _ => return TileLookup::OutOfBounds,
        };

        match self.tile(coord) {
            Some(tile) => TileLookup::InBounds(tile),
            None => TileLookup::OutOfBounds,
        }
    }

    /// World-space origin (upper-left corner) of the provided tile.
    #[must_use]
    pub fn tile_origin(&self, coord: TileCoord) -> Vec2 {
        Vec2::new(
            coord.column() as f32 * self.tile_length,
            coord.row() as f32 * self.tile_length,
        )
    }

    /// Iterator over all coordinates paired with their tiles, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, Tile)> + '_ {
        let columns = self.columns;
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let index = index as u64;
            let column = (index % u64::from(columns.max(1))) as u32;
            let row = (index / u64::from(columns.max(1))) as u32;
            (TileCoord::new(column, row), *tile)
        })
    }

    fn index(&self, coord: TileCoord) -> Option<usize> {
        if coord.column() < self.columns && coord.row() < self.rows {
            let row = usize::try_from(coord.row()).ok()?;
            let column = usize::try_from(coord.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Held directional input sampled once per tick by an adapter.
///
/// Opposing directions may both be held; they cancel out. Perpendicular
/// directions combine into diagonal movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DirectionalInput {
    /// Movement toward decreasing row indices is requested.
    pub up: bool,
    /// Movement toward increasing row indices is requested.
    pub down: bool,
    /// Movement toward decreasing column indices is requested.
    pub left: bool,
    /// Movement toward increasing column indices is requested.
    pub right: bool,
}

impl DirectionalInput {
    /// Reports whether any direction is held.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the world's grid wholesale and recenters the crawler.
    InstallGrid {
        /// Freshly generated grid that becomes the authoritative layout.
        grid: TileGrid,
        /// Floor tile the crawler is recentered into.
        spawn: TileCoord,
    },
    /// Updates the crawler's bounding size and per-tick speed.
    ConfigureCrawler {
        /// Edge length of the crawler's square bounding box in world units.
        size: f32,
        /// Distance the crawler covers per tick along each held axis.
        speed: f32,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the crawler move by the provided displacement.
    MoveCrawler {
        /// Proposed displacement in world units for this tick.
        displacement: Vec2,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Confirms that a freshly generated grid replaced the previous one.
    GridInstalled {
        /// Number of tile columns in the installed grid.
        columns: u32,
        /// Number of tile rows in the installed grid.
        rows: u32,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the crawler committed a displacement.
    CrawlerMoved {
        /// Position the crawler occupied before the move.
        from: Vec2,
        /// Position the crawler occupies after the move.
        to: Vec2,
    },
    /// Reports that a requested displacement was rejected in full.
    CrawlerBlocked {
        /// Position the crawler still occupies.
        at: Vec2,
        /// Candidate position that intersected a wall.
        attempted: Vec2,
    },
}
