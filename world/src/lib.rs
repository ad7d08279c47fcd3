#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Cave Drift.
//!
//! The world owns the current grid and the crawler inhabiting it. All
//! mutations flow through [`apply`]; the crawler's committed position in
//! particular is only ever assigned from [`collision::resolve`] output, so no
//! caller can bypass collision resolution.

pub mod collision;

use glam::Vec2;

use cave_drift_core::{Command, Event, Tile, TileCoord, TileGrid, WELCOME_BANNER};

const DEFAULT_GRID_COLUMNS: u32 = 10;
const DEFAULT_GRID_ROWS: u32 = 10;
const DEFAULT_TILE_LENGTH: f32 = 32.0;
const DEFAULT_CRAWLER_SIZE: f32 = 24.0;
const DEFAULT_CRAWLER_SPEED: f32 = 4.0;

/// Represents the authoritative Cave Drift world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: TileGrid,
    crawler: Crawler,
    tick_index: u64,
}

impl World {
    /// Creates a new world holding an all-floor placeholder grid.
    ///
    /// Adapters are expected to install a generated grid before the first
    /// simulated tick.
    #[must_use]
    pub fn new() -> Self {
        let grid = TileGrid::filled(
            DEFAULT_GRID_COLUMNS,
            DEFAULT_GRID_ROWS,
            DEFAULT_TILE_LENGTH,
            Tile::Floor,
        );
        let crawler = Crawler {
            position: centered_in_tile(&grid, TileCoord::new(0, 0), DEFAULT_CRAWLER_SIZE),
            size: DEFAULT_CRAWLER_SIZE,
            speed: DEFAULT_CRAWLER_SPEED,
        };

        Self {
            banner: WELCOME_BANNER,
            grid,
            crawler,
            tick_index: 0,
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::InstallGrid { grid, spawn } => {
            world.crawler.position = centered_in_tile(&grid, spawn, world.crawler.size);
            world.grid = grid;
            out_events.push(Event::GridInstalled {
                columns: world.grid.columns(),
                rows: world.grid.rows(),
            });
        }
        Command::ConfigureCrawler { size, speed } => {
            world.crawler.size = size;
            world.crawler.speed = speed;
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::MoveCrawler { displacement } => {
            let resolution = collision::resolve(
                &world.grid,
                world.crawler.position,
                displacement,
                world.crawler.size,
            );
            if resolution.collided {
                out_events.push(Event::CrawlerBlocked {
                    at: world.crawler.position,
                    attempted: world.crawler.position + displacement,
                });
            } else {
                let from = world.crawler.position;
                world.crawler.position = resolution.position;
                out_events.push(Event::CrawlerMoved {
                    from,
                    to: resolution.position,
                });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use glam::Vec2;

    use super::World;
    use cave_drift_core::TileGrid;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the world's current grid.
    #[must_use]
    pub fn grid(world: &World) -> &TileGrid {
        &world.grid
    }

    /// Captures a read-only snapshot of the crawler's state.
    #[must_use]
    pub fn crawler(world: &World) -> CrawlerSnapshot {
        CrawlerSnapshot {
            position: world.crawler.position,
            size: world.crawler.size,
            speed: world.crawler.speed,
        }
    }

    /// Number of ticks the world has processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Immutable representation of the crawler's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct CrawlerSnapshot {
        /// Upper-left corner of the crawler's bounding box in world units.
        pub position: Vec2,
        /// Edge length of the crawler's square bounding box.
        pub size: f32,
        /// Distance covered per tick along each held axis.
        pub speed: f32,
    }
}

#[derive(Clone, Copy, Debug)]
struct Crawler {
    position: Vec2,
    size: f32,
    speed: f32,
}

fn centered_in_tile(grid: &TileGrid, tile: TileCoord, size: f32) -> Vec2 {
    grid.tile_origin(tile) + Vec2::splat((grid.tile_length() - size) * 0.5)
}
