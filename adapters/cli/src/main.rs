#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Cave Drift experience.
//!
//! The binary owns the simulation loop: it polls input from the rendering
//! backend, regenerates the cave on demand, advances the world one tick per
//! frame, drives the movement system, smooths the camera, and hands the
//! resulting scene back to the backend for presentation.

mod settings;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use cave_drift_core::{Command, Event, TileCoord, TileGrid};
use cave_drift_rendering::{
    CameraPresentation, Color, CrawlerPresentation, FrameInput, Presentation, RenderingBackend,
    Scene,
};
use cave_drift_rendering_macroquad::MacroquadBackend;
use cave_drift_system_camera::CameraFollow;
use cave_drift_system_generation as generation;
use cave_drift_system_movement::Movement;
use cave_drift_system_spawning::{find_spawn, NoOpenTileError};
use cave_drift_world::{self as world, query, World};

const CLEAR_COLOR: Color = Color::from_rgb_u8(20, 20, 20);
const WALL_COLOR: Color = Color::from_rgb_u8(100, 100, 110);
const FLOOR_COLOR: Color = Color::from_rgb_u8(40, 30, 30);
const CRAWLER_COLOR: Color = Color::from_rgb_u8(0, 255, 100);

/// Number of generation attempts before a regenerate request gives up.
const GENERATION_ATTEMPTS: u32 = 8;
/// Attempt index after which the fill probability starts decaying.
const FILL_DECAY_AFTER_ATTEMPT: u32 = 4;
/// Fill probability reduction applied per decaying attempt.
const FILL_DECAY_PER_ATTEMPT: f32 = 0.05;

/// Command-line options for the Cave Drift binary.
#[derive(Debug, Parser)]
#[command(name = "cave-drift", about = "Procedural cave exploration")]
struct Args {
    /// Seed for the deterministic RNG; drawn randomly when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Path to a TOML settings file overriding the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print frame statistics once per second.
    #[arg(long)]
    show_fps: bool,
    /// Render as fast as possible instead of waiting for display vsync.
    #[arg(long)]
    no_vsync: bool,
}

/// Entry point for the Cave Drift command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let settings = settings::load(args.config.as_deref())?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let generation_config = generation::Config::new(
        settings.fill_probability,
        settings.smoothing_passes,
        settings.wall_threshold,
    );
    let viewport = Vec2::new(settings.viewport_width, settings.viewport_height);

    let mut world = World::new();
    println!("{}", query::welcome_banner(&world));
    println!("seed: {seed}");

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureCrawler {
            size: settings.crawler_size,
            speed: settings.crawler_speed,
        },
        &mut events,
    );

    let Some((grid, spawn)) = generate_open_grid(
        &generation_config,
        settings.grid_columns,
        settings.grid_rows,
        settings.tile_length,
        &mut rng,
    ) else {
        bail!("no open tile found after {GENERATION_ATTEMPTS} generation attempts");
    };
    world::apply(
        &mut world,
        Command::InstallGrid { grid, spawn },
        &mut events,
    );

    let crawler = query::crawler(&world);
    let mut camera = CameraFollow::centered_on(crawler.position, viewport);
    let camera_presentation = CameraPresentation::new(camera.position(), viewport)?;
    let scene = Scene::new(
        query::grid(&world).clone(),
        FLOOR_COLOR,
        WALL_COLOR,
        CrawlerPresentation::new(crawler.position, crawler.size, CRAWLER_COLOR),
        camera_presentation,
    );
    let presentation = Presentation::new("Cave Drift", CLEAR_COLOR, scene);

    let mut movement = Movement;
    let camera_smoothing = settings.camera_smoothing;

    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps);

    backend.run(presentation, move |dt, input: FrameInput, scene| {
        let mut events = Vec::new();

        if input.regenerate {
            match generate_open_grid(
                &generation_config,
                settings.grid_columns,
                settings.grid_rows,
                settings.tile_length,
                &mut rng,
            ) {
                Some((grid, spawn)) => {
                    world::apply(
                        &mut world,
                        Command::InstallGrid { grid, spawn },
                        &mut events,
                    );
                }
                None => {
                    eprintln!(
                        "keeping the previous cave: no open tile after {GENERATION_ATTEMPTS} attempts"
                    );
                }
            }
        }

        world::apply(&mut world, Command::Tick { dt }, &mut events);

        let crawler = query::crawler(&world);
        let mut commands = Vec::new();
        movement.handle(&events, input.movement, crawler.speed, &mut commands);
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }

        let crawler = query::crawler(&world);
        let camera_position = camera.update(crawler.position, viewport, camera_smoothing);

        if events
            .iter()
            .any(|event| matches!(event, Event::GridInstalled { .. }))
        {
            scene.grid = query::grid(&world).clone();
        }
        scene.crawler.position = crawler.position;
        scene.crawler.size = crawler.size;
        scene.camera.position = camera_position;
    })
}

/// Generates grids until one offers a spawn tile, decaying the fill
/// probability on late attempts to carve more floor.
///
/// Returns `None` when every attempt produced an all-wall grid; callers keep
/// the previous grid active in that case.
fn generate_open_grid<R>(
    config: &generation::Config,
    columns: u32,
    rows: u32,
    tile_length: f32,
    rng: &mut R,
) -> Option<(TileGrid, TileCoord)>
where
    R: Rng + ?Sized,
{
    let mut attempt_config = *config;
    for attempt in 1..=GENERATION_ATTEMPTS {
        let grid = generation::generate(&attempt_config, columns, rows, tile_length, rng);
        match find_spawn(&grid) {
            Ok(spawn) => return Some((grid, spawn)),
            Err(NoOpenTileError) => {
                eprintln!("generation attempt {attempt} produced no open tile");
                if attempt >= FILL_DECAY_AFTER_ATTEMPT {
                    let lowered =
                        (attempt_config.fill_probability() - FILL_DECAY_PER_ATTEMPT).max(0.0);
                    attempt_config = attempt_config.with_fill_probability(lowered);
                }
            }
        }
    }

    None
}
