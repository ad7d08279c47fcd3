#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Cave Drift.
//!
//! The macroquad dependency disables default features: its audio stack needs
//! native ALSA development libraries that headless test machines lack, and
//! nothing here plays sound. Consumers that want audio can re-enable the
//! `macroquad/audio` feature in their own dependency specification.

use std::time::Duration;

use anyhow::Result;
use macroquad::input::{is_key_down, is_key_pressed, KeyCode};

use cave_drift_core::{DirectionalInput, TileCoord};
use cave_drift_rendering::{
    visible_tile_range, Color, FrameInput, Presentation, RenderingBackend, Scene,
};

/// Snapshot of keyboard state observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardState {
    /// Arrow keys or `WASD`, sampled as held state.
    movement: DirectionalInput,
    /// `Space` requests a fresh cave, edge-triggered.
    regenerate: bool,
    /// `Q` or `Escape` to quit the render loop.
    quit_requested: bool,
}

impl KeyboardState {
    fn poll() -> Self {
        let movement = DirectionalInput {
            up: is_key_down(KeyCode::Up) || is_key_down(KeyCode::W),
            down: is_key_down(KeyCode::Down) || is_key_down(KeyCode::S),
            left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
            right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
        };
        let regenerate = is_key_pressed(KeyCode::Space);
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);

        Self {
            movement,
            regenerate,
            quit_requested,
        }
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Clone, Copy, Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average once one second has
    /// elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = if seconds <= f32::EPSILON {
            0.0
        } else {
            self.frames as f32 / seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the
    /// platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the
    /// display refresh rate or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per
    /// second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.camera.viewport.x as i32,
            window_height: scene.camera.viewport.y as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardState::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = FrameInput {
                    movement: keyboard.movement,
                    regenerate: keyboard.regenerate,
                };

                update_scene(frame_dt, frame_input, &mut scene);

                draw_scene(&scene);

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn draw_scene(scene: &Scene) {
    let camera = scene.camera.position;
    let tile_length = scene.grid.tile_length();
    let visible = visible_tile_range(&scene.grid, camera, scene.camera.viewport);

    for row in visible.rows.clone() {
        for column in visible.columns.clone() {
            let coord = TileCoord::new(column, row);
            let Some(tile) = scene.grid.tile(coord) else {
                continue;
            };
            let color = if tile.is_wall() {
                scene.wall_color
            } else {
                scene.floor_color
            };
            let origin = scene.grid.tile_origin(coord) - camera;
            macroquad::shapes::draw_rectangle(
                origin.x,
                origin.y,
                tile_length,
                tile_length,
                to_macroquad_color(color),
            );
        }
    }

    let crawler = scene.crawler;
    let origin = crawler.position - camera;
    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        crawler.size,
        crawler.size,
        to_macroquad_color(crawler.color),
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
