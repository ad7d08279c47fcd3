#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Cave Drift adapters.

use std::{error::Error, fmt, ops::Range, time::Duration};

use anyhow::Result as AnyResult;
use glam::Vec2;

use cave_drift_core::{DirectionalInput, TileGrid};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Input snapshot gathered by adapters once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Held directional movement sampled from the keyboard.
    pub movement: DirectionalInput,
    /// Whether a regenerate trigger was pressed on this frame (edge-triggered).
    pub regenerate: bool,
}

/// Crawler rendered as a filled square positioned in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrawlerPresentation {
    /// Upper-left corner of the crawler's bounding box in world units.
    pub position: Vec2,
    /// Edge length of the crawler's square in world units.
    pub size: f32,
    /// Fill color of the crawler's body.
    pub color: Color,
}

impl CrawlerPresentation {
    /// Creates a new crawler presentation descriptor.
    #[must_use]
    pub const fn new(position: Vec2, size: f32, color: Color) -> Self {
        Self {
            position,
            size,
            color,
        }
    }
}

/// Camera state handed to backends for world-to-screen offsets.
///
/// Backends draw every world-space element at `world_position - position`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPresentation {
    /// Camera position in world units.
    pub position: Vec2,
    /// Visible world-space extent, sized to the output surface.
    pub viewport: Vec2,
}

impl CameraPresentation {
    /// Creates a new camera descriptor.
    ///
    /// Returns an error when the viewport has a non-positive extent.
    pub fn new(position: Vec2, viewport: Vec2) -> Result<Self, RenderingError> {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return Err(RenderingError::InvalidViewport {
                width: viewport.x,
                height: viewport.y,
            });
        }

        Ok(Self { position, viewport })
    }
}

/// Scene description combining the grid, its palette, and the inhabitants.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Grid that composes the play area.
    pub grid: TileGrid,
    /// Fill color for floor tiles.
    pub floor_color: Color,
    /// Fill color for wall tiles.
    pub wall_color: Color,
    /// Crawler visible within the cave.
    pub crawler: CrawlerPresentation,
    /// Camera framing the visible portion of the cave.
    pub camera: CameraPresentation,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        grid: TileGrid,
        floor_color: Color,
        wall_color: Color,
        crawler: CrawlerPresentation,
        camera: CameraPresentation,
    ) -> Self {
        Self {
            grid,
            floor_color,
            wall_color,
            crawler,
            camera,
        }
    }
}

/// Half-open tile index ranges covering the camera's visible window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleTiles {
    /// Columns intersecting the viewport, clamped to the grid.
    pub columns: Range<u32>,
    /// Rows intersecting the viewport, clamped to the grid.
    pub rows: Range<u32>,
}

/// Computes the tile ranges a backend must draw for the given camera.
///
/// The window is padded by one tile so partially visible tiles along the far
/// edges are included, and clamped so backends can index the grid without
/// further bounds checks.
#[must_use]
pub fn visible_tile_range(grid: &TileGrid, camera: Vec2, viewport: Vec2) -> VisibleTiles {
    let tile_length = grid.tile_length();
    if tile_length <= f32::EPSILON {
        return VisibleTiles {
            columns: 0..0,
            rows: 0..0,
        };
    }

    VisibleTiles {
        columns: visible_axis_range(camera.x, viewport.x, tile_length, grid.columns()),
        rows: visible_axis_range(camera.y, viewport.y, tile_length, grid.rows()),
    }
}

fn visible_axis_range(camera: f32, viewport: f32, tile_length: f32, tiles: u32) -> Range<u32> {
    let start = (camera / tile_length).floor() as i64;
    let end = start + (viewport / tile_length) as i64 + 2;

    let clamped_start = start.clamp(0, i64::from(tiles)) as u32;
    let clamped_end = end.clamp(0, i64::from(tiles)) as u32;
    clamped_start..clamped_end
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Cave Drift scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and may mutate the scene before it is
    /// rendered, allowing adapters to advance world snapshots
    /// deterministically.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Viewports must have a positive extent on both axes.
    InvalidViewport {
        /// Provided viewport width that failed validation.
        width: f32,
        /// Provided viewport height that failed validation.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidViewport { width, height } => {
                write!(f, "viewport must be positive (received {width}x{height})")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use cave_drift_core::Tile;

    fn grid() -> TileGrid {
        TileGrid::filled(50, 50, 32.0, Tile::Floor)
    }

    #[test]
    fn camera_creation_rejects_non_positive_viewports() {
        let error = CameraPresentation::new(Vec2::ZERO, Vec2::new(800.0, 0.0))
            .expect_err("flat viewport must be rejected");

        assert_eq!(
            error,
            RenderingError::InvalidViewport {
                width: 800.0,
                height: 0.0,
            }
        );
    }

    #[test]
    fn visible_range_starts_at_zero_for_negative_cameras() {
        let range = visible_tile_range(&grid(), Vec2::new(-500.0, -40.0), Vec2::new(800.0, 600.0));

        assert_eq!(range.columns.start, 0);
        assert_eq!(range.rows.start, 0);
        // Far edge shrinks along with the off-screen origin.
        assert!(range.columns.end < 27);
    }

    #[test]
    fn visible_range_covers_viewport_with_padding() {
        let range = visible_tile_range(&grid(), Vec2::new(64.0, 32.0), Vec2::new(800.0, 600.0));

        // 800 / 32 = 25 visible columns, plus the two-tile pad.
        assert_eq!(range.columns, 2..29);
        assert_eq!(range.rows, 1..21);
    }

    #[test]
    fn visible_range_clamps_to_grid_bounds() {
        let range = visible_tile_range(&grid(), Vec2::new(1500.0, 1580.0), Vec2::new(800.0, 600.0));

        assert_eq!(range.columns.end, 50);
        assert_eq!(range.rows, 49..50);
    }

    #[test]
    fn byte_colors_map_to_unit_channels() {
        let color = Color::from_rgb_u8(255, 0, 51);

        assert_eq!(color.red, 1.0);
        assert_eq!(color.green, 0.0);
        assert_eq!(color.alpha, 1.0);
        assert!((color.blue - 0.2).abs() < 1e-6);
    }
}
