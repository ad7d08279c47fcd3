#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Exponential-decay camera follow that frames an entity at the viewport
//! center.

use glam::Vec2;

/// Continuously smoothed viewport offset tracking an entity.
///
/// After construction the camera never jumps; every [`CameraFollow::update`]
/// closes a fixed fraction of the remaining distance to the target, so the
/// position converges asymptotically and only reaches the target exactly when
/// the smoothing factor is `1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFollow {
    position: Vec2,
}

impl CameraFollow {
    /// Creates a camera resting at the provided position.
    #[must_use]
    pub const fn new(position: Vec2) -> Self {
        Self { position }
    }

    /// Creates a camera already framing the entity at the viewport center.
    ///
    /// This is the single permitted teleport; use it at initialization only.
    #[must_use]
    pub fn centered_on(entity_position: Vec2, viewport: Vec2) -> Self {
        Self {
            position: entity_position - viewport * 0.5,
        }
    }

    /// Current camera position in world units.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Moves the camera a fraction of the remaining distance toward the
    /// entity-centering target and returns the new position.
    ///
    /// The step is tick-based rather than wall-clock-based: convergence speed
    /// scales with the tick rate. `smoothing` must lie in `(0, 1]`.
    pub fn update(&mut self, entity_position: Vec2, viewport: Vec2, smoothing: f32) -> Vec2 {
        let target = entity_position - viewport * 0.5;
        self.position += (target - self.position) * smoothing;
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn centered_on_frames_the_entity_exactly() {
        let camera = CameraFollow::centered_on(Vec2::new(1000.0, 500.0), VIEWPORT);
        assert_eq!(camera.position(), Vec2::new(600.0, 200.0));
    }

    #[test]
    fn updates_converge_monotonically_without_overshoot() {
        let entity = Vec2::new(1000.0, 500.0);
        let target = entity - VIEWPORT * 0.5;
        let mut camera = CameraFollow::new(Vec2::ZERO);

        let mut remaining = (target - camera.position()).length();
        for _ in 0..50 {
            let position = camera.update(entity, VIEWPORT, 0.1);
            let next_remaining = (target - position).length();
            assert!(
                next_remaining < remaining || remaining == 0.0,
                "distance stopped shrinking at {next_remaining}"
            );
            // The camera approaches from one side and never crosses the
            // target on either axis.
            assert!(position.x <= target.x);
            assert!(position.y <= target.y);
            remaining = next_remaining;
        }

        assert!(remaining < (target - Vec2::ZERO).length() * 0.01);
    }

    #[test]
    fn unit_smoothing_reaches_the_target_in_one_update() {
        let entity = Vec2::new(320.0, 240.0);
        let mut camera = CameraFollow::new(Vec2::new(-50.0, 75.0));

        let position = camera.update(entity, VIEWPORT, 1.0);

        assert_eq!(position, entity - VIEWPORT * 0.5);
        assert_eq!(camera.position(), position);
    }

    #[test]
    fn stationary_entity_keeps_the_camera_at_rest_once_centered() {
        let entity = Vec2::new(400.0, 300.0);
        let mut camera = CameraFollow::centered_on(entity, VIEWPORT);
        let resting = camera.position();

        for _ in 0..5 {
            assert_eq!(camera.update(entity, VIEWPORT, 0.1), resting);
        }
    }
}
