#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement system translating held directional input into displacement
//! commands.

use glam::Vec2;

use cave_drift_core::{Command, DirectionalInput, Event};

/// Pure system that reacts to tick events and emits movement commands.
#[derive(Debug, Default)]
pub struct Movement;

impl Movement {
    /// Consumes events and the sampled input to emit movement commands.
    ///
    /// A command is emitted only when simulated time advanced within the
    /// batch and the input produces a nonzero displacement. Axes are
    /// independent: perpendicular directions combine into diagonal movement
    /// at full per-axis speed, opposing directions cancel.
    pub fn handle(
        &mut self,
        events: &[Event],
        input: DirectionalInput,
        speed: f32,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        if !input.any() {
            return;
        }

        let displacement = displacement_for(input, speed);
        if displacement == Vec2::ZERO {
            return;
        }

        out.push(Command::MoveCrawler { displacement });
    }
}

fn displacement_for(input: DirectionalInput, speed: f32) -> Vec2 {
    let mut displacement = Vec2::ZERO;
    if input.left {
        displacement.x -= speed;
    }
    if input.right {
        displacement.x += speed;
    }
    if input.up {
        displacement.y -= speed;
    }
    if input.down {
        displacement.y += speed;
    }
    displacement
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const SPEED: f32 = 4.0;

    fn tick_events() -> Vec<Event> {
        vec![Event::TimeAdvanced {
            dt: Duration::from_millis(16),
        }]
    }

    #[test]
    fn no_command_without_time_advancing() {
        let mut movement = Movement;
        let mut commands = Vec::new();
        let input = DirectionalInput {
            right: true,
            ..DirectionalInput::default()
        };

        movement.handle(&[], input, SPEED, &mut commands);

        assert!(commands.is_empty());
    }

    #[test]
    fn no_command_without_held_input() {
        let mut movement = Movement;
        let mut commands = Vec::new();

        movement.handle(
            &tick_events(),
            DirectionalInput::default(),
            SPEED,
            &mut commands,
        );

        assert!(commands.is_empty());
    }

    #[test]
    fn perpendicular_directions_combine_diagonally() {
        let mut movement = Movement;
        let mut commands = Vec::new();
        let input = DirectionalInput {
            right: true,
            down: true,
            ..DirectionalInput::default()
        };

        movement.handle(&tick_events(), input, SPEED, &mut commands);

        assert_eq!(
            commands,
            vec![Command::MoveCrawler {
                displacement: Vec2::new(SPEED, SPEED),
            }]
        );
    }

    #[test]
    fn opposing_directions_cancel_to_no_command() {
        let mut movement = Movement;
        let mut commands = Vec::new();
        let input = DirectionalInput {
            up: true,
            down: true,
            left: true,
            right: true,
        };

        movement.handle(&tick_events(), input, SPEED, &mut commands);

        assert!(commands.is_empty());
    }

    #[test]
    fn single_direction_moves_at_full_speed() {
        let mut movement = Movement;
        let mut commands = Vec::new();
        let input = DirectionalInput {
            up: true,
            ..DirectionalInput::default()
        };

        movement.handle(&tick_events(), input, SPEED, &mut commands);

        assert_eq!(
            commands,
            vec![Command::MoveCrawler {
                displacement: Vec2::new(0.0, -SPEED),
            }]
        );
    }
}
