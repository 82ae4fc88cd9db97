//! Frame controller
//!
//! One call to [`tick`] is one display frame. Time comes from the host's
//! monotonic clock, so the result does not depend on frame rate.

use serde::{Deserialize, Serialize};

use super::collision::{query_blocking, query_collectables, query_deadly};
use super::kinematics::{MoveIntent, horizontal_displacement};
use super::state::{GameEvent, GameState, RunOutcome};
use crate::view_to_world;

/// Logical input for a single tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Strafe direction (-1, 0, 1)
    pub move_x: i8,
    /// Walk direction (-1, 0, 1)
    pub move_z: i8,
    /// Jump requested this tick
    pub jump: bool,
    /// Control is captured (pointer lock held)
    pub control_active: bool,
    /// View yaw (radians)
    pub heading: f32,
}

/// Advance the run to monotonic time `now` (seconds)
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) {
    // Finished runs stay exactly as they ended
    if state.outcome.is_terminal() {
        return;
    }

    let dt = advance_clock(state, now);
    state.time_ticks += 1;

    // Animated objects keep moving even while control is released
    state.registry.animate(state.elapsed);

    apply_input(state, input, now);
    if !state.player.control_active {
        return;
    }

    let jump_height = state.player.jump.update(now, &state.settings.jump);
    if let Some(height) = jump_height {
        state.player.position.y = height;
    }

    let local = horizontal_displacement(state.player.intent, state.settings.move_speed, dt as f32);
    let step = view_to_world(local.x, local.y, state.player.heading);
    state.player.position += step;

    let mut volume = state.player.bounding_volume();

    if let Some(cause) = query_deadly(&volume, &state.registry) {
        state.outcome = RunOutcome::Lost;
        state.events.push(GameEvent::Lost { cause });
        log::info!(
            "Run lost at ({:.1}, {:.1}, {:.1}) to {:?}, score {}",
            state.player.position.x,
            state.player.position.y,
            state.player.position.z,
            cause,
            state.score
        );
        return;
    }

    if let Some(wall) = query_blocking(&volume, &state.registry) {
        // Undo this frame's horizontal step only; the jump arc is untouched
        state.player.position -= step;
        volume = state.player.bounding_volume();
        state.events.push(GameEvent::Blocked(wall));
        log::debug!("Blocked by {:?}", wall);
    }

    let pickups = query_collectables(&volume, &state.registry);
    if !pickups.is_empty() {
        for id in pickups {
            if state.registry.unregister(id).is_some() {
                state.score += 1;
                state.events.push(GameEvent::ObjectRemoved(id));
                log::debug!("Collected {:?}, score {}", id, state.score);
            }
        }
        state.events.push(GameEvent::ScoreChanged(state.score));
    }

    if state.player.position.x <= state.settings.finish_x {
        state.outcome = RunOutcome::Won;
        state.events.push(GameEvent::Won { score: state.score });
        log::info!(
            "Run won after {:.1}s with score {}",
            state.elapsed,
            state.score
        );
    }

    state.events.push(GameEvent::PlayerMoved {
        position: state.player.position,
        jump_height,
    });
    log::trace!("Tick {}: player at {:?}", state.time_ticks, state.player.position);
}

/// Record `now` and return the wall-clock step since the previous tick
fn advance_clock(state: &mut GameState, now: f64) -> f64 {
    let dt = match state.last_tick {
        Some(prev) => (now - prev).max(0.0),
        None => 0.0,
    };
    state.last_tick = Some(now);

    let dt = match state.settings.max_tick_dt {
        Some(max_dt) if dt > max_dt => {
            log::warn!(
                "Tick gap of {:.1}ms capped to {:.1}ms",
                dt * 1000.0,
                max_dt * 1000.0
            );
            max_dt
        }
        _ => dt,
    };

    state.elapsed += dt;
    dt
}

fn apply_input(state: &mut GameState, input: &TickInput, now: f64) {
    let player = &mut state.player;

    if player.control_active != input.control_active {
        log::info!(
            "Control {}",
            if input.control_active { "captured" } else { "released" }
        );
    }
    player.control_active = input.control_active;
    player.heading = input.heading;

    let intent = MoveIntent::new(input.move_x, input.move_z);
    if intent.is_moving() != player.intent.is_moving() {
        state.events.push(GameEvent::RunningChanged(intent.is_moving()));
    }
    player.intent = intent;

    if input.jump && player.control_active && player.jump.begin(now, &state.settings.jump) {
        log::debug!("Jump at t={:.3}", now);
    }
}
