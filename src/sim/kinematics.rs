//! Player kinematics: horizontal stepping and the closed-form jump arc
//!
//! The jump height is evaluated directly from time since takeoff rather than
//! integrated frame by frame, so it does not drift with frame rate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Movement intent on the two view axes, each in {-1, 0, 1}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveIntent {
    /// Strafe: -1 left, 1 right
    pub x: i8,
    /// Walk: -1 back, 1 forward
    pub z: i8,
}

impl MoveIntent {
    /// Build an intent, collapsing any magnitude to its sign
    pub fn new(x: i8, z: i8) -> Self {
        Self {
            x: x.signum(),
            z: z.signum(),
        }
    }

    pub fn is_moving(&self) -> bool {
        self.x != 0 || self.z != 0
    }
}

/// Step for one tick: `dir * speed * dt` on each axis
pub fn horizontal_displacement(intent: MoveIntent, speed: f32, dt: f32) -> Vec2 {
    Vec2::new(intent.x as f32, intent.z as f32) * speed * dt.max(0.0)
}

/// Jump arc parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpParams {
    /// Height the arc starts and ends at
    pub initial_height: f32,
    pub initial_velocity: f32,
    pub gravity: f32,
    /// Real seconds per trajectory unit, before `time_scale`
    pub duration_scale: f64,
    pub time_scale: f64,
}

impl Default for JumpParams {
    fn default() -> Self {
        Self {
            initial_height: JUMP_INITIAL_HEIGHT,
            initial_velocity: JUMP_INITIAL_VELOCITY,
            gravity: JUMP_GRAVITY,
            duration_scale: JUMP_DURATION_SCALE,
            time_scale: JUMP_TIME_SCALE,
        }
    }
}

impl JumpParams {
    /// Trajectory time for `elapsed` real seconds since takeoff
    #[inline]
    pub fn trajectory_time(&self, elapsed: f64) -> f32 {
        (elapsed / self.duration_scale * self.time_scale) as f32
    }

    /// Real seconds from takeoff to landing
    pub fn airtime(&self) -> f64 {
        let t_land = 2.0 * self.initial_velocity as f64 / self.gravity as f64;
        t_land * self.duration_scale / self.time_scale
    }
}

/// Raw arc height at `now` (may dip below the takeoff height after landing)
pub fn jump_height(now: f64, takeoff_time: f64, takeoff_height: f32, params: &JumpParams) -> f32 {
    let t = params.trajectory_time(now - takeoff_time);
    takeoff_height + params.initial_velocity * t - 0.5 * params.gravity * t * t
}

/// Vertical state of the player
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum JumpState {
    #[default]
    Grounded,
    Airborne { takeoff_time: f64, takeoff_height: f32 },
}

impl JumpState {
    pub fn is_airborne(&self) -> bool {
        matches!(self, JumpState::Airborne { .. })
    }

    /// Take off at `now`. Ignored while already airborne.
    ///
    /// Returns whether a new jump started.
    pub fn begin(&mut self, now: f64, params: &JumpParams) -> bool {
        if self.is_airborne() {
            return false;
        }
        *self = JumpState::Airborne {
            takeoff_time: now,
            takeoff_height: params.initial_height,
        };
        true
    }

    /// Height for this tick, or `None` while grounded.
    ///
    /// Once the arc comes back down to the takeoff height the jump ends and
    /// the takeoff height is returned for the landing tick.
    pub fn update(&mut self, now: f64, params: &JumpParams) -> Option<f32> {
        let JumpState::Airborne {
            takeoff_time,
            takeoff_height,
        } = *self
        else {
            return None;
        };

        let height = jump_height(now, takeoff_time, takeoff_height, params);
        if now > takeoff_time && height <= takeoff_height {
            *self = JumpState::Grounded;
            return Some(takeoff_height);
        }
        Some(height.max(takeoff_height))
    }
}
