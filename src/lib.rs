//! Corridor Run - simulation core for a first-person corridor runner
//!
//! Core modules:
//! - `sim`: Per-frame simulation (kinematics, registry, collision, frame controller)
//! - `settings`: Data-driven tuning
//! - `stage`: Stock level provider that populates a registry

pub mod settings;
pub mod sim;
pub mod stage;

pub use settings::Settings;
pub use stage::{StageLayout, build_stage};

use glam::Vec3;

/// Reference tuning constants
pub mod consts {
    /// Horizontal movement speed (world units per second)
    pub const MOVE_SPEED: f32 = 50.0;

    /// Resting eye height, also the jump floor
    pub const JUMP_INITIAL_HEIGHT: f32 = 10.0;
    /// Upward launch velocity
    pub const JUMP_INITIAL_VELOCITY: f32 = 20.0;
    pub const JUMP_GRAVITY: f32 = 9.8;
    /// Real seconds per unit of trajectory time (before TIME_SCALE)
    pub const JUMP_DURATION_SCALE: f64 = 0.35;
    pub const JUMP_TIME_SCALE: f64 = 1.5;

    /// Player collision box (full size, centred on the eye)
    pub const PLAYER_SIZE: [f32; 3] = [5.0, 25.0, 10.0];

    /// Spawn pose
    pub const SPAWN_POSITION: [f32; 3] = [905.0, 8.9, 97.0];

    /// Run is won once the player's X drops to this value
    pub const FINISH_X: f32 = -473.0;
}

/// Rotate a view-space horizontal step (right, forward) into world XZ by `yaw`.
///
/// Yaw 0 looks down -Z, positive yaw turns left (toward -X).
#[inline]
pub fn view_to_world(right: f32, forward: f32, yaw: f32) -> Vec3 {
    let (sin, cos) = yaw.sin_cos();
    let right_axis = Vec3::new(cos, 0.0, -sin);
    let forward_axis = Vec3::new(-sin, 0.0, -cos);
    right_axis * right + forward_axis * forward
}
