//! Session state and core simulation types
//!
//! One `GameState` is one run. Restarting means building a new one.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::kinematics::{JumpState, MoveIntent};
use super::object::ObjectId;
use super::registry::ObjectRegistry;
use crate::settings::Settings;

/// How the run stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunOutcome {
    #[default]
    InProgress,
    /// Touched a deadly object
    Lost,
    /// Reached the finish line
    Won,
}

impl RunOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunOutcome::InProgress)
    }
}

/// Events for the presentation layer, drained by the host after each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A collectable was consumed; drop it from the scene
    ObjectRemoved(ObjectId),
    ScoreChanged(u32),
    /// Horizontal step was rolled back by a solid object
    Blocked(ObjectId),
    Lost { cause: ObjectId },
    Won { score: u32 },
    /// Pose to render this frame; `jump_height` is set while airborne
    PlayerMoved {
        position: Vec3,
        jump_height: Option<f32>,
    },
    /// Footstep cue toggled by movement intent
    RunningChanged(bool),
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Eye position in world space
    pub position: Vec3,
    pub intent: MoveIntent,
    /// View yaw (radians), 0 looks down -Z
    pub heading: f32,
    pub jump: JumpState,
    /// Pointer-lock style control flag; no movement while false
    pub control_active: bool,
    /// Full collision box size, centred on `position`
    pub size: Vec3,
}

impl PlayerState {
    pub fn new(position: Vec3, size: Vec3) -> Self {
        Self {
            position,
            intent: MoveIntent::default(),
            heading: 0.0,
            jump: JumpState::Grounded,
            control_active: false,
            size,
        }
    }

    /// Collision box at the current position
    pub fn bounding_volume(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, self.size * 0.5)
    }
}

/// Complete run state
///
/// Every live tick queues at least a `PlayerMoved` event; the host must call
/// [`GameState::drain_events`] each frame or the queue keeps growing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    pub player: PlayerState,
    pub registry: ObjectRegistry,
    pub score: u32,
    pub outcome: RunOutcome,
    /// Monotonic timestamp of the previous tick (seconds)
    pub last_tick: Option<f64>,
    /// Session time accumulated across ticks, drives object animation
    pub elapsed: f64,
    pub time_ticks: u64,
    /// Pending presentation events
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh run with an empty registry
    pub fn new(settings: Settings) -> Self {
        Self::with_registry(settings, ObjectRegistry::new())
    }

    /// Fresh run over an already populated registry.
    ///
    /// Settings are sanitized here, so hand-built values can't stall a jump.
    pub fn with_registry(settings: Settings, registry: ObjectRegistry) -> Self {
        let settings = settings.sanitized();
        let player = PlayerState::new(settings.spawn_position, settings.player_size);
        Self {
            settings,
            player,
            registry,
            score: 0,
            outcome: RunOutcome::InProgress,
            last_tick: None,
            elapsed: 0.0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Hand pending events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_starts_in_progress() {
        let state = GameState::new(Settings::default());
        assert_eq!(state.outcome, RunOutcome::InProgress);
        assert_eq!(state.score, 0);
        assert!(!state.player.control_active);
        assert!(!state.player.jump.is_airborne());
        assert_eq!(state.player.position, Settings::default().spawn_position);
    }

    #[test]
    fn test_player_volume_centred_on_eye() {
        let player = PlayerState::new(Vec3::new(820.0, 8.9, 50.0), Vec3::new(5.0, 25.0, 10.0));
        let volume = player.bounding_volume();
        assert!((volume.min - Vec3::new(817.5, -3.6, 45.0)).length() < 1e-4);
        assert!((volume.max - Vec3::new(822.5, 21.4, 55.0)).length() < 1e-4);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(Settings::default());
        state.events.push(GameEvent::ScoreChanged(1));
        assert_eq!(state.drain_events(), vec![GameEvent::ScoreChanged(1)]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_hand_built_settings_are_sanitized() {
        let mut settings = Settings::default();
        settings.jump.duration_scale = 0.0;
        settings.move_speed = -1.0;
        let state = GameState::new(settings);
        assert_eq!(state.settings.jump.duration_scale, crate::consts::JUMP_DURATION_SCALE);
        assert_eq!(state.settings.move_speed, crate::consts::MOVE_SPEED);
    }

    #[test]
    fn test_outcome_terminal() {
        assert!(!RunOutcome::InProgress.is_terminal());
        assert!(RunOutcome::Lost.is_terminal());
        assert!(RunOutcome::Won.is_terminal());
    }
}
