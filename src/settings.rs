//! Run tuning
//!
//! Everything the simulation treats as a constant, in one serializable
//! bundle. Hosts may ship a JSON override; missing fields fall back to the
//! reference values in [`crate::consts`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::kinematics::JumpParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Horizontal speed (units/s)
    pub move_speed: f32,
    pub jump: JumpParams,
    /// Full size of the player's collision box
    pub player_size: Vec3,
    /// Eye position at the start of a run
    pub spawn_position: Vec3,
    /// The run is won once the player's X is at or below this
    pub finish_x: f32,
    /// Optional cap on one tick's dt (seconds). `None` uses the full
    /// wall-clock gap.
    pub max_tick_dt: Option<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            jump: JumpParams::default(),
            player_size: Vec3::from_array(PLAYER_SIZE),
            spawn_position: Vec3::from_array(SPAWN_POSITION),
            finish_x: FINISH_X,
            max_tick_dt: None,
        }
    }
}

impl Settings {
    /// Parse from JSON. Fields left out keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Parse an optional JSON override, falling back to defaults on error
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json {
            Some(json) => match Self::from_json(json) {
                Ok(settings) => {
                    log::info!("Loaded settings override");
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring invalid settings ({}), using defaults", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Replace values the simulation can't run with by their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Settings::default();

        if !(self.move_speed > 0.0) {
            log::warn!("move_speed {} must be positive, using {}", self.move_speed, defaults.move_speed);
            self.move_speed = defaults.move_speed;
        }
        if !(self.jump.gravity > 0.0) {
            log::warn!("jump.gravity {} must be positive, using {}", self.jump.gravity, defaults.jump.gravity);
            self.jump.gravity = defaults.jump.gravity;
        }
        if !(self.jump.duration_scale > 0.0) {
            log::warn!(
                "jump.duration_scale {} must be positive, using {}",
                self.jump.duration_scale,
                defaults.jump.duration_scale
            );
            self.jump.duration_scale = defaults.jump.duration_scale;
        }
        if !(self.jump.time_scale > 0.0) {
            log::warn!(
                "jump.time_scale {} must be positive, using {}",
                self.jump.time_scale,
                defaults.jump.time_scale
            );
            self.jump.time_scale = defaults.jump.time_scale;
        }
        if self.player_size.min_element() < 0.0 || !self.player_size.is_finite() {
            log::warn!("player_size {:?} is invalid, using {:?}", self.player_size, defaults.player_size);
            self.player_size = defaults.player_size;
        }
        if let Some(max_dt) = self.max_tick_dt
            && !(max_dt > 0.0)
        {
            log::warn!("max_tick_dt {} must be positive, disabling the cap", max_dt);
            self.max_tick_dt = None;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_values() {
        let s = Settings::default();
        assert_eq!(s.move_speed, 50.0);
        assert_eq!(s.jump.initial_height, 10.0);
        assert_eq!(s.jump.initial_velocity, 20.0);
        assert_eq!(s.finish_x, -473.0);
        assert_eq!(s.spawn_position, Vec3::new(905.0, 8.9, 97.0));
        assert_eq!(s.max_tick_dt, None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "move_speed": 80.0, "jump": { "gravity": 12.0 } }"#)
            .expect("valid json");
        assert_eq!(s.move_speed, 80.0);
        assert_eq!(s.jump.gravity, 12.0);
        assert_eq!(s.jump.initial_velocity, JUMP_INITIAL_VELOCITY);
        assert_eq!(s.finish_x, FINISH_X);
    }

    #[test]
    fn test_sanitize_repairs_bad_values() {
        let s = Settings::from_json(r#"{ "move_speed": -5.0, "jump": { "time_scale": 0.0 } }"#)
            .expect("valid json");
        assert_eq!(s.move_speed, MOVE_SPEED);
        assert_eq!(s.jump.time_scale, JUMP_TIME_SCALE);
    }

    #[test]
    fn test_non_positive_tick_cap_is_disabled() {
        let s = Settings::from_json(r#"{ "max_tick_dt": 0.0 }"#).expect("valid json");
        assert_eq!(s.max_tick_dt, None);

        let s = Settings::from_json(r#"{ "max_tick_dt": 0.1 }"#).expect("valid json");
        assert_eq!(s.max_tick_dt, Some(0.1));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        assert_eq!(Settings::load_or_default(Some("not json")), Settings::default());
        assert_eq!(Settings::load_or_default(None), Settings::default());
    }

    #[test]
    fn test_json_round_trip() {
        let original = Settings {
            finish_x: -100.0,
            ..Default::default()
        };
        let json = serde_json::to_string(&original).expect("serialize");
        assert_eq!(Settings::from_json(&json).expect("parse"), original);
    }
}
