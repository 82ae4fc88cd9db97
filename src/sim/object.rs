//! World objects: placed entities the player can touch
//!
//! An object is a local-space box carried by a transform. Its world box is
//! derived from the current pose on every query, so animated objects never
//! report a stale volume.

use glam::{Affine3A, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;

/// Interaction class, fixed when the object is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Touching it ends the run
    Deadly,
    /// Solid: the player's horizontal step is rolled back
    Blocking,
    /// Consumed on touch for one point
    Collectable,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Deadly, Category::Blocking, Category::Collectable];
}

/// Session-unique object handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Placement of an object in the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    /// Rotation about +Y (radians)
    pub yaw: f32,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            yaw: 0.0,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(
            self.scale,
            Quat::from_rotation_y(self.yaw),
            self.translation,
        )
    }
}

/// Pose animation evaluated against session time
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Animation {
    #[default]
    Static,
    /// Walk back and forth along `direction` (unit XZ vector), `amplitude`
    /// units either side of the base position, one round trip per `period` s.
    Patrol {
        direction: Vec3,
        amplitude: f32,
        period: f32,
    },
}

impl Animation {
    /// Offset from the base translation at session time `time`
    pub fn offset_at(&self, time: f64) -> Vec3 {
        match *self {
            Animation::Static => Vec3::ZERO,
            Animation::Patrol {
                direction,
                amplitude,
                period,
            } => {
                if period <= 0.0 {
                    return Vec3::ZERO;
                }
                let phase = (time / period as f64).fract() as f32 * std::f32::consts::TAU;
                direction * (amplitude * phase.sin())
            }
        }
    }

    pub fn is_animated(&self) -> bool {
        !matches!(self, Animation::Static)
    }
}

/// A placed entity with a derivable bounding volume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldObject {
    /// Box in model space, before the transform
    pub local_bounds: Aabb,
    /// Pose the object was placed with
    pub base: Transform,
    pub animation: Animation,
    /// Current pose (base + animation)
    pose: Transform,
}

impl WorldObject {
    pub fn new(local_bounds: Aabb, base: Transform) -> Self {
        Self {
            local_bounds,
            base,
            animation: Animation::Static,
            pose: base,
        }
    }

    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self
    }

    /// Axis-aligned box of a given size sitting at `center`
    pub fn cuboid(center: Vec3, size: Vec3) -> Self {
        Self::new(Aabb::centered(size), Transform::from_translation(center))
    }

    /// Re-pose from the base transform for session time `time`
    pub fn animate(&mut self, time: f64) {
        if self.animation.is_animated() {
            self.pose.translation = self.base.translation + self.animation.offset_at(time);
        }
    }

    /// World-space box for the current pose (never cached)
    pub fn bounding_volume(&self) -> Aabb {
        self.local_bounds.transformed(&self.pose.to_affine())
    }
}
