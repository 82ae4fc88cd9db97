//! Per-frame simulation module
//!
//! All gameplay logic lives here:
//! - Time comes in from the host as monotonic seconds
//! - State is owned by one `GameState` per run
//! - Stable iteration order (registration order per category)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod collision;
pub mod kinematics;
pub mod object;
pub mod registry;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use collision::{Hit, all_hits, bounding_volume_of, query_blocking, query_collectables, query_deadly};
pub use kinematics::{JumpParams, JumpState, MoveIntent, horizontal_displacement, jump_height};
pub use object::{Animation, Category, ObjectId, Transform, WorldObject};
pub use registry::{Entry, ObjectRegistry};
pub use state::{GameEvent, GameState, PlayerState, RunOutcome};
pub use tick::{TickInput, tick};
