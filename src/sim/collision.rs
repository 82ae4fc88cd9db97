//! Collision queries between the player box and registered objects
//!
//! Straight linear scans over each category. Deadly and Blocking only need to
//! know whether *something* was hit, so they stop at the first overlap.
//! Collectables report the full hit set.

use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::object::{Category, ObjectId, WorldObject};
use super::registry::ObjectRegistry;

/// One (category, object) overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub category: Category,
    pub id: ObjectId,
}

/// Current world box of an object
#[inline]
pub fn bounding_volume_of(object: &WorldObject) -> Aabb {
    object.bounding_volume()
}

fn first_hit(player: &Aabb, registry: &ObjectRegistry, category: Category) -> Option<ObjectId> {
    registry
        .all_in(category)
        .iter()
        .find(|e| player.intersects(&bounding_volume_of(&e.object)))
        .map(|e| e.id)
}

/// First Deadly object (registration order) overlapping the player
pub fn query_deadly(player: &Aabb, registry: &ObjectRegistry) -> Option<ObjectId> {
    first_hit(player, registry, Category::Deadly)
}

/// First Blocking object (registration order) overlapping the player
pub fn query_blocking(player: &Aabb, registry: &ObjectRegistry) -> Option<ObjectId> {
    first_hit(player, registry, Category::Blocking)
}

/// Every Collectable overlapping the player, newest registration first.
///
/// Reverse order means removing each hit in turn never disturbs the entries
/// still to be processed.
pub fn query_collectables(player: &Aabb, registry: &ObjectRegistry) -> Vec<ObjectId> {
    registry
        .all_in(Category::Collectable)
        .iter()
        .rev()
        .filter(|e| player.intersects(&bounding_volume_of(&e.object)))
        .map(|e| e.id)
        .collect()
}

/// Full hit list across all categories (diagnostics)
pub fn all_hits(player: &Aabb, registry: &ObjectRegistry) -> Vec<Hit> {
    Category::ALL
        .into_iter()
        .flat_map(|category| {
            registry
                .all_in(category)
                .iter()
                .filter(move |e| player.intersects(&bounding_volume_of(&e.object)))
                .map(move |e| Hit { category, id: e.id })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn player_at(x: f32, z: f32) -> Aabb {
        Aabb::from_center_half_extents(Vec3::new(x, 8.9, z), Vec3::new(2.5, 12.5, 5.0))
    }

    #[test]
    fn test_empty_registry_has_no_hits() {
        let reg = ObjectRegistry::new();
        let player = player_at(0.0, 0.0);
        assert!(query_deadly(&player, &reg).is_none());
        assert!(query_blocking(&player, &reg).is_none());
        assert!(query_collectables(&player, &reg).is_empty());
        assert!(all_hits(&player, &reg).is_empty());
    }

    #[test]
    fn test_deadly_returns_first_in_registration_order() {
        let mut reg = ObjectRegistry::new();
        reg.register(WorldObject::cuboid(Vec3::new(500.0, 0.0, 0.0), Vec3::ONE), Category::Deadly);
        let first = reg.register(
            WorldObject::cuboid(Vec3::new(820.0, 0.0, 50.0), Vec3::new(4.0, 10.0, 10.0)),
            Category::Deadly,
        );
        reg.register(
            WorldObject::cuboid(Vec3::new(821.0, 0.0, 50.0), Vec3::new(4.0, 10.0, 10.0)),
            Category::Deadly,
        );

        assert_eq!(query_deadly(&player_at(820.0, 50.0), &reg), Some(first));
    }

    #[test]
    fn test_queries_only_look_at_their_category() {
        let mut reg = ObjectRegistry::new();
        let wall = reg.register(
            WorldObject::cuboid(Vec3::new(0.0, 0.0, 0.0), Vec3::splat(10.0)),
            Category::Blocking,
        );
        let player = player_at(0.0, 0.0);
        assert!(query_deadly(&player, &reg).is_none());
        assert_eq!(query_blocking(&player, &reg), Some(wall));
        assert!(query_collectables(&player, &reg).is_empty());
    }

    #[test]
    fn test_collectables_full_set_in_reverse_order() {
        let mut reg = ObjectRegistry::new();
        let mut ids = Vec::new();
        for i in 0..20 {
            let pos = Vec3::new(850.0 - i as f32 * 50.0, 10.0, 97.0);
            ids.push(reg.register(WorldObject::cuboid(pos, Vec3::splat(10.0)), Category::Collectable));
        }
        // Widen the player so it covers x in [795, 855]: pickups 0 and 1
        let player = Aabb::new(Vec3::new(795.0, 0.0, 90.0), Vec3::new(855.0, 20.0, 100.0));
        let hits = query_collectables(&player, &reg);
        assert_eq!(hits, vec![ids[1], ids[0]]);
    }

    #[test]
    fn test_animated_object_is_tested_at_current_pose() {
        use crate::sim::object::Animation;

        let mut reg = ObjectRegistry::new();
        let walker = reg.register(
            WorldObject::cuboid(Vec3::new(0.0, 0.0, 0.0), Vec3::splat(2.0)).with_animation(
                Animation::Patrol {
                    direction: Vec3::Z,
                    amplitude: 30.0,
                    period: 4.0,
                },
            ),
            Category::Deadly,
        );
        let player = player_at(0.0, 30.0);

        reg.animate(0.0);
        assert!(query_deadly(&player, &reg).is_none());

        reg.animate(1.0);
        assert_eq!(query_deadly(&player, &reg), Some(walker));
    }

    #[test]
    fn test_all_hits_reports_each_category() {
        let mut reg = ObjectRegistry::new();
        let d = reg.register(WorldObject::cuboid(Vec3::ZERO, Vec3::ONE), Category::Deadly);
        let b = reg.register(WorldObject::cuboid(Vec3::ZERO, Vec3::ONE), Category::Blocking);
        let c = reg.register(WorldObject::cuboid(Vec3::ZERO, Vec3::ONE), Category::Collectable);
        reg.register(WorldObject::cuboid(Vec3::splat(500.0), Vec3::ONE), Category::Collectable);

        let hits = all_hits(&player_at(0.0, 0.0), &reg);
        assert_eq!(
            hits,
            vec![
                Hit { category: Category::Deadly, id: d },
                Hit { category: Category::Blocking, id: b },
                Hit { category: Category::Collectable, id: c },
            ]
        );
    }
}
