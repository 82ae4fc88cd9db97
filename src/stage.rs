//! Stock stage: fire grid, tree rows, walking zombies and a trail of pickups
//!
//! This is the level provider for the bundled corridor. The layout is plain
//! data (loadable from JSON); randomness comes from a seeded PCG so the same
//! seed always builds the same stage.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::sim::aabb::Aabb;
use crate::sim::object::{Animation, Category, Transform, WorldObject};
use crate::sim::registry::ObjectRegistry;

/// Deadly fire boxes laid out on a grid of 0/1 cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireGrid {
    /// Rows advance toward -X, columns toward +Z
    pub cells: Vec<Vec<u8>>,
    /// World (x, z) of cell (0, 0)
    pub origin: Vec2,
    pub spacing: f32,
    pub size: Vec3,
}

impl Default for FireGrid {
    fn default() -> Self {
        Self {
            cells: vec![
                vec![1, 0, 0, 0, 0, 0, 0, 1],
                vec![0, 0, 1, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 1, 0, 0],
                vec![0, 1, 0, 0, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 1, 0, 0, 1],
                vec![0, 0, 0, 0, 0, 0, 0, 0],
                vec![1, 0, 0, 1, 0, 0, 1, 0],
            ],
            origin: Vec2::new(820.0, 50.0),
            spacing: 10.0,
            size: Vec3::new(5.0, 10.0, 25.0),
        }
    }
}

/// Blocking trees planted alternately on the two corridor edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeRows {
    pub count: u32,
    pub start_x: f32,
    pub spacing: f32,
    pub y: f32,
    /// Z of even and odd trees
    pub lanes: [f32; 2],
    pub scale: f32,
    /// Model-space box of one tree
    pub local_bounds: Aabb,
}

impl Default for TreeRows {
    fn default() -> Self {
        Self {
            count: 400,
            start_x: 955.0,
            spacing: 10.0,
            y: 90.0,
            lanes: [150.0, 15.0],
            scale: 40.0,
            local_bounds: Aabb::new(Vec3::new(-0.15, -2.25, -0.15), Vec3::new(0.15, 2.25, 0.15)),
        }
    }
}

/// Deadly walkers pacing along their facing direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZombiePack {
    /// World (x, z) spawn points
    pub spawns: Vec<Vec2>,
    pub scale: f32,
    pub local_bounds: Aabb,
    /// Distance walked either side of the spawn point
    pub patrol_amplitude: f32,
    /// Seconds for one full back-and-forth
    pub patrol_period: f32,
}

impl Default for ZombiePack {
    fn default() -> Self {
        Self {
            spawns: [
                (870.0, 110.0),
                (800.0, 60.0),
                (400.0, 83.0),
                (300.0, 97.0),
                (200.0, 70.0),
                (650.0, 60.0),
                (100.0, 90.0),
                (-50.0, 90.0),
                (-120.0, 90.0),
                (-200.0, 60.0),
            ]
            .into_iter()
            .map(|(x, z)| Vec2::new(x, z))
            .collect(),
            scale: 0.07,
            local_bounds: Aabb::new(Vec3::new(-30.0, 0.0, -15.0), Vec3::new(30.0, 180.0, 15.0)),
            patrol_amplitude: 6.0,
            patrol_period: 6.0,
        }
    }
}

/// Collectable spheres strung along the corridor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupTrail {
    pub count: u32,
    pub start_x: f32,
    pub spacing: f32,
    pub y: f32,
    /// Centre line in Z
    pub z: f32,
    /// Full width of the random Z scatter
    pub jitter: f32,
    pub radius: f32,
}

impl Default for PickupTrail {
    fn default() -> Self {
        Self {
            count: 20,
            start_x: 850.0,
            spacing: 50.0,
            y: 10.0,
            z: 80.0,
            jitter: 100.0,
            radius: 5.0,
        }
    }
}

/// Complete stage description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageLayout {
    pub fire: FireGrid,
    pub trees: TreeRows,
    pub zombies: ZombiePack,
    pub pickups: PickupTrail,
}

impl StageLayout {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Register every object of `layout` into `registry`
pub fn build_stage(layout: &StageLayout, registry: &mut ObjectRegistry, seed: u64) {
    let mut rng = Pcg32::seed_from_u64(seed);

    place_fire(&layout.fire, registry);
    place_trees(&layout.trees, registry);
    place_zombies(&layout.zombies, registry, &mut rng);
    place_pickups(&layout.pickups, registry, &mut rng);

    log::info!(
        "Stage built (seed {}): {} deadly, {} blocking, {} collectable",
        seed,
        registry.len(Category::Deadly),
        registry.len(Category::Blocking),
        registry.len(Category::Collectable)
    );
}

fn place_fire(fire: &FireGrid, registry: &mut ObjectRegistry) {
    for (row, cells) in fire.cells.iter().enumerate() {
        let x = fire.origin.x - row as f32 * fire.spacing;
        for (col, &cell) in cells.iter().enumerate() {
            if cell == 0 {
                continue;
            }
            let z = fire.origin.y + col as f32 * fire.spacing;
            registry.register(
                WorldObject::cuboid(Vec3::new(x, 0.0, z), fire.size),
                Category::Deadly,
            );
        }
    }
}

fn place_trees(trees: &TreeRows, registry: &mut ObjectRegistry) {
    for i in 0..trees.count {
        let x = trees.start_x - i as f32 * trees.spacing;
        let z = trees.lanes[(i % 2) as usize];
        let transform = Transform::from_translation(Vec3::new(x, trees.y, z)).with_scale(trees.scale);
        registry.register(WorldObject::new(trees.local_bounds, transform), Category::Blocking);
    }
}

fn place_zombies(pack: &ZombiePack, registry: &mut ObjectRegistry, rng: &mut Pcg32) {
    for spawn in &pack.spawns {
        let yaw = rng.random::<f32>() * std::f32::consts::TAU;
        let facing = Vec3::new(yaw.sin(), 0.0, yaw.cos());
        let transform = Transform::from_translation(Vec3::new(spawn.x, 0.0, spawn.y))
            .with_yaw(yaw)
            .with_scale(pack.scale);
        let zombie = WorldObject::new(pack.local_bounds, transform).with_animation(Animation::Patrol {
            direction: facing,
            amplitude: pack.patrol_amplitude,
            period: pack.patrol_period,
        });
        registry.register(zombie, Category::Deadly);
    }
}

fn place_pickups(trail: &PickupTrail, registry: &mut ObjectRegistry, rng: &mut Pcg32) {
    let size = Vec3::splat(trail.radius * 2.0);
    for i in 0..trail.count {
        let x = trail.start_x - i as f32 * trail.spacing;
        let z = trail.z + (rng.random::<f32>() - 0.5) * trail.jitter;
        registry.register(
            WorldObject::cuboid(Vec3::new(x, trail.y, z), size),
            Category::Collectable,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock_registry(seed: u64) -> ObjectRegistry {
        let mut registry = ObjectRegistry::new();
        build_stage(&StageLayout::default(), &mut registry, seed);
        registry
    }

    #[test]
    fn test_stock_stage_counts() {
        let layout = StageLayout::default();
        let registry = stock_registry(1);

        let fires: usize = layout
            .fire
            .cells
            .iter()
            .map(|row| row.iter().filter(|&&c| c != 0).count())
            .sum();
        assert_eq!(registry.len(Category::Deadly), fires + layout.zombies.spawns.len());
        assert_eq!(registry.len(Category::Blocking), 400);
        assert_eq!(registry.len(Category::Collectable), 20);
    }

    #[test]
    fn test_fire_cell_placement() {
        let layout = StageLayout {
            fire: FireGrid {
                cells: vec![vec![0, 1]],
                ..Default::default()
            },
            trees: TreeRows {
                count: 0,
                ..Default::default()
            },
            zombies: ZombiePack {
                spawns: Vec::new(),
                ..Default::default()
            },
            pickups: PickupTrail {
                count: 0,
                ..Default::default()
            },
        };
        let mut registry = ObjectRegistry::new();
        build_stage(&layout, &mut registry, 0);

        let fire = &registry.all_in(Category::Deadly)[0].object;
        let volume = fire.bounding_volume();
        assert!((volume.center() - Vec3::new(820.0, 0.0, 60.0)).length() < 1e-4);
        assert!((volume.size() - Vec3::new(5.0, 10.0, 25.0)).length() < 1e-4);
    }

    #[test]
    fn test_pickups_within_jitter_band() {
        let registry = stock_registry(42);
        let trail = PickupTrail::default();
        for (i, entry) in registry.all_in(Category::Collectable).iter().enumerate() {
            let c = entry.object.bounding_volume().center();
            assert!((c.x - (trail.start_x - i as f32 * trail.spacing)).abs() < 1e-3);
            assert!(c.z >= trail.z - trail.jitter / 2.0 && c.z <= trail.z + trail.jitter / 2.0);
        }
    }

    #[test]
    fn test_same_seed_same_stage() {
        let a = stock_registry(7);
        let b = stock_registry(7);
        let centers = |r: &ObjectRegistry| -> Vec<Vec3> {
            r.all_in(Category::Collectable)
                .iter()
                .map(|e| e.object.bounding_volume().center())
                .collect()
        };
        assert_eq!(centers(&a), centers(&b));
    }

    #[test]
    fn test_trees_leave_corridor_open() {
        let registry = stock_registry(3);
        let lane = Aabb::new(Vec3::new(-500.0, -5.0, 90.0), Vec3::new(1000.0, 25.0, 105.0));
        assert!(
            registry
                .all_in(Category::Blocking)
                .iter()
                .all(|e| !lane.intersects(&e.object.bounding_volume()))
        );
    }

    #[test]
    fn test_layout_from_partial_json() {
        let layout = StageLayout::from_json(r#"{ "pickups": { "count": 3 } }"#).expect("parse");
        assert_eq!(layout.pickups.count, 3);
        assert_eq!(layout.trees, TreeRows::default());
    }
}
