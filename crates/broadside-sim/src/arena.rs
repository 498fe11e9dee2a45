//! Arena bounds and the world query surface used by AI and navigation.

use glam::DVec2;
use hecs::World;
use rand::{Rng, RngCore};

use broadside_ai::targeting::Candidate;
use broadside_core::components::{Hull, Transform};
use broadside_core::enums::{EntityKind, VesselClass};
use broadside_core::geometry::Polygon;
use broadside_core::health::{Damageable, Health};

use crate::engine::handle_of;

/// Read-only queries an entity may make about its surroundings.
pub trait WorldQuery {
    fn is_point_in_bounds(&self, point: DVec2) -> bool;
    /// Uniform random point inside the bounds.
    fn random_point_in_bounds(&self, rng: &mut dyn RngCore) -> DVec2;
    /// Shapes that block navigation paths.
    fn obstacles(&self) -> &[Polygon];
    /// Live vessels of `class`, in world iteration order.
    fn vessels(&self, class: VesselClass) -> Vec<Candidate>;
}

/// Rectangular play area anchored at the origin.
#[derive(Debug, Clone)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
    obstacles: Vec<Polygon>,
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            obstacles: Vec::new(),
        }
    }

    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }

    /// Re-read obstacle shapes (colleges and rocks) from the world.
    pub fn refresh_obstacles(&mut self, world: &World) {
        self.obstacles.clear();
        for (_entity, (kind, hull)) in world.query::<(&EntityKind, &Hull)>().iter() {
            if kind.is_obstacle() {
                self.obstacles.push(hull.0.clone());
            }
        }
    }

    /// Point at fractional coordinates of the arena.
    pub fn at(&self, fx: f64, fy: f64) -> DVec2 {
        DVec2::new(self.width * fx, self.height * fy)
    }
}

/// [`WorldQuery`] over an arena and the entities in a world.
pub struct WorldView<'w> {
    pub arena: &'w Arena,
    pub world: &'w World,
}

impl<'w> WorldView<'w> {
    pub fn new(arena: &'w Arena, world: &'w World) -> Self {
        Self { arena, world }
    }
}

impl WorldQuery for WorldView<'_> {
    fn is_point_in_bounds(&self, point: DVec2) -> bool {
        self.arena.contains(point)
    }

    fn random_point_in_bounds(&self, rng: &mut dyn RngCore) -> DVec2 {
        DVec2::new(
            rng.gen_range(0.0..=self.arena.width),
            rng.gen_range(0.0..=self.arena.height),
        )
    }

    fn obstacles(&self) -> &[Polygon] {
        &self.arena.obstacles
    }

    fn vessels(&self, class: VesselClass) -> Vec<Candidate> {
        self.world
            .query::<(&EntityKind, &Transform, &Health)>()
            .iter()
            .filter(|(_, (kind, _, health))| {
                kind.vessel_class() == Some(class) && !health.is_dead()
            })
            .map(|(entity, (_, transform, _))| Candidate {
                handle: handle_of(entity),
                position: transform.position,
            })
            .collect()
    }
}
