//! Instantaneous ray projectiles.
//!
//! A ray never travels. It is resolved once, at creation, against a snapshot
//! of candidate entities, then lingers for a short show window before it is
//! marked for removal.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{RAY_MAX_RANGE, RAY_SHOW_SECS};
use crate::enums::{Faction, ProjectileKind};
use crate::geometry::{heading_vector, Polygon};
use crate::health::Damageable;

/// Anything with a centre and a collision shape.
pub trait Shaped {
    fn center(&self) -> DVec2;
    fn shape(&self) -> &Polygon;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileRay {
    pub origin: DVec2,
    /// Direction in degrees.
    pub rotation: f64,
    pub damage: f64,
    pub range: f64,
    pub owner: Faction,
    show_secs: f64,
    elapsed_secs: f64,
    remove: bool,
}

impl ProjectileRay {
    /// A ray of the given kind's base damage scaled by `damage_multiplier`.
    pub fn new(
        origin: DVec2,
        rotation: f64,
        kind: ProjectileKind,
        owner: Faction,
        damage_multiplier: f64,
    ) -> Self {
        Self {
            origin,
            rotation,
            damage: kind.damage() * damage_multiplier,
            range: RAY_MAX_RANGE,
            owner,
            show_secs: RAY_SHOW_SECS,
            elapsed_secs: 0.0,
            remove: false,
        }
    }

    /// Far end of the ray segment.
    pub fn end(&self) -> DVec2 {
        self.origin + heading_vector(self.rotation) * self.range
    }

    pub fn show_secs(&self) -> f64 {
        self.show_secs
    }

    fn hits<T: Shaped>(&self, entity: &T) -> bool {
        entity.shape().intersects_segment(self.origin, self.end())
    }

    /// Indices of every intersecting entity, nearest first.
    /// Equal distances keep their input order.
    fn sorted_indices<T: Shaped>(&self, entities: &[T]) -> Vec<usize> {
        let mut hits: Vec<(usize, f64)> = entities
            .iter()
            .enumerate()
            .filter(|(_, e)| self.hits(*e))
            .map(|(i, e)| (i, self.origin.distance_squared(e.center())))
            .collect();
        hits.sort_by(|a, b| a.1.total_cmp(&b.1));
        hits.into_iter().map(|(i, _)| i).collect()
    }

    /// Every entity whose shape the ray crosses, in input order.
    pub fn intersecting<'a, T: Shaped>(&self, entities: &'a [T]) -> Vec<&'a T> {
        entities.iter().filter(|e| self.hits(*e)).collect()
    }

    /// Every entity whose shape the ray crosses, nearest to the origin first.
    pub fn sorted_intersecting<'a, T: Shaped>(&self, entities: &'a [T]) -> Vec<&'a T> {
        self.sorted_indices(entities)
            .into_iter()
            .map(|i| &entities[i])
            .collect()
    }

    /// The `n` nearest intersecting entities. Fewer if fewer are hit.
    pub fn n_closest<'a, T: Shaped>(&self, entities: &'a [T], n: usize) -> Vec<&'a T> {
        self.sorted_indices(entities)
            .into_iter()
            .take(n)
            .map(|i| &entities[i])
            .collect()
    }

    /// Damage the `n` nearest intersecting entities once each, nearest first.
    /// Returns the indices that were damaged, in the order they were hit.
    pub fn fire<T: Shaped + Damageable>(&self, entities: &mut [T], n: usize) -> Vec<usize> {
        let hit: Vec<usize> = self.sorted_indices(entities).into_iter().take(n).collect();
        for &i in &hit {
            entities[i].damage(self.damage);
        }
        hit
    }

    /// Advance the show window.
    pub fn update(&mut self, delta: f64) {
        self.elapsed_secs += delta;
        if self.elapsed_secs >= self.show_secs {
            self.remove = true;
        }
    }

    pub fn should_remove(&self) -> bool {
        self.remove
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::Health;

    /// Minimal damageable target with a boat-sized hull.
    struct Dummy {
        id: usize,
        hull: Polygon,
        health: Health,
    }

    impl Dummy {
        fn at(id: usize, x: f64, y: f64) -> Self {
            let mut hull = Polygon::rectangle(100.0, 50.0);
            hull.set_transform(DVec2::new(x, y), 0.0);
            Self {
                id,
                hull,
                health: Health::new(100.0),
            }
        }
    }

    impl Shaped for Dummy {
        fn center(&self) -> DVec2 {
            self.hull.position()
        }
        fn shape(&self) -> &Polygon {
            &self.hull
        }
    }

    impl Damageable for Dummy {
        fn health(&self) -> f64 {
            self.health.health()
        }
        fn max_health(&self) -> f64 {
            self.health.max_health()
        }
        fn damage(&mut self, amount: f64) {
            self.health.damage(amount)
        }
        fn kill(&mut self) {
            self.health.kill()
        }
        fn is_killed(&self) -> bool {
            self.health.is_killed()
        }
    }

    /// Five in a line along +x, one off-axis; input order deliberately scrambled.
    fn fixture() -> Vec<Dummy> {
        let mut v = vec![Dummy::at(5, 100.0, 100.0)];
        for (id, x) in [(3, 550.0), (0, 100.0), (4, 700.0), (2, 400.0), (1, 250.0)] {
            v.push(Dummy::at(id, x, 0.0));
        }
        v
    }

    fn ray() -> ProjectileRay {
        ProjectileRay::new(DVec2::ZERO, 0.0, ProjectileKind::Ray, Faction::Player, 1.0)
    }

    #[test]
    fn test_intersecting_membership() {
        let targets = fixture();
        let mut ids: Vec<usize> = ray().intersecting(&targets).iter().map(|d| d.id).collect();
        ids.sort();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_sorted_intersecting_order() {
        let targets = fixture();
        let ids: Vec<usize> = ray()
            .sorted_intersecting(&targets)
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_n_closest_truncates() {
        let targets = fixture();
        let ids: Vec<usize> = ray().n_closest(&targets, 2).iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![0, 1]);

        let all = ray().n_closest(&targets, 50);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_fire_damages_nearest_only() {
        let mut targets = fixture();
        let r = ray();
        let hit = r.fire(&mut targets, 1);
        assert_eq!(hit.len(), 1);

        for t in &targets {
            if t.id == 0 {
                assert_eq!(t.health(), 100.0 - r.damage);
            } else {
                assert_eq!(t.health(), 100.0);
            }
        }
    }

    #[test]
    fn test_equal_distance_keeps_input_order() {
        // Two identical targets stacked on the same spot.
        let targets = vec![Dummy::at(7, 300.0, 0.0), Dummy::at(8, 300.0, 0.0)];
        let ids: Vec<usize> = ray()
            .sorted_intersecting(&targets)
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![7, 8]);
    }

    #[test]
    fn test_remove_after_show_window() {
        let mut r = ray();
        assert!(!r.should_remove());
        r.update(r.show_secs() / 2.0);
        assert!(!r.should_remove());
        r.update(r.show_secs() / 2.0);
        assert!(r.should_remove());
    }
}
