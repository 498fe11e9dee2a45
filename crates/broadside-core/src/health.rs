//! Damageable capability shared by every health-bearing entity.

use serde::{Deserialize, Serialize};

/// Something that can take damage and die.
pub trait Damageable {
    fn health(&self) -> f64;
    fn max_health(&self) -> f64;

    /// Apply `amount` of damage. Negative amounts heal.
    /// The result is always clamped into `[0, max_health]`.
    fn damage(&mut self, amount: f64);

    /// Mark for removal regardless of remaining health.
    fn kill(&mut self);

    /// Whether the kill flag has been raised.
    fn is_killed(&self) -> bool;

    fn is_dead(&self) -> bool {
        self.is_killed() || self.health() <= 0.0
    }
}

/// Clamped health pool with an explicit kill flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    current: f64,
    max: f64,
    killed: bool,
}

impl Health {
    /// A full pool of `max` health.
    pub fn new(max: f64) -> Self {
        Self {
            current: max,
            max,
            killed: false,
        }
    }

    /// Remaining health as a fraction of the maximum.
    pub fn ratio(&self) -> f64 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }
}

impl Damageable for Health {
    fn health(&self) -> f64 {
        self.current
    }

    fn max_health(&self) -> f64 {
        self.max
    }

    fn damage(&mut self, amount: f64) {
        self.current = (self.current - amount).clamp(0.0, self.max);
    }

    fn kill(&mut self) {
        self.killed = true;
    }

    fn is_killed(&self) -> bool {
        self.killed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overkill_clamps_to_zero() {
        let mut hp = Health::new(100.0);
        hp.damage(250.0);
        assert_eq!(hp.health(), 0.0);
        assert!(hp.is_dead());
    }

    #[test]
    fn test_overheal_clamps_to_max() {
        let mut hp = Health::new(100.0);
        hp.damage(30.0);
        hp.damage(-500.0);
        assert_eq!(hp.health(), 100.0);
    }

    #[test]
    fn test_kill_flag_overrides_health() {
        let mut hp = Health::new(100.0);
        assert!(!hp.is_dead());
        hp.kill();
        assert!(hp.is_dead());
        assert_eq!(hp.health(), 100.0);
    }

    #[test]
    fn test_ratio() {
        let mut hp = Health::new(80.0);
        hp.damage(20.0);
        assert_eq!(hp.ratio(), 0.75);
    }
}
