//! Nearest-target selection.

use glam::DVec2;

use broadside_core::constants::TARGET_SEARCH_SENTINEL;
use broadside_core::types::EntityHandle;

/// A live entity that may be chosen as a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub handle: EntityHandle,
    pub position: DVec2,
}

/// Closest candidate strictly nearer than the search sentinel.
///
/// Ties keep the first candidate encountered, so results depend only on
/// iteration order.
pub fn nearest<I>(origin: DVec2, candidates: I) -> Option<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    let mut best = None;
    let mut shortest = TARGET_SEARCH_SENTINEL;
    for c in candidates {
        let d = c.position.distance(origin);
        if d < shortest {
            shortest = d;
            best = Some(c);
        }
    }
    best
}

/// `priority` whenever it is closer than `priority_range`, otherwise the
/// nearest of `others`.
pub fn priority_or_nearest<I>(
    origin: DVec2,
    priority: Option<Candidate>,
    priority_range: f64,
    others: I,
) -> Option<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    if let Some(p) = priority {
        if p.position.distance(origin) < priority_range {
            return Some(p);
        }
    }
    nearest(origin, others)
}
