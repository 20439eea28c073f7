//! Player weapon geometry.

use glam::Vec2;
use nrogue_core::{bearing, EnemyId, EnemyKind, Rect};

use crate::level::Level;

/// Result of casting the laser beam through a level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaserTrace {
    /// Muzzle position.
    pub start: Vec2,
    /// Point at which the beam stops.
    pub end: Vec2,
    /// Closest enemy clipped before the beam stopped.
    pub hit: Option<EnemyId>,
}

/// Point the weapon fires from, `offset` units from `center` towards `aim`.
pub(crate) fn muzzle(center: Vec2, aim: Vec2, offset: f32) -> Vec2 {
    center + bearing(center, aim) * offset
}

/// Casts a beam of length `range` from `start` towards `aim`.
///
/// The beam stops at the first wall, solid static, or enemy it clips. The goal
/// crystal stops the beam but is never reported as hit.
pub(crate) fn cast_laser(level: &Level, start: Vec2, aim: Vec2, range: f32) -> LaserTrace {
    let end = start + bearing(start, aim) * range;

    let mut stop = end;
    let mut stop_distance = range * range;
    let mut consider = |rect: Rect| -> bool {
        let Some((entry, _)) = rect.clip_segment(start, end) else {
            return false;
        };
        let distance = start.distance_squared(entry);
        if distance < stop_distance {
            stop_distance = distance;
            stop = entry;
            return true;
        }
        false
    };

    for wall in &level.walls {
        let _ = consider(wall.rect());
    }
    for object in level.statics.iter().filter(|object| object.kind.is_solid()) {
        let _ = consider(object.collide);
    }

    let mut hit = None;
    for enemy in level.enemies.iter().filter(|enemy| !enemy.defeated) {
        if consider(enemy.rect) {
            hit = match enemy.kind() {
                EnemyKind::Goal => None,
                EnemyKind::Dummy | EnemyKind::Charger | EnemyKind::Archer => Some(enemy.id),
            };
        }
    }

    LaserTrace {
        start,
        end: stop,
        hit,
    }
}
