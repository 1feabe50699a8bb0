//! Pointer hit testing against missiles
//!
//! Two passes, first match wins, both in spawn order (oldest missile first):
//! 1. precise: the pointer lies inside the missile silhouette
//! 2. fallback: the pointer lies within `fallback_hit_factor * radius` of the center
//!
//! The fallback has no absolute minimum radius, so a tap far from every
//! missile never destroys the nearest one.

use glam::Vec2;

use super::difficulty;
use super::silhouette::Silhouette;
use super::state::{Explosion, GameEvent, GameState, Missile};

/// Which pass produced a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Precise,
    Fallback,
}

/// Result of resolving a pointer against the missile list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub index: usize,
    pub kind: HitKind,
}

/// Pointer inside the missile's drawn shape
pub fn point_in_missile(missile: &Missile, pointer: Vec2) -> bool {
    Silhouette::for_radius(missile.radius).contains(pointer - missile.pos)
}

/// Pointer within the forgiving circle around the missile center
#[inline]
pub fn point_near_missile(missile: &Missile, pointer: Vec2, factor: f32) -> bool {
    let hit_radius = missile.radius * factor;
    pointer.distance_squared(missile.pos) <= hit_radius * hit_radius
}

pub fn precise_hit(missiles: &[Missile], pointer: Vec2) -> Option<usize> {
    missiles.iter().position(|m| point_in_missile(m, pointer))
}

pub fn fallback_hit(missiles: &[Missile], pointer: Vec2, factor: f32) -> Option<usize> {
    missiles
        .iter()
        .position(|m| point_near_missile(m, pointer, factor))
}

/// Find the missile a pointer destroys, if any
pub fn resolve_hit(missiles: &[Missile], pointer: Vec2, fallback_factor: f32) -> Option<Hit> {
    if let Some(index) = precise_hit(missiles, pointer) {
        return Some(Hit {
            index,
            kind: HitKind::Precise,
        });
    }
    fallback_hit(missiles, pointer, fallback_factor).map(|index| Hit {
        index,
        kind: HitKind::Fallback,
    })
}

/// Apply a pointer press to a running session.
///
/// On a hit: the missile is removed, score goes up by one, an explosion is
/// left at its last position, and progression is re-evaluated (which may end
/// the session with a win). Returns the destroyed missile.
pub fn resolve_pointer(state: &mut GameState, pointer: Vec2) -> Option<Missile> {
    if !state.is_running() {
        return None;
    }

    let hit = resolve_hit(&state.missiles, pointer, state.tuning.fallback_hit_factor)?;
    // Index is used immediately within this call, before anything else can mutate the list
    let missile = state.missiles.remove(hit.index);
    log::debug!("Destroyed missile {} ({:?} hit)", missile.id, hit.kind);

    state.score += 1;
    state.explosions.push(Explosion::new(
        missile.pos,
        missile.radius,
        state.tuning.explosion_scale,
        state.tuning.explosion_duration_ms,
    ));
    state.events.push(GameEvent::Destroy {
        missile_id: missile.id,
    });

    difficulty::apply(state);

    Some(missile)
}
