//! Missile spawning
//!
//! A missile appears whenever more than `spawn_interval_ms` has passed since
//! the last spawn. Each spawn shortens the interval a little, down to a floor.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Missile};
use crate::tuning::Tuning;

/// True when a new missile should spawn at `now_ms`
#[inline]
pub fn spawn_due(now_ms: f64, last_spawn_ms: f64, spawn_interval_ms: f64) -> bool {
    now_ms - last_spawn_ms > spawn_interval_ms
}

/// Next interval after a spawn (exponential decay toward the floor)
#[inline]
pub fn decayed_interval(interval_ms: f64, tuning: &Tuning) -> f64 {
    (interval_ms * tuning.spawn_decay).max(tuning.min_spawn_interval_ms)
}

/// Roll attributes for a new missile just above the top edge
pub fn roll_missile<R: Rng>(rng: &mut R, id: u32, width: f32, score: u32, tuning: &Tuning) -> Missile {
    let radius = rng.random_range(tuning.missile_min_radius..tuning.missile_max_radius);

    // Keep the whole missile inside the playfield horizontally
    let x = if width > radius * 2.0 {
        radius + rng.random::<f32>() * (width - radius * 2.0)
    } else {
        width / 2.0
    };

    let base_speed = rng.random_range(tuning.missile_min_speed..tuning.missile_max_speed);
    let speed = base_speed + score as f32 * tuning.speed_per_point;

    Missile {
        id,
        pos: Vec2::new(x, -radius),
        radius,
        speed,
    }
}

/// Spawn a missile into `state` if one is due. Returns the new missile's id.
pub fn maybe_spawn(state: &mut GameState, now_ms: f64, width: f32) -> Option<u32> {
    if !spawn_due(now_ms, state.last_spawn_ms, state.spawn_interval_ms) {
        return None;
    }

    let id = state.next_entity_id();
    let score = state.score;
    let tuning = state.tuning.clone();
    let missile = roll_missile(state.rng(), id, width, score, &tuning);
    log::debug!(
        "Spawned missile {} at x={:.1} r={:.1} speed={:.1}",
        id,
        missile.pos.x,
        missile.radius,
        missile.speed
    );
    state.missiles.push(missile);

    state.last_spawn_ms = now_ms;
    state.spawn_interval_ms = decayed_interval(state.spawn_interval_ms, &tuning);

    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_due_is_strict() {
        assert!(!spawn_due(2000.0, 0.0, 2000.0));
        assert!(spawn_due(2001.0, 0.0, 2000.0));
    }

    #[test]
    fn test_first_spawn_after_interval() {
        let mut state = GameState::new(7);
        state.reset();
        assert!(maybe_spawn(&mut state, 1999.0, 800.0).is_none());
        assert!(maybe_spawn(&mut state, 2001.0, 800.0).is_some());
        assert_eq!(state.missiles.len(), 1);
        assert_eq!(state.last_spawn_ms, 2001.0);
        assert!((state.spawn_interval_ms - 1990.0).abs() < 1e-9);
        // Not due again immediately
        assert!(maybe_spawn(&mut state, 2002.0, 800.0).is_none());
    }

    #[test]
    fn test_interval_floors_at_minimum() {
        let tuning = Tuning::default();
        let mut interval = 2000.0;
        for _ in 0..1000 {
            interval = decayed_interval(interval, &tuning);
        }
        assert_eq!(interval, 400.0);
    }

    #[test]
    fn test_speed_grows_with_score() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let m = roll_missile(&mut rng, 1, 800.0, 50, &tuning);
        assert!(m.speed >= 90.0 && m.speed < 120.0);
    }

    #[test]
    fn test_narrow_playfield_centers_missile() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let m = roll_missile(&mut rng, 1, 10.0, 0, &tuning);
        assert_eq!(m.pos.x, 5.0);
    }

    proptest! {
        #[test]
        fn prop_spawned_missile_fits_playfield(seed in any::<u64>(), width in 60.0f32..4000.0, score in 0u32..200) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let m = roll_missile(&mut rng, 1, width, score, &tuning);
            prop_assert!(m.radius >= 15.0 && m.radius < 25.0);
            prop_assert!(m.pos.x >= m.radius - 1e-3);
            prop_assert!(m.pos.x <= width - m.radius + 1e-3);
            prop_assert_eq!(m.pos.y, -m.radius);
            let base = m.speed - score as f32;
            prop_assert!(base >= 40.0 - 1e-3 && base < 70.0 + 1e-3);
        }
    }
}
