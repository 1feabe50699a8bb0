//! Per-frame simulation tick
//!
//! One tick: spawn (if due), move missiles and apply ground impacts, then
//! advance explosions. Missiles are swept newest-first; a loss stops the tick
//! immediately, leaving the older missiles unmoved that frame.

use super::spawner::maybe_spawn;
use super::state::{GameEvent, GameState, Outcome, Playfield};

/// Summary of what happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Id of the missile spawned this tick
    pub spawned: Option<u32>,
    /// Number of ground impacts this tick
    pub impacts: u32,
}

/// Advance the session to `now_ms` on a surface of the given size
pub fn tick(state: &mut GameState, now_ms: f64, playfield: Playfield) -> TickReport {
    let mut report = TickReport::default();
    if !state.is_running() {
        return report;
    }

    // First tick after start has no elapsed time
    let last = state.last_timestamp_ms.unwrap_or(now_ms);
    let dt_ms = (now_ms - last).max(0.0);
    state.last_timestamp_ms = Some(now_ms);
    state.ticks += 1;

    report.spawned = maybe_spawn(state, now_ms, playfield.width);

    report.impacts = advance_missiles(state, dt_ms, playfield.height);
    if !state.is_running() {
        return report;
    }

    advance_explosions(state, dt_ms as f32);
    report
}

/// Move every missile (newest first) and resolve ground impacts. Returns the impact count.
pub fn advance_missiles(state: &mut GameState, dt_ms: f64, ground_y: f32) -> u32 {
    let mut impacts = 0;
    for i in (0..state.missiles.len()).rev() {
        let missile = &mut state.missiles[i];
        missile.fall(dt_ms);
        if !missile.has_impacted(ground_y) {
            continue;
        }

        let missile = state.missiles.remove(i);
        let damage = state.level.max(1) as i32;
        state.health -= damage;
        impacts += 1;
        state.events.push(GameEvent::Impact { damage });
        log::debug!(
            "Missile {} hit the planet for {} damage (health {})",
            missile.id,
            damage,
            state.health
        );

        if state.health <= 0 {
            log::info!("Planet destroyed with score {}", state.score);
            state.end_session(Outcome::Loss);
            break;
        }
    }
    impacts
}

/// Grow and fade explosions, dropping finished ones
pub fn advance_explosions(state: &mut GameState, dt_ms: f32) {
    state.explosions.retain_mut(|e| !e.advance(dt_ms));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Explosion, GamePhase, Missile};
    use glam::Vec2;
    use proptest::prelude::*;

    const FIELD: Playfield = Playfield {
        width: 800.0,
        height: 600.0,
    };

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.reset();
        state
    }

    fn push_missile(state: &mut GameState, x: f32, y: f32, speed: f32) -> u32 {
        let id = state.next_entity_id();
        state.missiles.push(Missile {
            id,
            pos: Vec2::new(x, y),
            radius: 20.0,
            speed,
        });
        id
    }

    #[test]
    fn test_first_tick_past_interval_spawns_one() {
        let mut state = running(42);
        let report = tick(&mut state, 2001.0, FIELD);
        assert!(report.spawned.is_some());
        assert_eq!(state.missiles.len(), 1);
        // Zero delta on the first tick: still at its spawn height
        assert_eq!(state.missiles[0].pos.y, -state.missiles[0].radius);
    }

    #[test]
    fn test_missiles_fall_by_speed_times_delta() {
        let mut state = running(1);
        state.last_spawn_ms = 0.0;
        state.spawn_interval_ms = 1.0e9;
        push_missile(&mut state, 100.0, 0.0, 100.0);
        tick(&mut state, 1000.0, FIELD);
        tick(&mut state, 1500.0, FIELD);
        assert!((state.missiles[0].pos.y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_impact_damages_by_level() {
        let mut state = running(1);
        state.spawn_interval_ms = 1.0e9;
        state.level = 3;
        push_missile(&mut state, 100.0, 619.0, 100.0);
        state.last_timestamp_ms = Some(0.0);

        let report = tick(&mut state, 100.0, FIELD);
        assert_eq!(report.impacts, 1);
        assert!(state.missiles.is_empty());
        assert_eq!(state.health, 97);
        assert_eq!(state.drain_events(), vec![GameEvent::Impact { damage: 3 }]);
    }

    #[test]
    fn test_center_past_ground_is_not_yet_an_impact() {
        let mut state = running(1);
        state.spawn_interval_ms = 1.0e9;
        push_missile(&mut state, 100.0, 610.0, 0.0);
        state.last_timestamp_ms = Some(0.0);
        tick(&mut state, 16.0, FIELD);
        assert_eq!(state.missiles.len(), 1);
        assert_eq!(state.health, 100);
    }

    #[test]
    fn test_loss_stops_processing_remaining_missiles() {
        let mut state = running(1);
        state.spawn_interval_ms = 1.0e9;
        state.health = 1;
        let oldest = push_missile(&mut state, 100.0, 700.0, 0.0);
        push_missile(&mut state, 200.0, 700.0, 0.0);
        state.explosions.push(Explosion::new(Vec2::ZERO, 20.0, 3.0, 800.0));
        state.last_timestamp_ms = Some(0.0);

        let report = tick(&mut state, 16.0, FIELD);
        assert_eq!(report.impacts, 1);
        assert_eq!(state.phase, GamePhase::GameOver(Outcome::Loss));
        // Newest is swept first, so the oldest is left behind
        assert_eq!(state.missiles.len(), 1);
        assert_eq!(state.missiles[0].id, oldest);
        assert_eq!(state.health, 0);
        // Frozen: explosions did not advance
        assert_eq!(state.explosions[0].elapsed_ms, 0.0);

        // Further ticks do nothing
        let frozen = state.missiles[0].pos;
        tick(&mut state, 1000.0, FIELD);
        assert_eq!(state.missiles[0].pos, frozen);
        assert_eq!(state.health, 0);
    }

    #[test]
    fn test_sweep_is_newest_first() {
        let mut state = running(1);
        state.spawn_interval_ms = 1.0e9;
        state.health = 1;
        push_missile(&mut state, 100.0, 0.0, 100.0);
        push_missile(&mut state, 200.0, 700.0, 0.0);
        state.last_timestamp_ms = Some(0.0);

        tick(&mut state, 500.0, FIELD);
        assert!(state.is_over());
        // The older missile was never moved on the losing tick
        assert_eq!(state.missiles[0].pos.y, 0.0);
    }

    #[test]
    fn test_explosions_expire_after_duration() {
        let mut state = running(1);
        state.spawn_interval_ms = 1.0e9;
        state.explosions.push(Explosion::new(Vec2::ZERO, 20.0, 3.0, 800.0));
        tick(&mut state, 0.0, FIELD);
        tick(&mut state, 400.0, FIELD);
        assert_eq!(state.explosions.len(), 1);
        assert!((state.explosions[0].radius - 30.0).abs() < 1e-3);
        tick(&mut state, 800.0, FIELD);
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_tick_ignored_while_idle() {
        let mut state = GameState::new(1);
        let report = tick(&mut state, 5000.0, FIELD);
        assert_eq!(report, TickReport::default());
        assert!(state.missiles.is_empty());
        assert_eq!(state.ticks, 0);
    }

    #[test]
    fn test_determinism() {
        let mut a = running(99999);
        let mut b = running(99999);
        for frame in 0..2000 {
            let t = frame as f64 * 16.0;
            tick(&mut a, t, FIELD);
            tick(&mut b, t, FIELD);
        }
        assert_eq!(a.missiles, b.missiles);
        assert_eq!(a.health, b.health);
        assert_eq!(a.phase, b.phase);
    }

    proptest! {
        #[test]
        fn prop_health_only_drops_and_missiles_stay_in_band(seed in any::<u64>(), frame_ms in 8.0f64..50.0) {
            let mut state = running(seed);
            let mut health = state.health;
            let mut t = 0.0;
            for _ in 0..600 {
                t += frame_ms;
                tick(&mut state, t, FIELD);
                prop_assert!(state.health <= health);
                prop_assert_eq!(state.score, 0);
                health = state.health;
                if !state.is_running() {
                    break;
                }
                for m in &state.missiles {
                    prop_assert!(m.pos.y >= -m.radius);
                    prop_assert!(m.pos.y <= FIELD.height + m.radius);
                }
            }
        }
    }
}
