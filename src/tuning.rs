//! Data-driven game balance
//!
//! Every number that shapes difficulty lives here. Defaults come from
//! [`crate::consts`]; a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Largest missile radius a tuning may ask for, in pixels
pub const MAX_MISSILE_RADIUS: f32 = 500.0;
/// Largest base fall speed a tuning may ask for, in pixels/second
pub const MAX_MISSILE_SPEED: f32 = 10_000.0;

/// Runtime-tunable balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub initial_health: i32,

    // === Spawning ===
    pub base_spawn_interval_ms: f64,
    pub spawn_decay: f64,
    pub min_spawn_interval_ms: f64,
    pub missile_min_radius: f32,
    pub missile_max_radius: f32,
    pub missile_min_speed: f32,
    pub missile_max_speed: f32,
    pub speed_per_point: f32,

    // === Progression ===
    pub points_per_level: u32,
    pub max_level: u32,
    pub level_interval_factor: f64,

    // === Hits & effects ===
    pub explosion_scale: f32,
    pub explosion_duration_ms: f32,
    pub fallback_hit_factor: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            initial_health: INITIAL_HEALTH,

            base_spawn_interval_ms: BASE_SPAWN_INTERVAL_MS,
            spawn_decay: SPAWN_DECAY,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            missile_min_radius: MISSILE_MIN_RADIUS,
            missile_max_radius: MISSILE_MAX_RADIUS,
            missile_min_speed: MISSILE_MIN_SPEED,
            missile_max_speed: MISSILE_MAX_SPEED,
            speed_per_point: SPEED_PER_POINT,

            points_per_level: POINTS_PER_LEVEL,
            max_level: MAX_LEVEL,
            level_interval_factor: LEVEL_INTERVAL_FACTOR,

            explosion_scale: EXPLOSION_SCALE,
            explosion_duration_ms: EXPLOSION_DURATION_MS,
            fallback_hit_factor: FALLBACK_HIT_FACTOR,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override. Missing keys keep defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.validated())
    }

    /// Clamp values that would break the simulation.
    ///
    /// Sampling ranges are capped to sane maxima so `min..max` is never empty
    /// (NaN and infinities fall back to the caps as well).
    pub fn validated(mut self) -> Self {
        self.initial_health = self.initial_health.max(1);
        self.min_spawn_interval_ms = self.min_spawn_interval_ms.max(1.0);
        self.base_spawn_interval_ms = self.base_spawn_interval_ms.max(self.min_spawn_interval_ms);
        self.spawn_decay = self.spawn_decay.max(0.0).min(1.0);

        (self.missile_min_radius, self.missile_max_radius) = repair_range(
            self.missile_min_radius.max(1.0),
            self.missile_max_radius,
            MAX_MISSILE_RADIUS,
        );
        (self.missile_min_speed, self.missile_max_speed) = repair_range(
            self.missile_min_speed.max(0.0),
            self.missile_max_speed,
            MAX_MISSILE_SPEED,
        );
        self.speed_per_point = self.speed_per_point.max(0.0).min(MAX_MISSILE_SPEED);

        self.points_per_level = self.points_per_level.max(1);
        self.max_level = self.max_level.max(1);
        self.level_interval_factor = self.level_interval_factor.max(0.0).min(1.0);

        self.explosion_scale = self.explosion_scale.max(0.0).min(100.0);
        self.explosion_duration_ms = self.explosion_duration_ms.max(1.0).min(60_000.0);
        self.fallback_hit_factor = self.fallback_hit_factor.max(0.0).min(100.0);
        self
    }

    /// Score at which the session is won (completing the last level)
    pub fn win_score(&self) -> u32 {
        self.points_per_level.saturating_mul(self.max_level)
    }
}

/// Make `min..max` a non-empty range inside `[min, cap]`.
///
/// `f32::max`/`min` discard NaN, so a NaN bound ends up at a finite value.
fn repair_range(min: f32, max: f32, cap: f32) -> (f32, f32) {
    let min = min.min(cap - 1.0);
    let max = max.min(cap);
    if max > min { (min, max) } else { (min, min + 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let t = Tuning::default();
        assert_eq!(t.initial_health, 100);
        assert_eq!(t.base_spawn_interval_ms, 2000.0);
        assert_eq!(t.min_spawn_interval_ms, 400.0);
        assert_eq!(t.win_score(), 100);
    }

    #[test]
    fn test_partial_json_override() {
        let t = Tuning::from_json(r#"{ "initial_health": 20, "max_level": 3 }"#).unwrap();
        assert_eq!(t.initial_health, 20);
        assert_eq!(t.max_level, 3);
        assert_eq!(t.spawn_decay, SPAWN_DECAY);
        assert_eq!(t.win_score(), 30);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_validated_repairs_empty_ranges() {
        let t = Tuning::from_json(
            r#"{ "missile_min_radius": 30, "missile_max_radius": 10, "min_spawn_interval_ms": -5 }"#,
        )
        .unwrap();
        assert!(t.missile_max_radius > t.missile_min_radius);
        assert!(t.min_spawn_interval_ms >= 1.0);
    }

    #[test]
    fn test_validated_repairs_huge_and_non_finite_ranges() {
        let t = Tuning::from_json(r#"{ "missile_min_radius": 1e9, "missile_max_radius": 0 }"#).unwrap();
        assert!(t.missile_min_radius < t.missile_max_radius);
        assert!(t.missile_max_radius <= MAX_MISSILE_RADIUS);

        let t = Tuning {
            missile_min_speed: f32::INFINITY,
            missile_max_speed: f32::NAN,
            points_per_level: 0,
            ..Tuning::default()
        }
        .validated();
        assert!(t.missile_min_speed < t.missile_max_speed);
        assert!(t.missile_max_speed.is_finite());
        assert_eq!(t.points_per_level, 1);
    }
}
