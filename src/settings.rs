//! Player preferences
//!
//! Read once at startup from the page query string; nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::audio::MUSIC_VOLUME;
use crate::consts::STAR_COUNT;
use crate::tuning::Tuning;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Background stars for this preset
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => STAR_COUNT * 2 / 5,
            QualityPreset::Medium => STAR_COUNT,
            QualityPreset::High => STAR_COUNT * 2,
        }
    }

    /// Segments used to tessellate circles (explosions, stars, planet)
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium => 24,
            QualityPreset::High => 48,
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume relative to the track default (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    /// Balance overrides
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: false,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Final volume for the background music element
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume * MUSIC_VOLUME).clamp(0.0, 1.0)
        }
    }

    /// Apply already-decoded query parameters such as
    /// `quality=low`, `volume=0.5`, `muted=1`, `tuning={"max_level":5}`.
    ///
    /// Unknown keys and malformed values are ignored with a warning.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut settings = Self::default();

        for (key, value) in pairs {
            match key {
                "quality" => match QualityPreset::from_str(value) {
                    Some(q) => settings.quality = q,
                    None => log::warn!("Unknown quality preset {:?}", value),
                },
                "volume" => match parse_volume(value) {
                    Some(v) => settings.master_volume = v,
                    None => log::warn!("Bad volume {:?}", value),
                },
                "sfx" => match parse_volume(value) {
                    Some(v) => settings.sfx_volume = v,
                    None => log::warn!("Bad sfx volume {:?}", value),
                },
                "music" => match parse_volume(value) {
                    Some(v) => settings.music_volume = v,
                    None => log::warn!("Bad music volume {:?}", value),
                },
                "muted" => settings.muted = matches!(value, "1" | "true" | "yes" | ""),
                "tuning" => match Tuning::from_json(value) {
                    Ok(tuning) => settings.tuning = tuning,
                    Err(e) => log::warn!("Ignoring tuning override: {}", e),
                },
                other => log::debug!("Ignoring query key {:?}", other),
            }
        }

        settings
    }

    /// Read overrides from the current page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let params = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok());
        let values: Vec<(&str, String)> = match &params {
            Some(params) => QUERY_KEYS
                .iter()
                .filter_map(|key| params.get(key).map(|value| (*key, value)))
                .collect(),
            None => Vec::new(),
        };

        let settings = Self::from_pairs(values.iter().map(|(k, v)| (*k, v.as_str())));
        log::info!(
            "Settings: quality {}, muted {}",
            settings.quality.as_str(),
            settings.muted
        );
        settings
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

/// Query parameters understood by [`Settings::from_pairs`]
#[cfg(target_arch = "wasm32")]
const QUERY_KEYS: [&str; 6] = ["quality", "volume", "sfx", "music", "muted", "tuning"];

fn parse_volume(s: &str) -> Option<f32> {
    let v: f32 = s.trim().parse().ok()?;
    v.is_finite().then(|| v.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_mix() {
        let settings = Settings::default();
        assert_eq!(settings.quality, QualityPreset::Medium);
        assert!((settings.effective_music_volume() - 0.4).abs() < 1e-6);
        assert_eq!(settings.quality.star_count(), 100);
    }

    #[test]
    fn test_from_pairs_reads_overrides() {
        let settings = Settings::from_pairs([("quality", "low"), ("volume", "0.5"), ("muted", "1")]);
        assert_eq!(settings.quality, QualityPreset::Low);
        assert_eq!(settings.master_volume, 0.5);
        assert!(settings.muted);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_from_pairs_ignores_garbage() {
        let settings =
            Settings::from_pairs([("quality", "ultra"), ("volume", "loud"), ("foo", "bar")]);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_bare_muted_key_mutes() {
        assert!(Settings::from_pairs([("muted", "")]).muted);
        assert!(!Settings::from_pairs([("muted", "0")]).muted);
    }

    #[test]
    fn test_volume_is_clamped() {
        let settings = Settings::from_pairs([("volume", "7"), ("sfx", "-1")]);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_tuning_override_from_json() {
        let settings = Settings::from_pairs([("tuning", r#"{"max_level":5}"#)]);
        assert_eq!(settings.tuning.max_level, 5);
        assert_eq!(settings.tuning.points_per_level, 10);
    }

    #[test]
    fn test_tuning_override_is_validated() {
        let settings = Settings::from_pairs([("tuning", r#"{"points_per_level":0}"#)]);
        assert_eq!(settings.tuning.points_per_level, 1);
    }
}
