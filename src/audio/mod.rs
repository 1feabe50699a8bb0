//! Sound effects and background music
//!
//! Effects are synthesized procedurally; music comes from bundled tracks
//! picked at random, one after another, for as long as the page is open.

#[cfg(target_arch = "wasm32")]
pub mod web;

use rand::Rng;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Missile hits the planet
    Impact,
    /// Player destroys a missile
    Destroy,
}

/// Bundled background tracks
pub const MUSIC_TRACKS: [&str; 3] = [
    "teleporting-cyberpunk-music-230628.mp3",
    "cyberpunk-music-277931.mp3",
    "cyberpunk-futuristic-city-music-323171.mp3",
];

/// Background track volume
pub const MUSIC_VOLUME: f32 = 0.4;

/// Random track rotation. Each pick is uniform over all tracks, so the
/// same track may play twice in a row.
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<String>,
    current: Option<usize>,
}

impl Playlist {
    pub fn new<I, T>(tracks: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            tracks: tracks.into_iter().map(Into::into).collect(),
            current: None,
        }
    }

    pub fn bundled() -> Self {
        Self::new(MUSIC_TRACKS)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Index of the track currently selected
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn track(&self, index: usize) -> Option<&str> {
        self.tracks.get(index).map(String::as_str)
    }

    /// Pick the next track to play
    pub fn next<R: Rng>(&mut self, rng: &mut R) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.tracks.len());
        self.current = Some(index);
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_empty_playlist_has_nothing_to_play() {
        let mut playlist = Playlist::new(Vec::<String>::new());
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(playlist.next(&mut rng), None);
    }

    #[test]
    fn test_single_track_repeats() {
        let mut playlist = Playlist::new(["only.mp3"]);
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(playlist.next(&mut rng), Some(0));
        assert_eq!(playlist.next(&mut rng), Some(0));
    }

    #[test]
    fn test_picks_cover_every_track_and_may_repeat() {
        let mut playlist = Playlist::bundled();
        let mut rng = Pcg32::seed_from_u64(77);
        let mut prev = None;
        let mut seen = [false; 3];
        let mut repeated = false;
        for _ in 0..300 {
            let next = playlist.next(&mut rng).unwrap();
            assert!(next < 3);
            assert_eq!(playlist.current(), Some(next));
            repeated |= prev == Some(next);
            seen[next] = true;
            prev = Some(next);
        }
        assert!(seen.iter().all(|s| *s));
        assert!(repeated);
        let last = playlist.current().unwrap();
        assert_eq!(playlist.track(last), Some(MUSIC_TRACKS[last]));
    }
}
