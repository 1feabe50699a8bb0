//! Frame assembly
//!
//! Turns the session state into one triangle list per frame: star field,
//! planet, missiles, then explosions on top.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::shapes;
use super::vertex::{Vertex, colors, fade, mix};
use crate::platform::RenderSurface;
use crate::settings::QualityPreset;
use crate::sim::{Explosion, Missile, Playfield};

/// Background star, position normalized to the playfield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    /// Opacity in [0.5, 1.0)
    pub brightness: f32,
    /// Radius in pixels, [0.5, 2.0)
    pub size: f32,
}

impl Star {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            x: rng.random::<f32>(),
            y: rng.random::<f32>(),
            brightness: 0.5 + rng.random::<f32>() * 0.5,
            size: 0.5 + rng.random::<f32>() * 1.5,
        }
    }
}

/// Planet placement: a disc centered below the bottom edge so only its cap shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetGeometry {
    pub center: Vec2,
    pub radius: f32,
}

/// Continent outlines relative to the planet radius (x right, y down from the rim top)
const CONTINENTS: [&[[f32; 2]]; 2] = [
    &[
        [-0.3, -0.15],
        [-0.1, 0.1],
        [0.05, 0.0],
        [-0.05, -0.25],
        [-0.25, -0.3],
    ],
    &[
        [0.05, 0.05],
        [0.25, 0.2],
        [0.35, 0.15],
        [0.3, -0.05],
        [0.1, -0.1],
        [0.0, -0.05],
    ],
];

impl PlanetGeometry {
    pub fn for_playfield(playfield: Playfield) -> Self {
        let radius = playfield.width.min(playfield.height) * 0.4;
        Self {
            center: Vec2::new(playfield.width / 2.0, playfield.height + radius * 0.5),
            radius,
        }
    }

    /// Topmost point of the disc
    pub fn rim_top(&self) -> Vec2 {
        Vec2::new(self.center.x, self.center.y - self.radius)
    }

    /// Continent polygons in screen pixels
    pub fn continents(&self) -> impl Iterator<Item = Vec<Vec2>> + '_ {
        let top = self.rim_top();
        CONTINENTS.iter().map(move |shape| {
            shape
                .iter()
                .map(|[x, y]| top + Vec2::new(*x, *y) * self.radius)
                .collect()
        })
    }

    /// Ocean color: light where the sun catches the top, darker toward the limb
    pub fn shade(&self, p: Vec2) -> [f32; 4] {
        let focus = self.center - Vec2::new(0.0, self.radius * 0.4);
        let inner = self.radius * 0.1;
        let t = ((p - focus).length() - inner) / (self.radius - inner);
        mix(colors::PLANET_LIGHT, colors::PLANET_DARK, t)
    }
}

/// Rings used to approximate the planet's off-center gradient
const PLANET_BANDS: u32 = 8;
/// Stars are tiny; a handful of segments is enough
const STAR_SEGMENTS: u32 = 6;

/// Accumulates one frame of geometry in screen pixels
pub struct Scene {
    playfield: Playfield,
    quality: QualityPreset,
    stars: Vec<Star>,
    rng: Pcg32,
    vertices: Vec<Vertex>,
}

impl Scene {
    pub fn new(playfield: Playfield, quality: QualityPreset, seed: u64) -> Self {
        let mut scene = Self {
            playfield,
            quality,
            stars: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            vertices: Vec::new(),
        };
        scene.generate_stars();
        scene
    }

    fn generate_stars(&mut self) {
        let count = self.quality.star_count();
        let rng = &mut self.rng;
        self.stars = (0..count).map(|_| Star::random(rng)).collect();
    }

    /// New surface size; the star field is regenerated
    pub fn resize(&mut self, playfield: Playfield) {
        self.playfield = playfield;
        self.generate_stars();
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn planet(&self) -> PlanetGeometry {
        PlanetGeometry::for_playfield(self.playfield)
    }

    /// Geometry accumulated for the current frame
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}

impl RenderSurface for Scene {
    fn playfield(&self) -> Playfield {
        self.playfield
    }

    /// Starts a new frame: the clear color is black, so only stars are emitted
    fn draw_background(&mut self) {
        self.vertices.clear();
        let Playfield { width, height } = self.playfield;
        for star in &self.stars {
            let center = Vec2::new(star.x * width, star.y * height);
            self.vertices.extend(shapes::circle(
                center,
                star.size,
                fade(colors::STAR, star.brightness),
                STAR_SEGMENTS,
            ));
        }
    }

    fn draw_planet(&mut self) {
        let planet = self.planet();
        self.vertices.extend(shapes::upper_half_disc(
            planet.center,
            planet.radius,
            self.quality.circle_segments() * 2,
            PLANET_BANDS,
            |p| planet.shade(p),
        ));
        for continent in planet.continents() {
            self.vertices
                .extend(shapes::polygon(&continent, colors::CONTINENT));
        }
    }

    fn draw_missiles(&mut self, missiles: &[Missile]) {
        for missile in missiles {
            self.vertices.extend(shapes::missile(missile));
        }
    }

    fn draw_explosions(&mut self, explosions: &[Explosion]) {
        let segments = self.quality.circle_segments();
        for explosion in explosions {
            self.vertices
                .extend(shapes::explosion(explosion, segments));
        }
    }

    fn present(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use crate::platform::LogSink;

    const FIELD: Playfield = Playfield {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn test_star_field_ranges() {
        let scene = Scene::new(FIELD, QualityPreset::Medium, 3);
        assert_eq!(scene.stars().len(), 100);
        for star in scene.stars() {
            assert!((0.0..1.0).contains(&star.x));
            assert!((0.0..1.0).contains(&star.y));
            assert!((0.5..1.0).contains(&star.brightness));
            assert!((0.5..2.0).contains(&star.size));
        }
    }

    #[test]
    fn test_resize_regenerates_stars() {
        let mut scene = Scene::new(FIELD, QualityPreset::Low, 3);
        let before = scene.stars().to_vec();
        scene.resize(Playfield::new(1024.0, 768.0));
        assert_eq!(scene.playfield(), Playfield::new(1024.0, 768.0));
        assert_eq!(scene.stars().len(), before.len());
        assert_ne!(scene.stars(), &before[..]);
    }

    #[test]
    fn test_planet_geometry() {
        let planet = PlanetGeometry::for_playfield(FIELD);
        assert_eq!(planet.radius, 240.0);
        assert_eq!(planet.center, Vec2::new(400.0, 720.0));
        assert_eq!(planet.rim_top(), Vec2::new(400.0, 480.0));

        let continents: Vec<_> = planet.continents().collect();
        assert_eq!(continents.len(), 2);
        assert!((continents[0][0] - Vec2::new(328.0, 444.0)).length() < 1e-3);
    }

    #[test]
    fn test_planet_shade_darkens_outward() {
        let planet = PlanetGeometry::for_playfield(FIELD);
        let near = planet.shade(planet.center - Vec2::new(0.0, planet.radius * 0.4));
        let far = planet.shade(planet.center - Vec2::new(planet.radius, 0.0));
        assert_eq!(near, colors::PLANET_LIGHT);
        assert!(far[2] < near[2]);
    }

    #[test]
    fn test_frame_restarts_on_background() {
        let mut scene = Scene::new(FIELD, QualityPreset::Low, 1);
        scene.draw_background();
        let stars_only = scene.vertices().len();
        scene.draw_planet();
        assert!(scene.vertices().len() > stars_only);

        scene.draw_background();
        assert_eq!(scene.vertices().len(), stars_only);
    }

    #[test]
    fn test_game_renders_into_scene() {
        let scene = Scene::new(FIELD, QualityPreset::Medium, 9);
        let mut game = Game::new(5, scene, LogSink, LogSink);
        game.start();
        assert!(game.tick(2001.0));

        let with_missile = game.surface().vertices().len();
        let mut bare = Scene::new(FIELD, QualityPreset::Medium, 9);
        bare.draw_background();
        bare.draw_planet();
        assert_eq!(with_missile, bare.vertices().len() + (4 + 3 + 3 + 3) * 3);
    }
}
