//! WebGPU rendering module
//!
//! The scene is tessellated on the CPU into colored triangles in screen
//! pixels; the pipeline maps them to clip space and draws one list per frame.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{PlanetGeometry, Scene, Star};

use crate::platform::RenderSurface;
use crate::sim::{Explosion, Missile, Playfield};

/// Scene geometry plus the GPU state that draws it
pub struct Renderer {
    scene: Scene,
    gpu: RenderState,
}

impl Renderer {
    pub fn new(scene: Scene, gpu: RenderState) -> Self {
        Self { scene, gpu }
    }

    /// Surface changed size (pixels)
    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        self.scene
            .resize(Playfield::new(width as f32, height as f32));
    }
}

impl RenderSurface for Renderer {
    fn playfield(&self) -> Playfield {
        self.scene.playfield()
    }

    fn draw_background(&mut self) {
        self.scene.draw_background();
    }

    fn draw_planet(&mut self) {
        self.scene.draw_planet();
    }

    fn draw_missiles(&mut self, missiles: &[Missile]) {
        self.scene.draw_missiles(missiles);
    }

    fn draw_explosions(&mut self, explosions: &[Explosion]) {
        self.scene.draw_explosions(explosions);
    }

    fn present(&mut self) {
        match self.gpu.render(self.scene.vertices()) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                self.gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
        self.scene.clear();
    }
}
