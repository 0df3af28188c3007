//! Everything one run mutates: door states, pose, held intents and the
//! render counters. Kept together so two sessions never share state.

use crate::camera::Camera;
use crate::framebuffer::FrameBuffer;
use crate::map::MapModel;
use crate::minimap::draw_minimap;
use crate::movement::{Intent, MovementController};
use crate::renderer::{Palette, RenderState, render_frame};
use crate::scene::Scene;
use crate::texture::TextureSet;

/// Internal frame size; the window surface is stretched from this.
pub const SCREEN_WIDTH: usize = 1280;
pub const SCREEN_HEIGHT: usize = 960;

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub doors: bool,
    pub minimap: bool,
}

pub struct Session {
    pub map: MapModel,
    pub camera: Camera,
    pub controller: MovementController,
    pub textures: TextureSet,
    pub palette: Palette,
    pub render_state: RenderState,
    minimap: bool,
}

impl Session {
    pub fn new(scene: Scene, textures: TextureSet, options: SessionOptions) -> Self {
        Self {
            camera: Camera::from_spawn(&scene.spawn),
            palette: Palette::new(scene.config.floor, scene.config.ceiling),
            map: scene.map,
            controller: MovementController::new(options.doors),
            textures,
            render_state: RenderState::default(),
            minimap: options.minimap,
        }
    }

    pub fn set_intent(&mut self, intent: Intent, active: bool) {
        self.controller.set_intent(intent, active);
    }

    /// Extra rotation outside the tick, from pointer motion.
    pub fn rotate(&mut self, angle: f64) {
        self.camera.rotate(angle);
    }

    pub fn tick(&mut self) {
        self.controller.tick(&mut self.camera, &mut self.map);
    }

    pub fn render(&mut self, fb: &mut FrameBuffer) {
        render_frame(
            fb,
            &self.map,
            &self.camera,
            &self.textures,
            &self.palette,
            &mut self.render_state,
        );
        if self.minimap {
            draw_minimap(fb, &self.map, &self.camera);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::Texture;

    const SCENE: &str = "NO n\nSO s\nWE w\nEA e\nF 10,20,30\nC 40,50,60\n\n1111\n1E01\n1111\n";

    fn textures() -> TextureSet {
        TextureSet {
            north: Texture::solid(2, 2, 1),
            south: Texture::solid(2, 2, 2),
            east: Texture::solid(2, 2, 3),
            west: Texture::solid(2, 2, 4),
            doors: None,
        }
    }

    #[test]
    fn sessions_do_not_share_counters() {
        let scene = Scene::parse(SCENE, false).unwrap();
        let mut a = Session::new(scene.clone(), textures(), SessionOptions::default());
        let mut b = Session::new(scene, textures(), SessionOptions::default());
        let mut fb = FrameBuffer::new(32, 24);

        a.render(&mut fb);
        a.render(&mut fb);
        b.render(&mut fb);
        assert_eq!(a.render_state.columns_rendered, 64);
        assert_eq!(b.render_state.columns_rendered, 32);
    }

    #[test]
    fn tick_applies_held_intents() {
        let scene = Scene::parse(SCENE, false).unwrap();
        let mut s = Session::new(scene, textures(), SessionOptions::default());
        s.set_intent(Intent::Forward, true);
        s.tick();
        assert!(s.camera.pos[0] > 1.5);
        s.set_intent(Intent::Forward, false);
        let pos = s.camera.pos;
        s.tick();
        assert_eq!(s.camera.pos, pos);
    }

    #[test]
    fn minimap_is_optional() {
        let scene = Scene::parse(SCENE, false).unwrap();
        let opts = SessionOptions {
            doors: false,
            minimap: true,
        };
        let mut with = Session::new(scene.clone(), textures(), opts);
        let mut without = Session::new(scene, textures(), SessionOptions::default());
        let mut fb_a = FrameBuffer::new(120, 90);
        let mut fb_b = FrameBuffer::new(120, 90);
        with.render(&mut fb_a);
        without.render(&mut fb_b);
        assert_ne!(fb_a, fb_b);
        assert_eq!(fb_a.get(15, 15), Some(0x00FF_FFFF));
    }
}
