//! Raylib window driver.
//!
//! Opens a resizable window, paces frames with raylib's target FPS, forwards
//! mouse position, left clicks and resizes, and draws each ball as its
//! texture rotated around its center. Balls whose image failed to load are
//! drawn as a labeled circle.

use glam::Vec2;
use log::{info, warn};
use raylib::prelude::*;
use rustc_hash::FxHashMap;

use crate::engine::{FrameDriver, FrameInput};
use crate::resources::gameconfig::GameConfig;
use crate::systems::snapshot::FrameSnapshot;

const BACKGROUND: Color = Color::new(16, 16, 24, 255);
const FALLBACK_FILL: Color = Color::new(70, 70, 90, 255);
const LABEL_SIZE: i32 = 16;

/// Loaded textures keyed by image path.
struct TextureStore {
    map: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    fn load(rl: &mut RaylibHandle, thread: &RaylibThread, config: &GameConfig) -> Self {
        let mut map = FxHashMap::default();
        for ball in &config.balls {
            if map.contains_key(&ball.image) {
                continue;
            }
            match rl.load_texture(thread, &ball.image) {
                Ok(texture) => {
                    map.insert(ball.image.clone(), texture);
                }
                Err(e) => warn!("Failed to load texture {}: {}", ball.image, e),
            }
        }
        info!("Loaded {} of {} textures", map.len(), config.balls.len());
        Self { map }
    }

    fn get(&self, key: &str) -> Option<&Texture2D> {
        self.map.get(key)
    }
}

pub struct WindowDriver {
    rl: RaylibHandle,
    thread: RaylibThread,
    textures: TextureStore,
    size: (i32, i32),
}

impl WindowDriver {
    /// Open the window described by `config` and load every ball texture.
    pub fn open(config: &GameConfig) -> Self {
        let (width, height) = config.window_size();
        let (mut rl, thread) = raylib::init()
            .size(width as i32, height as i32)
            .resizable()
            .title("Bouncing Links")
            .build();
        rl.set_target_fps(config.target_fps);

        let textures = TextureStore::load(&mut rl, &thread, config);
        let size = (rl.get_screen_width(), rl.get_screen_height());
        Self {
            rl,
            thread,
            textures,
            size,
        }
    }

    /// Current drawable size in pixels.
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.size.0 as f32, self.size.1 as f32)
    }
}

impl FrameDriver for WindowDriver {
    fn next_frame(&mut self) -> Option<FrameInput> {
        if self.rl.window_should_close() {
            return None;
        }

        let size = (self.rl.get_screen_width(), self.rl.get_screen_height());
        let viewport = if size != self.size {
            self.size = size;
            Some(self.viewport())
        } else {
            None
        };

        let mouse = self.rl.get_mouse_position();
        let pointer = Vec2::new(mouse.x, mouse.y);
        let click = self
            .rl
            .is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT)
            .then_some(pointer);

        Some(FrameInput {
            delta: self.rl.get_frame_time(),
            pointer: Some(pointer),
            viewport,
            click,
        })
    }

    fn present(&mut self, frame: &FrameSnapshot) {
        let radius = frame.diameter * 0.5;
        let mut d = self.rl.begin_drawing(&self.thread);
        d.clear_background(BACKGROUND);

        for ball in &frame.balls {
            let center = Vector2::new(ball.x + radius, ball.y + radius);
            match self.textures.get(&ball.image) {
                Some(texture) => {
                    let src = Rectangle::new(
                        0.0,
                        0.0,
                        texture.width as f32,
                        texture.height as f32,
                    );
                    // dest is positioned at the center and rotated around it
                    let dest = Rectangle::new(center.x, center.y, frame.diameter, frame.diameter);
                    d.draw_texture_pro(
                        texture,
                        src,
                        dest,
                        Vector2::new(radius, radius),
                        ball.rotation,
                        Color::WHITE,
                    );
                }
                None => {
                    d.draw_circle_v(center, radius, FALLBACK_FILL);
                    let label = ball.url.trim_start_matches("https://");
                    let text_width = label.len() as i32 * LABEL_SIZE / 2;
                    d.draw_text(
                        label,
                        center.x as i32 - text_width / 2,
                        center.y as i32 - LABEL_SIZE / 2,
                        LABEL_SIZE,
                        Color::WHITE,
                    );
                }
            }
        }
    }
}
