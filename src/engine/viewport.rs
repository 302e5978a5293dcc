use eframe::egui::{Pos2, Vec2, pos2};

pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 5.0;

/// World → canvas transform, `screen = world * scale + offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    offset: Vec2,
    scale: f32,
    canvas: Vec2,
}

impl Viewport {
    pub fn new(canvas: Vec2) -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            canvas,
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas
    }

    pub fn canvas_center(&self) -> Pos2 {
        pos2(self.canvas.x * 0.5, self.canvas.y * 0.5)
    }

    pub fn resize(&mut self, canvas: Vec2) {
        self.canvas = canvas;
    }

    pub fn world_to_screen(&self, world: Vec2) -> Pos2 {
        (world * self.scale + self.offset).to_pos2()
    }

    pub fn screen_to_world(&self, screen: Pos2) -> Vec2 {
        (screen.to_vec2() - self.offset) / self.scale
    }

    pub fn zoom_at(&mut self, cursor: Pos2, wheel_delta: f32) -> bool {
        if !wheel_delta.is_finite() || wheel_delta.abs() <= f32::EPSILON {
            return false;
        }
        let factor = (1.0 + (wheel_delta * 0.0018)).clamp(0.85, 1.15);
        self.zoom_to(cursor, self.scale * factor)
    }

    pub fn zoom_to(&mut self, cursor: Pos2, scale: f32) -> bool {
        let scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        if (scale - self.scale).abs() <= f32::EPSILON {
            return false;
        }

        let anchor = self.screen_to_world(cursor);
        self.scale = scale;
        self.offset = cursor.to_vec2() - anchor * scale;
        true
    }

    pub fn center_on(&mut self, world: Vec2) {
        self.offset = self.canvas_center().to_vec2() - world * self.scale;
    }
}
