use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke};

use crm_graph::engine::render::RenderSurface;

pub(super) struct PainterSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
}

impl<'a> PainterSurface<'a> {
    pub(super) fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    fn place(&self, local: Pos2) -> Pos2 {
        self.rect.min + local.to_vec2()
    }
}

impl RenderSurface for PainterSurface<'_> {
    fn fill(&mut self, color: Color32) {
        self.painter.rect_filled(self.rect, 0.0, color);
    }

    fn line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        self.painter
            .line_segment([self.place(from), self.place(to)], Stroke::new(width, color));
    }

    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, outline: Color32) {
        let center = self.place(center);
        if !circle_visible(self.rect, center, radius) {
            return;
        }
        self.painter.circle_filled(center, radius, fill);
        self.painter
            .circle_stroke(center, radius, Stroke::new(1.0, outline));
    }

    fn text(&mut self, anchor: Pos2, text: &str, size: f32, color: Color32) {
        let anchor = self.place(anchor);
        if !self.rect.expand(120.0).contains(anchor) {
            return;
        }
        self.painter.text(
            anchor,
            Align2::CENTER_TOP,
            text,
            FontId::proportional(size),
            color,
        );
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    #[test]
    fn circles_outside_the_canvas_are_culled() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0));
        assert!(circle_visible(rect, pos2(50.0, 50.0), 5.0));
        assert!(circle_visible(rect, pos2(-4.0, 50.0), 5.0));
        assert!(!circle_visible(rect, pos2(-6.0, 50.0), 5.0));
        assert!(!circle_visible(rect, pos2(50.0, 120.0), 5.0));
    }
}
