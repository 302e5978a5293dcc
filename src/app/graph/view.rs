use eframe::egui::{Align2, CursorIcon, FontId, Sense, Ui, Vec2, vec2};

use crm_graph::GraphEngine;
use crm_graph::engine::model::NodeKind;
use crm_graph::engine::visibility::display_label;
use crm_graph::error::EngineError;

use super::super::ViewModel;
use super::super::render_utils::PainterSurface;
use super::interaction::{PointerFrame, pointer_events};

impl ViewModel {
    fn ensure_engine(&mut self, canvas: Vec2) -> Result<(), EngineError> {
        if self.engine.is_some() {
            return Ok(());
        }
        let Some(snapshot) = self.pending_snapshot.take() else {
            return Ok(());
        };

        let engine = GraphEngine::mount(
            snapshot,
            self.self_id,
            self.options.clone(),
            self.palette,
            canvas,
        )?;
        self.engine = Some(engine);
        Ok(())
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) -> Result<(), EngineError> {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        if rect.width() < 1.0 || rect.height() < 1.0 {
            return Ok(());
        }

        self.ensure_engine(rect.size())?;
        let Some(engine) = self.engine.as_mut() else {
            return Ok(());
        };
        engine.resize(rect.size());

        if let Some(ticket) = self.next_frame.take() {
            engine.run_frame(ticket);
        }

        let frame = PointerFrame::read(ui, rect, &response);
        let events = pointer_events(frame, rect, engine.dragging().is_some(), self.last_pointer);
        if let Some(pointer) = frame.latest {
            self.last_pointer = Some((pointer - rect.min).to_pos2());
        }

        let mut navigations = Vec::new();
        for event in events {
            if let Some(navigate) = engine.handle_pointer(event) {
                navigations.push(navigate);
            }
        }

        let painter = ui.painter_at(rect);
        engine.draw(&mut PainterSurface::new(&painter, rect));

        if let Some(node) = engine.hovered() {
            let kind = match node.kind() {
                NodeKind::Person => "person",
                NodeKind::Group => "group",
            };
            let anonymize = engine.options().anonymize;
            let label = display_label(node, anonymize);
            let info = match &node.detail {
                Some(detail) if !anonymize => format!("{kind}: {label}\n{detail}"),
                _ => format!("{kind}: {label}"),
            };
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                info,
                FontId::proportional(13.0),
                self.palette.label,
            );
        }

        if engine.dragging().is_some() {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        } else if engine.hovered().is_some() {
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        }

        self.next_frame = engine.request_frame();
        if self.next_frame.is_some() {
            ui.ctx().request_repaint();
        }

        for navigate in navigations {
            self.record_navigation(navigate);
        }
        Ok(())
    }
}
