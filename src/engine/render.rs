use eframe::egui::{Color32, Pos2, pos2, vec2};

use crate::config::{EngineOptions, Palette};
use crate::util::short_label;

use super::arena::Slot;
use super::model::{EdgeKind, GraphModel, Node, NodeKind};
use super::visibility::{display_label, edge_visible};
use super::viewport::Viewport;

pub const HOVER_RADIUS_SCALE: f32 = 1.25;
const LABEL_SIZE: f32 = 12.0;

pub trait RenderSurface {
    fn fill(&mut self, color: Color32);
    fn line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32);
    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, outline: Color32);
    fn text(&mut self, anchor: Pos2, text: &str, size: f32, color: Color32);
}

pub struct FrameView<'a> {
    pub model: &'a GraphModel,
    pub viewport: &'a Viewport,
    pub palette: &'a Palette,
    pub options: &'a EngineOptions,
    pub hovered: Option<Slot>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub nodes: usize,
    pub edges: usize,
}

fn draw_grid(viewport: &Viewport, color: Color32, surface: &mut impl RenderSurface) {
    let size = viewport.canvas_size();
    let step = (56.0 * viewport.scale().clamp(0.6, 1.8)).max(20.0);
    let origin = viewport.offset();

    let mut x = origin.x.rem_euclid(step);
    while x < size.x {
        surface.line(pos2(x, 0.0), pos2(x, size.y), 1.0, color);
        x += step;
    }

    let mut y = origin.y.rem_euclid(step);
    while y < size.y {
        surface.line(pos2(0.0, y), pos2(size.x, y), 1.0, color);
        y += step;
    }
}

fn draw_node(
    view: &FrameView<'_>,
    slot: Slot,
    node: &Node,
    surface: &mut impl RenderSurface,
) {
    let hovered = view.hovered == Some(slot);
    let scale = view.viewport.scale();
    let center = view.viewport.world_to_screen(node.position);
    let (radius, fill) = if hovered {
        (node.radius * HOVER_RADIUS_SCALE * scale, view.palette.hover)
    } else {
        (node.radius * scale, node.color)
    };
    surface.circle(center, radius, fill, view.palette.outline);

    if hovered || scale > 0.45 {
        let label = display_label(node, view.options.anonymize);
        let label = if scale < 0.8 && !hovered {
            short_label(label)
        } else {
            label
        };
        surface.text(
            center + vec2(0.0, radius + 4.0),
            label,
            LABEL_SIZE,
            view.palette.label,
        );
    }
}

/// Edge endpoints are read from the current node positions, so this must run
/// after the simulator step for the frame.
pub fn draw_frame(view: FrameView<'_>, surface: &mut impl RenderSurface) -> DrawStats {
    let mut stats = DrawStats::default();
    surface.fill(view.palette.background);
    draw_grid(view.viewport, view.palette.grid, surface);

    let width_scale = view.viewport.scale().sqrt();
    for (_, edge) in view.model.edges.iter_live() {
        if !edge_visible(&view.model.nodes, edge) {
            continue;
        }
        let (Some(from), Some(to)) = (
            view.model.nodes.get(edge.from),
            view.model.nodes.get(edge.to),
        ) else {
            continue;
        };

        let width = match edge.kind() {
            EdgeKind::Relationship => (1.6 * width_scale).clamp(0.8, 4.0),
            EdgeKind::Membership => (1.1 * width_scale).clamp(0.6, 3.0),
        };
        surface.line(
            view.viewport.world_to_screen(from.position),
            view.viewport.world_to_screen(to.position),
            width,
            edge.color.gamma_multiply(edge.opacity),
        );
        stats.edges += 1;
    }

    for layer in [NodeKind::Group, NodeKind::Person] {
        for (slot, node) in view.model.nodes.iter_live() {
            if node.visible && node.kind() == layer {
                draw_node(&view, slot, node, surface);
                stats.nodes += 1;
            }
        }
    }

    stats
}
