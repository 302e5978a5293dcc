use eframe::egui::{Pos2, Vec2};
use tracing::debug;

use super::arena::Slot;
use super::model::{GraphModel, NodeArena, NodeId, NodeKind};
use super::physics::LayoutSimulator;
use super::viewport::Viewport;

/// Net pointer travel (screen px) at which a press stops counting as a click.
pub const DRAG_THRESHOLD: f32 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Pos2),
    Move(Pos2),
    Up(Pos2),
    /// Release that happened after the pointer left the canvas.
    UpOutside(Pos2),
    Leave,
    Wheel { position: Pos2, delta: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigateEvent {
    pub target: NodeId,
}

impl NavigateEvent {
    pub fn kind(&self) -> NodeKind {
        self.target.kind()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragState {
    Idle,
    Dragging {
        slot: Slot,
        node: NodeId,
        origin: Pos2,
    },
}

pub struct InteractionTarget<'a> {
    pub model: &'a mut GraphModel,
    pub viewport: &'a mut Viewport,
    pub simulator: &'a mut LayoutSimulator,
}

/// Drag and click resolution is a two-state machine; hover is tracked
/// separately and never changes the drag state.
#[derive(Debug)]
pub struct InteractionController {
    state: DragState,
    hovered: Option<Slot>,
    attached: bool,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            hovered: None,
            attached: false,
        }
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
        self.reset();
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn reset(&mut self) {
        self.state = DragState::Idle;
        self.hovered = None;
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn dragged(&self) -> Option<Slot> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { slot, .. } => Some(slot),
        }
    }

    pub fn hovered(&self) -> Option<Slot> {
        self.hovered
    }

    pub fn hit_test(nodes: &NodeArena, viewport: &Viewport, screen: Pos2) -> Option<Slot> {
        let world = viewport.screen_to_world(screen);
        nodes
            .iter_live()
            .filter(|(_, node)| {
                node.visible && (node.position - world).length_sq() <= node.radius * node.radius
            })
            .max_by_key(|(slot, node)| {
                let layer = match node.kind() {
                    NodeKind::Group => 0u8,
                    NodeKind::Person => 1u8,
                };
                (layer, slot.index())
            })
            .map(|(slot, _)| slot)
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        target: InteractionTarget<'_>,
    ) -> Option<NavigateEvent> {
        if !self.attached {
            return None;
        }

        match event {
            PointerEvent::Down(position) => {
                if self.dragged().is_some() {
                    return None;
                }
                let slot = Self::hit_test(&target.model.nodes, target.viewport, position)?;
                let node = target.model.nodes.get_mut(slot)?;
                node.velocity = Vec2::ZERO;
                self.state = DragState::Dragging {
                    slot,
                    node: node.id,
                    origin: position,
                };
                target.simulator.pin(slot);
                None
            }
            PointerEvent::Move(position) => {
                self.hovered = Self::hit_test(&target.model.nodes, target.viewport, position);
                if let DragState::Dragging { slot, .. } = self.state {
                    let world = target.viewport.screen_to_world(position);
                    if let Some(node) = target.model.nodes.get_mut(slot) {
                        node.position = world;
                        node.velocity = Vec2::ZERO;
                    }
                }
                None
            }
            PointerEvent::Up(position) | PointerEvent::UpOutside(position) => {
                let DragState::Dragging { slot, node, origin } = self.state else {
                    return None;
                };
                self.state = DragState::Idle;
                target.simulator.unpin();

                let travel = (position - origin).length();
                if travel >= DRAG_THRESHOLD || !target.model.nodes.is_live(slot) {
                    return None;
                }
                debug!(%node, "pointer gesture resolved as click");
                Some(NavigateEvent { target: node })
            }
            PointerEvent::Leave => {
                self.hovered = None;
                None
            }
            PointerEvent::Wheel { position, delta } => {
                target.viewport.zoom_at(position, delta);
                None
            }
        }
    }
}
