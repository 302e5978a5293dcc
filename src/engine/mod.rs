
pub mod arena;
pub mod interaction;
pub mod model;
pub mod physics;
pub mod render;
pub mod scheduler;
pub mod viewport;
pub mod visibility;

use eframe::egui::Vec2;
use tracing::{debug, info};

use crate::config::{EngineOptions, OptionsChange, Palette};
use crate::crm::{PersonId, Snapshot};
use crate::error::EngineError;

use self::arena::Slot;
use self::interaction::{
    DragState, InteractionController, InteractionTarget, NavigateEvent, PointerEvent,
};
use self::model::{BuildInputs, EdgeKey, EdgeKind, GraphModel, Node, NodeId, build_graph};
use self::physics::LayoutSimulator;
use self::render::{DrawStats, FrameView, RenderSurface, draw_frame};
use self::scheduler::{FrameScheduler, FrameTicket};
use self::viewport::Viewport;
use self::visibility::{VisibleCounts, apply_visibility, edge_visible, visible_counts};

pub struct GraphEngine {
    snapshot: Snapshot,
    self_id: Option<PersonId>,
    options: EngineOptions,
    palette: Palette,
    model: Option<GraphModel>,
    viewport: Viewport,
    simulator: LayoutSimulator,
    interaction: InteractionController,
    scheduler: FrameScheduler,
    build_generation: u64,
    focus: Option<Slot>,
}

impl GraphEngine {
    /// Fails with [`EngineError::InitializationFailure`] when the canvas has no
    /// usable area. A failed mount is final; construct a new engine to retry.
    pub fn mount(
        snapshot: Snapshot,
        self_id: Option<PersonId>,
        options: EngineOptions,
        palette: Palette,
        canvas: Vec2,
    ) -> Result<Self, EngineError> {
        if !(canvas.x.is_finite() && canvas.y.is_finite() && canvas.x > 0.0 && canvas.y > 0.0) {
            return Err(EngineError::initialization(format!(
                "canvas size {}x{} has no drawable area",
                canvas.x, canvas.y
            )));
        }

        let viewport = Viewport::new(canvas);
        let mut engine = Self {
            snapshot,
            self_id,
            options: options.sanitized(),
            palette,
            model: None,
            simulator: LayoutSimulator::new(viewport.canvas_center().to_vec2()),
            viewport,
            interaction: InteractionController::new(),
            scheduler: FrameScheduler::new(),
            build_generation: 0,
            focus: None,
        };

        engine.rebuild();
        engine.interaction.attach();
        engine.scheduler.start();
        info!(
            people = engine.snapshot.people.len(),
            groups = engine.snapshot.groups.len(),
            "graph engine mounted"
        );
        Ok(engine)
    }

    fn rebuild(&mut self) {
        self.scheduler.invalidate();
        self.interaction.reset();
        self.simulator.unpin();
        if let Some(mut previous) = self.model.take() {
            previous.edges.dispose_all();
            previous.nodes.dispose_all();
            previous.edges.clear();
            previous.nodes.clear();
        }

        self.build_generation = self.build_generation.wrapping_add(1);
        let mut model = build_graph(BuildInputs {
            snapshot: &self.snapshot,
            palette: &self.palette,
            options: &self.options,
            self_id: self.self_id,
            center: self.simulator.center(),
            generation: self.build_generation,
        });
        self.focus = apply_visibility(&mut model, &self.options);

        if let Some(node) = self.focus.and_then(|slot| model.nodes.get(slot)) {
            self.viewport.center_on(node.position);
        }

        let counts = visible_counts(&model);
        debug!(
            generation = self.build_generation,
            nodes = model.nodes.live_count(),
            edges = model.edges.live_count(),
            dropped_edges = model.dropped_edges,
            visible_persons = counts.persons,
            visible_groups = counts.groups,
            visible_edges = counts.edges,
            "rebuilt graph"
        );
        self.model = Some(model);
    }

    pub fn set_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        if self.is_mounted() {
            self.rebuild();
        }
    }

    pub fn set_options(&mut self, options: EngineOptions) -> OptionsChange {
        let options = options.sanitized();
        let change = options.change_from(&self.options);
        self.options = options;
        if !self.is_mounted() {
            return change;
        }

        match change {
            OptionsChange::Unchanged => {}
            OptionsChange::Cosmetic => {
                debug!("applying cosmetic option change in place");
                self.apply_line_opacity();
            }
            OptionsChange::Structural => {
                debug!("filter options changed, rebuilding graph");
                self.rebuild();
            }
        }
        change
    }

    fn apply_line_opacity(&mut self) {
        let Some(model) = self.model.as_mut() else {
            return;
        };
        for (_, edge) in model.edges.iter_live_mut() {
            edge.opacity = match edge.kind() {
                EdgeKind::Relationship => self.options.person_line_opacity,
                EdgeKind::Membership => self.options.group_line_opacity,
            };
        }
    }

    pub fn resize(&mut self, canvas: Vec2) {
        if !(canvas.x > 0.0 && canvas.y > 0.0) || canvas == self.viewport.canvas_size() {
            return;
        }
        self.viewport.resize(canvas);
        self.simulator
            .set_center(self.viewport.canvas_center().to_vec2());
    }

    pub fn request_frame(&mut self) -> Option<FrameTicket> {
        self.scheduler.request_frame()
    }

    pub fn run_frame(&mut self, ticket: FrameTicket) -> bool {
        if !self.scheduler.accept(ticket) {
            return false;
        }
        let Some(model) = self.model.as_mut() else {
            return false;
        };
        self.simulator.step(model, &self.options.forces);
        true
    }

    pub fn draw(&self, surface: &mut impl RenderSurface) -> DrawStats {
        let Some(model) = self.model.as_ref() else {
            return DrawStats::default();
        };
        draw_frame(
            FrameView {
                model,
                viewport: &self.viewport,
                palette: &self.palette,
                options: &self.options,
                hovered: self.interaction.hovered(),
            },
            surface,
        )
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<NavigateEvent> {
        let model = self.model.as_mut()?;
        let navigate = self.interaction.handle(
            event,
            InteractionTarget {
                model,
                viewport: &mut self.viewport,
                simulator: &mut self.simulator,
            },
        );
        if let Some(navigate) = navigate {
            info!(target_node = %navigate.target, "navigate");
        }
        navigate
    }

    /// Cancels the frame loop, detaches input, releases every node and edge,
    /// then drops the backing storage. In that order.
    pub fn teardown(&mut self) {
        if !self.is_mounted() && !self.scheduler.is_running() {
            return;
        }

        self.scheduler.stop();
        debug!("teardown: frame loop cancelled");
        self.interaction.detach();
        self.simulator.unpin();
        debug!("teardown: pointer input detached");

        if let Some(model) = self.model.as_mut() {
            model.edges.dispose_all();
            model.nodes.dispose_all();
        }
        debug!("teardown: node and edge handles released");

        if let Some(mut model) = self.model.take() {
            model.edges.clear();
            model.nodes.clear();
        }
        self.focus = None;
        info!("graph engine torn down");
    }

    pub fn is_mounted(&self) -> bool {
        self.model.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn self_id(&self) -> Option<PersonId> {
        self.self_id
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.model.as_ref()?.nodes.get_by_key(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.model
            .iter()
            .flat_map(|model| model.nodes.iter_live().map(|(_, node)| node))
    }

    pub fn visible_node_ids(&self) -> Vec<NodeId> {
        let mut ids = self
            .nodes()
            .filter(|node| node.visible)
            .map(|node| node.id)
            .collect::<Vec<_>>();
        ids.sort();
        ids
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.model
            .iter()
            .flat_map(|model| model.edges.iter_live().map(|(_, edge)| edge.key))
            .collect()
    }

    pub fn visible_edge_keys(&self) -> Vec<EdgeKey> {
        let Some(model) = self.model.as_ref() else {
            return Vec::new();
        };
        model
            .edges
            .iter_live()
            .filter(|(_, edge)| edge_visible(&model.nodes, edge))
            .map(|(_, edge)| edge.key)
            .collect()
    }

    pub fn is_edge_visible(&self, key: &EdgeKey) -> bool {
        self.model.as_ref().is_some_and(|model| {
            model
                .edges
                .get_by_key(key)
                .is_some_and(|edge| edge_visible(&model.nodes, edge))
        })
    }

    pub fn visible_counts(&self) -> VisibleCounts {
        self.model
            .as_ref()
            .map(visible_counts)
            .unwrap_or_default()
    }

    pub fn dropped_edges(&self) -> usize {
        self.model
            .as_ref()
            .map(|model| model.dropped_edges)
            .unwrap_or(0)
    }

    pub fn focus(&self) -> Option<&Node> {
        let model = self.model.as_ref()?;
        self.focus.and_then(|slot| model.nodes.get(slot))
    }

    pub fn hovered(&self) -> Option<&Node> {
        let model = self.model.as_ref()?;
        self.interaction
            .hovered()
            .and_then(|slot| model.nodes.get(slot))
    }

    pub fn dragging(&self) -> Option<NodeId> {
        match self.interaction.state() {
            DragState::Idle => None,
            DragState::Dragging { node, .. } => Some(node),
        }
    }
}

impl Drop for GraphEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}
