mod forces;

use eframe::egui::Vec2;

use crate::config::ForceParams;

use super::arena::Slot;
use super::model::{EdgeKind, GraphModel};
use super::visibility::edge_visible;
use forces::{attraction_toward, centering, repulsion_between};

struct Body {
    slot: Slot,
    position: Vec2,
}

pub struct LayoutSimulator {
    center: Vec2,
    pinned: Option<Slot>,
    bodies: Vec<Body>,
    forces: Vec<Vec2>,
    body_by_slot: Vec<Option<usize>>,
}

impl LayoutSimulator {
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            pinned: None,
            bodies: Vec::new(),
            forces: Vec::new(),
            body_by_slot: Vec::new(),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    pub fn pin(&mut self, slot: Slot) {
        self.pinned = Some(slot);
    }

    pub fn unpin(&mut self) {
        self.pinned = None;
    }

    pub fn pinned(&self) -> Option<Slot> {
        self.pinned
    }

    /// All forces are accumulated from start-of-frame positions before any
    /// node is integrated. Disposed nodes and edges are skipped.
    pub fn step(&mut self, model: &mut GraphModel, params: &ForceParams) -> usize {
        self.bodies.clear();
        self.body_by_slot.clear();
        self.body_by_slot.resize(model.nodes.capacity_slots(), None);

        for (slot, node) in model.nodes.iter_live() {
            if !node.visible {
                continue;
            }
            if let Some(entry) = self.body_by_slot.get_mut(slot.index()) {
                *entry = Some(self.bodies.len());
            }
            self.bodies.push(Body {
                slot,
                position: node.position,
            });
        }

        let body_count = self.bodies.len();
        if body_count == 0 {
            return 0;
        }

        self.forces.clear();
        self.forces.resize(body_count, Vec2::ZERO);

        for i in 0..body_count {
            for j in (i + 1)..body_count {
                let push = repulsion_between(
                    self.bodies[i].position,
                    self.bodies[j].position,
                    params.repulsion,
                    i,
                    j,
                );
                self.forces[i] += push;
                self.forces[j] -= push;
            }
        }

        for (_, edge) in model.edges.iter_live() {
            if !edge_visible(&model.nodes, edge) {
                continue;
            }
            let lookup = |slot: Slot| self.body_by_slot.get(slot.index()).copied().flatten();
            let (Some(from), Some(to)) = (lookup(edge.from), lookup(edge.to)) else {
                continue;
            };

            let coefficient = match edge.kind() {
                EdgeKind::Relationship => params.person_attraction,
                EdgeKind::Membership => params.group_attraction,
            };
            let pull = attraction_toward(
                self.bodies[from].position,
                self.bodies[to].position,
                coefficient,
            );
            self.forces[from] += pull;
            self.forces[to] -= pull;
        }

        for (force, body) in self.forces.iter_mut().zip(&self.bodies) {
            *force += centering(body.position, self.center, params.center_force);
        }

        for (body, force) in self.bodies.iter().zip(&self.forces) {
            let Some(node) = model.nodes.get_mut(body.slot) else {
                continue;
            };

            if self.pinned == Some(body.slot) {
                node.velocity = Vec2::ZERO;
                continue;
            }

            let mut velocity = (node.velocity + *force) * params.damping;
            if !velocity.is_finite() {
                velocity = Vec2::ZERO;
            }
            node.velocity = velocity;
            node.position += velocity;
        }

        body_count
    }
}
