mod reach;

use std::collections::HashMap;

use crate::config::EngineOptions;

use self::reach::reachable_from;
use super::arena::Slot;
use super::model::{Edge, EdgeKind, GraphModel, Node, NodeArena, NodeId, NodeKind};

pub const ANONYMOUS_LABEL: &str = "Anonymous";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisibleCounts {
    pub persons: usize,
    pub groups: usize,
    pub edges: usize,
}

/// Steps run in order: person-line suppression, orphan hiding, then the
/// highlight restriction. Returns the resolved highlight slot, if any.
pub fn apply_visibility(model: &mut GraphModel, options: &EngineOptions) -> Option<Slot> {
    for (_, node) in model.nodes.iter_live_mut() {
        node.visible = match node.kind() {
            NodeKind::Person => true,
            NodeKind::Group => options.show_groups,
        };
    }

    for (_, edge) in model.edges.iter_live_mut() {
        edge.suppressed =
            edge.kind() == EdgeKind::Relationship && options.disable_person_lines;
    }

    let focus = options
        .highlight_person_id
        .and_then(|id| model.nodes.slot_of(&NodeId::Person(id)));

    if options.hide_orphans {
        hide_orphans(model, focus);
    }

    if let Some(focus) = focus {
        let reachable = reachable_from(&model.edges, focus, options);
        for (slot, node) in model.nodes.iter_live_mut() {
            if !reachable.contains(&slot) {
                node.visible = false;
            }
        }
    }

    focus
}

fn hide_orphans(model: &mut GraphModel, keep: Option<Slot>) {
    let mut degree: HashMap<Slot, usize> = HashMap::new();
    for (_, edge) in model.edges.iter_live() {
        if edge.kind() == EdgeKind::Relationship && edge.suppressed {
            continue;
        }
        *degree.entry(edge.from).or_default() += 1;
        *degree.entry(edge.to).or_default() += 1;
    }

    for (slot, node) in model.nodes.iter_live_mut() {
        if node.kind() == NodeKind::Person
            && Some(slot) != keep
            && degree.get(&slot).copied().unwrap_or(0) == 0
        {
            node.visible = false;
        }
    }
}

pub fn edge_visible(nodes: &NodeArena, edge: &Edge) -> bool {
    !edge.suppressed
        && nodes.get(edge.from).is_some_and(|node| node.visible)
        && nodes.get(edge.to).is_some_and(|node| node.visible)
}

pub fn display_label(node: &Node, anonymize: bool) -> &str {
    if anonymize && node.kind() == NodeKind::Person && !node.is_self {
        ANONYMOUS_LABEL
    } else {
        &node.label
    }
}

pub fn visible_counts(model: &GraphModel) -> VisibleCounts {
    let mut counts = VisibleCounts::default();
    for (_, node) in model.nodes.iter_live() {
        if !node.visible {
            continue;
        }
        match node.kind() {
            NodeKind::Person => counts.persons += 1,
            NodeKind::Group => counts.groups += 1,
        }
    }
    counts.edges = model
        .edges
        .iter_live()
        .filter(|(_, edge)| edge_visible(&model.nodes, edge))
        .count();
    counts
}
