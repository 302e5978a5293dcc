use std::collections::HashSet;
use std::fmt;

use eframe::egui::{Color32, Vec2, vec2};
use tracing::debug;

use crate::config::{EngineOptions, Palette};
use crate::crm::{Group, GroupId, Person, PersonId, Snapshot};
use crate::util::parse_hex_color;

use super::arena::{Arena, Slot};

pub const PERSON_RING_RADIUS: f32 = 180.0;
pub const GROUP_RING_RADIUS: f32 = 320.0;
pub const PERSON_RADIUS: f32 = 16.0;
pub const GROUP_RADIUS: f32 = 24.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Person,
    Group,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    Person(PersonId),
    Group(GroupId),
}

impl NodeId {
    pub fn kind(self) -> NodeKind {
        match self {
            Self::Person(_) => NodeKind::Person,
            Self::Group(_) => NodeKind::Group,
        }
    }

    pub fn person(self) -> Option<PersonId> {
        match self {
            Self::Person(id) => Some(id),
            Self::Group(_) => None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Person(id) => write!(f, "person:{id}"),
            Self::Group(id) => write!(f, "group:{id}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub detail: Option<String>,
    pub radius: f32,
    pub color: Color32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub visible: bool,
    pub is_self: bool,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.id.kind()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Relationship,
    Membership,
}

/// Edge identity. Relationship keys are stored with ordered endpoints, so
/// `A–B` and `B–A` collapse to one edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
}

impl EdgeKey {
    pub fn relationship(a: PersonId, b: PersonId) -> Self {
        let (from, to) = if a <= b { (a, b) } else { (b, a) };
        Self {
            from: NodeId::Person(from),
            to: NodeId::Person(to),
            kind: EdgeKind::Relationship,
        }
    }

    pub fn membership(group: GroupId, person: PersonId) -> Self {
        Self {
            from: NodeId::Group(group),
            to: NodeId::Person(person),
            kind: EdgeKind::Membership,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Edge {
    pub key: EdgeKey,
    pub from: Slot,
    pub to: Slot,
    pub color: Color32,
    pub opacity: f32,
    pub suppressed: bool,
}

impl Edge {
    pub fn kind(&self) -> EdgeKind {
        self.key.kind
    }

    pub fn other_end(&self, slot: Slot) -> Option<Slot> {
        if self.from == slot {
            Some(self.to)
        } else if self.to == slot {
            Some(self.from)
        } else {
            None
        }
    }
}

pub type NodeArena = Arena<NodeId, Node>;
pub type EdgeArena = Arena<EdgeKey, Edge>;

pub struct GraphModel {
    pub nodes: NodeArena,
    pub edges: EdgeArena,
    pub dropped_edges: usize,
}

pub struct BuildInputs<'a> {
    pub snapshot: &'a Snapshot,
    pub palette: &'a Palette,
    pub options: &'a EngineOptions,
    pub self_id: Option<PersonId>,
    pub center: Vec2,
    pub generation: u64,
}

pub fn ring_position(center: Vec2, ring_radius: f32, index: usize, count: usize) -> Vec2 {
    if count == 0 {
        return center;
    }
    let angle = (index as f32) * std::f32::consts::TAU / (count as f32);
    center + vec2(angle.cos(), angle.sin()) * ring_radius
}

fn unique_people(snapshot: &Snapshot) -> Vec<&Person> {
    let mut seen = HashSet::new();
    snapshot
        .people
        .iter()
        .filter(|person| {
            let fresh = seen.insert(person.id);
            if !fresh {
                debug!(person = %person.id, "dropping duplicate person");
            }
            fresh
        })
        .collect()
}

fn unique_groups(snapshot: &Snapshot) -> Vec<&Group> {
    let mut seen = HashSet::new();
    snapshot
        .groups
        .iter()
        .filter(|group| {
            let fresh = seen.insert(group.id);
            if !fresh {
                debug!(group = %group.id, "dropping duplicate group");
            }
            fresh
        })
        .collect()
}

pub fn build_graph(inputs: BuildInputs<'_>) -> GraphModel {
    let BuildInputs {
        snapshot,
        palette,
        options,
        self_id,
        center,
        generation,
    } = inputs;

    let people = unique_people(snapshot);
    let groups = unique_groups(snapshot);

    let mut nodes = Arena::with_capacity(generation, people.len() + groups.len());
    for (index, person) in people.iter().enumerate() {
        let is_self = self_id == Some(person.id);
        nodes.insert(
            NodeId::Person(person.id),
            Node {
                id: NodeId::Person(person.id),
                label: person.display_name.clone(),
                detail: person.affiliation.clone(),
                radius: PERSON_RADIUS,
                color: if is_self {
                    palette.self_person
                } else {
                    palette.person
                },
                position: ring_position(center, PERSON_RING_RADIUS, index, people.len()),
                velocity: Vec2::ZERO,
                visible: true,
                is_self,
            },
        );
    }

    for (index, group) in groups.iter().enumerate() {
        nodes.insert(
            NodeId::Group(group.id),
            Node {
                id: NodeId::Group(group.id),
                label: group.name.clone(),
                detail: None,
                radius: GROUP_RADIUS,
                color: group
                    .color
                    .as_deref()
                    .and_then(parse_hex_color)
                    .unwrap_or(palette.group),
                position: ring_position(center, GROUP_RING_RADIUS, index, groups.len()),
                velocity: Vec2::ZERO,
                visible: true,
                is_self: false,
            },
        );
    }

    let mut edges = Arena::new(generation);
    let mut dropped_edges = 0usize;

    for relationship in &snapshot.relationships {
        let from = nodes.slot_of(&NodeId::Person(relationship.from_id));
        let to = nodes.slot_of(&NodeId::Person(relationship.to_id));
        let (Some(from), Some(to)) = (from, to) else {
            dropped_edges += 1;
            continue;
        };
        if from == to {
            dropped_edges += 1;
            continue;
        }

        let key = EdgeKey::relationship(relationship.from_id, relationship.to_id);
        let (from, to) = if key.from == NodeId::Person(relationship.from_id) {
            (from, to)
        } else {
            (to, from)
        };
        edges.insert(
            key,
            Edge {
                key,
                from,
                to,
                color: relationship
                    .color_hint
                    .as_deref()
                    .and_then(parse_hex_color)
                    .unwrap_or(palette.relationship),
                opacity: options.person_line_opacity,
                suppressed: false,
            },
        );
    }

    for group in &groups {
        let Some(group_slot) = nodes.slot_of(&NodeId::Group(group.id)) else {
            continue;
        };
        let group_color = nodes
            .get(group_slot)
            .map(|node| node.color)
            .unwrap_or(palette.group);

        let mut members = 0usize;
        for member_id in &group.member_ids {
            let Some(member_slot) = nodes.slot_of(&NodeId::Person(*member_id)) else {
                dropped_edges += 1;
                continue;
            };
            let key = EdgeKey::membership(group.id, *member_id);
            let inserted = edges.insert(
                key,
                Edge {
                    key,
                    from: group_slot,
                    to: member_slot,
                    color: group_color,
                    opacity: options.group_line_opacity,
                    suppressed: false,
                },
            );
            if inserted.is_some() {
                members += 1;
            }
        }
        if let Some(node) = nodes.get_mut(group_slot) {
            node.detail = Some(format!("{members} members"));
        }
    }

    GraphModel {
        nodes,
        edges,
        dropped_edges,
    }
}
