mod common;

use std::collections::{BTreeSet, HashSet};

use common::{
    ADA, BOARD, BOB, CLEO, DrawCall, RecordingSurface, board_snapshot, highlight, mount, person,
};
use crm_graph::crm::{Group, GroupId, PersonId};
use crm_graph::engine::interaction::PointerEvent;
use crm_graph::engine::model::{EdgeKey, NodeId, PERSON_RADIUS};
use crm_graph::engine::render::HOVER_RADIUS_SCALE;
use crm_graph::engine::visibility::ANONYMOUS_LABEL;
use crm_graph::{EngineOptions, GraphEngine};

fn visible_nodes(engine: &GraphEngine) -> BTreeSet<NodeId> {
    engine.visible_node_ids().into_iter().collect()
}

fn visible_edges(engine: &GraphEngine) -> HashSet<EdgeKey> {
    engine.visible_edge_keys().into_iter().collect()
}

fn nodes(ids: &[NodeId]) -> BTreeSet<NodeId> {
    ids.iter().copied().collect()
}

fn assert_edges_follow_endpoints(engine: &GraphEngine) {
    for key in engine.edge_keys() {
        let from = engine.node(key.from).expect("edge source resolves");
        let to = engine.node(key.to).expect("edge target resolves");
        if engine.is_edge_visible(&key) {
            assert!(from.visible && to.visible, "{key:?} drawn with a hidden endpoint");
        }
    }
}

#[test]
fn highlighted_person_shows_relationships_and_groups() {
    let engine = mount(board_snapshot(), highlight(ADA));

    assert_eq!(
        visible_nodes(&engine),
        nodes(&[
            NodeId::Person(ADA),
            NodeId::Person(BOB),
            NodeId::Person(CLEO),
            NodeId::Group(BOARD),
        ])
    );
    assert_eq!(
        visible_edges(&engine),
        HashSet::from([
            EdgeKey::relationship(ADA, BOB),
            EdgeKey::membership(BOARD, ADA),
            EdgeKey::membership(BOARD, CLEO),
        ])
    );
    assert_edges_follow_endpoints(&engine);
}

#[test]
fn disabling_person_lines_drops_people_only_reachable_by_them() {
    let options = EngineOptions {
        disable_person_lines: true,
        ..highlight(ADA)
    };
    let engine = mount(board_snapshot(), options);

    assert_eq!(
        visible_nodes(&engine),
        nodes(&[
            NodeId::Person(ADA),
            NodeId::Person(CLEO),
            NodeId::Group(BOARD),
        ])
    );
    assert_eq!(
        visible_edges(&engine),
        HashSet::from([
            EdgeKey::membership(BOARD, ADA),
            EdgeKey::membership(BOARD, CLEO),
        ])
    );
    assert!(!engine.is_edge_visible(&EdgeKey::relationship(ADA, BOB)));
    assert_edges_follow_endpoints(&engine);
}

#[test]
fn highlight_limits_view_to_neighbors_and_fellow_members() {
    let engine = mount(board_snapshot(), highlight(CLEO));
    assert_eq!(
        visible_nodes(&engine),
        nodes(&[
            NodeId::Person(ADA),
            NodeId::Person(CLEO),
            NodeId::Group(BOARD),
        ])
    );
    assert_eq!(engine.focus().map(|node| node.id), Some(NodeId::Person(CLEO)));

    let engine = mount(board_snapshot(), highlight(BOB));
    assert_eq!(
        visible_nodes(&engine),
        nodes(&[NodeId::Person(ADA), NodeId::Person(BOB)])
    );
    assert_edges_follow_endpoints(&engine);
}

#[test]
fn highlighted_node_is_centered_in_the_canvas() {
    let engine = mount(board_snapshot(), highlight(CLEO));
    let focus = engine.focus().expect("focus resolves");
    let screen = engine.viewport().world_to_screen(focus.position);
    let center = engine.viewport().canvas_center();
    assert!((screen - center).length() < 1e-3);
}

#[test]
fn unknown_highlight_is_ignored() {
    let engine = mount(board_snapshot(), highlight(PersonId(42)));
    assert!(engine.focus().is_none());
    assert_eq!(visible_nodes(&engine).len(), 4);
}

#[test]
fn hidden_groups_take_their_edges_with_them() {
    let options = EngineOptions {
        show_groups: false,
        highlight_person_id: None,
        ..EngineOptions::default()
    };
    let engine = mount(board_snapshot(), options);

    assert!(!engine.node(NodeId::Group(BOARD)).expect("group built").visible);
    assert_eq!(
        visible_edges(&engine),
        HashSet::from([EdgeKey::relationship(ADA, BOB)])
    );
    assert_edges_follow_endpoints(&engine);
}

#[test]
fn orphans_are_hidden_unless_highlighted() {
    let mut snapshot = board_snapshot();
    snapshot.people.push(person(4, "Dana Loner"));
    let dana = NodeId::Person(PersonId(4));

    let options = EngineOptions {
        hide_orphans: true,
        ..EngineOptions::default()
    };
    let engine = mount(snapshot.clone(), options.clone());
    assert!(!engine.node(dana).expect("dana built").visible);
    assert!(engine.node(NodeId::Person(CLEO)).expect("cleo built").visible);

    let without_groups = EngineOptions {
        show_groups: false,
        ..options.clone()
    };
    let engine = mount(snapshot.clone(), without_groups);
    assert!(engine.node(NodeId::Person(CLEO)).expect("cleo built").visible);
    assert!(!engine.node(dana).expect("dana built").visible);
    assert!(engine.node(NodeId::Person(BOB)).expect("bob built").visible);

    let focused = EngineOptions {
        highlight_person_id: Some(PersonId(4)),
        ..options
    };
    let engine = mount(snapshot, focused);
    assert_eq!(visible_nodes(&engine), nodes(&[dana]));
}

#[test]
fn unresolved_references_are_dropped() {
    let mut snapshot = board_snapshot();
    snapshot
        .relationships
        .push(common::relationship(ADA, PersonId(99)));
    snapshot.relationships.push(common::relationship(BOB, BOB));
    snapshot.groups.push(Group {
        id: GroupId(11),
        name: "Ghosts".to_owned(),
        color: Some("#8844cc".to_owned()),
        member_ids: vec![PersonId(98), CLEO],
    });

    let engine = mount(snapshot, EngineOptions::default());
    assert_eq!(engine.dropped_edges(), 3);
    for key in engine.edge_keys() {
        assert!(engine.node(key.from).is_some());
        assert!(engine.node(key.to).is_some());
    }
    assert!(engine.node(NodeId::Person(PersonId(99))).is_none());
    assert_eq!(engine.edge_keys().len(), 4);
}

#[test]
fn reverse_relationships_collapse_into_one_edge() {
    let mut snapshot = board_snapshot();
    snapshot.relationships.push(common::relationship(BOB, ADA));
    let engine = mount(snapshot, EngineOptions::default());
    let relationships = engine
        .edge_keys()
        .into_iter()
        .filter(|key| *key == EdgeKey::relationship(ADA, BOB))
        .count();
    assert_eq!(relationships, 1);
}

#[test]
fn rebuilding_from_the_same_snapshot_is_idempotent() {
    let mut engine = mount(board_snapshot(), highlight(ADA));
    let fresh = mount(board_snapshot(), highlight(ADA));

    for _ in 0..10 {
        let ticket = engine.request_frame().expect("engine running");
        engine.run_frame(ticket);
    }
    engine.set_snapshot(board_snapshot());

    assert_eq!(visible_nodes(&engine), visible_nodes(&fresh));
    assert_eq!(visible_edges(&engine), visible_edges(&fresh));
    for node in fresh.nodes() {
        let rebuilt = engine.node(node.id).expect("same node set");
        assert_eq!(rebuilt.position, node.position);
        assert_eq!(rebuilt.visible, node.visible);
    }
}

#[test]
fn draw_issues_one_circle_per_visible_node() {
    let options = EngineOptions {
        disable_person_lines: true,
        ..highlight(ADA)
    };
    let engine = mount(board_snapshot(), options);
    let mut surface = RecordingSurface::default();
    let stats = engine.draw(&mut surface);

    let counts = engine.visible_counts();
    assert_eq!(stats.nodes, counts.persons + counts.groups);
    assert_eq!(stats.edges, counts.edges);
    assert_eq!(surface.circles(), 3);
    assert_eq!(
        surface.calls.first(),
        Some(&common::DrawCall::Fill(engine.palette().background))
    );
}

#[test]
fn anonymized_labels_keep_the_owner_and_groups() {
    let options = EngineOptions {
        anonymize: true,
        ..EngineOptions::default()
    };
    let engine = mount(board_snapshot(), options);
    let mut surface = RecordingSurface::default();
    engine.draw(&mut surface);

    let texts = surface.texts();
    assert!(texts.contains(&"Ada Lovelace"));
    assert!(texts.contains(&"Board"));
    assert!(!texts.contains(&"Bob Noyce"));
    assert_eq!(texts.iter().filter(|text| **text == ANONYMOUS_LABEL).count(), 2);
}

#[test]
fn hovered_node_is_drawn_larger_in_the_hover_color() {
    let mut engine = mount(board_snapshot(), EngineOptions::default());
    let ada = engine.node(NodeId::Person(ADA)).expect("ada built").position;
    let screen = engine.viewport().world_to_screen(ada);
    let scale = engine.viewport().scale();

    engine.handle_pointer(PointerEvent::Move(screen));
    assert_eq!(engine.hovered().map(|node| node.id), Some(NodeId::Person(ADA)));

    let mut surface = RecordingSurface::default();
    engine.draw(&mut surface);
    let hover = engine.palette().hover;
    let hovered = surface
        .calls
        .iter()
        .filter_map(|call| match call {
            DrawCall::Circle {
                center,
                radius,
                fill,
            } if *fill == hover => Some((*center, *radius)),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(hovered.len(), 1);
    assert!((hovered[0].0 - screen).length() < 1e-3);
    assert!((hovered[0].1 - PERSON_RADIUS * HOVER_RADIUS_SCALE * scale).abs() < 1e-3);

    engine.handle_pointer(PointerEvent::Leave);
    let mut surface = RecordingSurface::default();
    engine.draw(&mut surface);
    assert!(!surface.calls.iter().any(
        |call| matches!(call, DrawCall::Circle { fill, .. } if *fill == hover)
    ));
}
