#![allow(dead_code)]

use crm_graph::crm::{Group, GroupId, Person, PersonId, Relationship, Snapshot};
use crm_graph::engine::render::RenderSurface;
use crm_graph::{EngineOptions, GraphEngine, Palette};
use eframe::egui::{Color32, Pos2, Vec2, vec2};

pub const ADA: PersonId = PersonId(1);
pub const BOB: PersonId = PersonId(2);
pub const CLEO: PersonId = PersonId(3);
pub const BOARD: GroupId = GroupId(10);

pub fn canvas() -> Vec2 {
    vec2(800.0, 600.0)
}

pub fn person(id: u64, name: &str) -> Person {
    Person {
        id: PersonId(id),
        display_name: name.to_owned(),
        affiliation: None,
    }
}

pub fn relationship(from: PersonId, to: PersonId) -> Relationship {
    Relationship {
        from_id: from,
        to_id: to,
        color_hint: None,
    }
}

/// Ada, Bob and Cleo; Ada knows Bob; Ada and Cleo sit on the board.
pub fn board_snapshot() -> Snapshot {
    Snapshot {
        people: vec![
            person(1, "Ada Lovelace"),
            person(2, "Bob Noyce"),
            person(3, "Cleo Reyes"),
        ],
        relationships: vec![relationship(ADA, BOB)],
        groups: vec![Group {
            id: BOARD,
            name: "Board".to_owned(),
            color: None,
            member_ids: vec![ADA, CLEO],
        }],
        self_id: Some(ADA),
    }
}

pub fn mount(snapshot: Snapshot, options: EngineOptions) -> GraphEngine {
    GraphEngine::mount(snapshot, Some(ADA), options, Palette::dark(), canvas())
        .expect("mount on a sized canvas")
}

pub fn highlight(id: PersonId) -> EngineOptions {
    EngineOptions {
        highlight_person_id: Some(id),
        ..EngineOptions::default()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Fill(Color32),
    Line { from: Pos2, to: Pos2 },
    Circle { center: Pos2, radius: f32, fill: Color32 },
    Text(String),
}

#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn circles(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Circle { .. }))
            .count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for RecordingSurface {
    fn fill(&mut self, color: Color32) {
        self.calls.push(DrawCall::Fill(color));
    }

    fn line(&mut self, from: Pos2, to: Pos2, _width: f32, _color: Color32) {
        self.calls.push(DrawCall::Line { from, to });
    }

    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, _outline: Color32) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            fill,
        });
    }

    fn text(&mut self, _anchor: Pos2, text: &str, _size: f32, _color: Color32) {
        self.calls.push(DrawCall::Text(text.to_owned()));
    }
}
