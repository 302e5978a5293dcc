use std::collections::HashSet;

use eframe::egui::{self, Align, Context, Layout};

use crm_graph::crm::Snapshot;
use crm_graph::engine::interaction::NavigateEvent;
use crm_graph::engine::model::NodeId;
use crm_graph::engine::visibility::display_label;
use crm_graph::error::EngineError;

use super::super::{Launch, PersonEntry, ViewModel};

fn person_entries(snapshot: &Snapshot) -> Vec<PersonEntry> {
    let mut seen = HashSet::new();
    let mut people = snapshot
        .people
        .iter()
        .filter(|person| seen.insert(person.id))
        .map(|person| PersonEntry {
            id: person.id,
            name: person.display_name.clone(),
        })
        .collect::<Vec<_>>();
    people.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    people
}

impl ViewModel {
    pub(in crate::app) fn new(launch: &Launch, snapshot: Snapshot) -> Self {
        let self_id = launch.self_id.or(snapshot.self_id);
        let options = launch
            .options
            .clone()
            .with_default_highlight(self_id)
            .sanitized();

        Self {
            snapshot_label: launch.snapshot_path.display().to_string(),
            self_id,
            palette: launch.palette,
            options,
            people: person_entries(&snapshot),
            pending_snapshot: Some(snapshot),
            engine: None,
            next_frame: None,
            last_pointer: None,
            highlight_search: String::new(),
            last_navigation: None,
        }
    }

    pub(in crate::app) fn replace_snapshot(&mut self, snapshot: Snapshot) {
        self.people = person_entries(&snapshot);
        self.next_frame = None;
        match self.engine.as_mut() {
            Some(engine) => engine.set_snapshot(snapshot),
            None => self.pending_snapshot = Some(snapshot),
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        reload_requested: &mut bool,
        is_loading: bool,
    ) -> Result<(), EngineError> {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("crm-graph");
                    ui.separator();
                    ui.label(format!("snapshot: {}", self.snapshot_label));
                    if let Some(engine) = &self.engine {
                        let snapshot = engine.snapshot();
                        ui.label(format!("people: {}", snapshot.people.len()));
                        ui.label(format!("groups: {}", snapshot.groups.len()));
                        ui.label(format!(
                            "relationships: {}",
                            snapshot.relationships.len()
                        ));
                    }
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload snapshot"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(engine) = &self.engine {
                            let counts = engine.visible_counts();
                            ui.label(format!(
                                "visible: {} people, {} groups, {} lines",
                                counts.persons, counts.groups, counts.edges
                            ));
                        }
                        if let Some(navigation) = &self.last_navigation {
                            ui.label(navigation.as_str());
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default()
            .show(ctx, |ui| {
                if is_loading {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Reloading snapshot...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                    Ok(())
                } else {
                    self.draw_graph(ui)
                }
            })
            .inner
    }

    pub(in crate::app) fn record_navigation(&mut self, navigate: NavigateEvent) {
        let name = self
            .engine
            .as_ref()
            .and_then(|engine| {
                let node = engine.node(navigate.target)?;
                Some(display_label(node, engine.options().anonymize).to_owned())
            })
            .unwrap_or_default();

        self.last_navigation = Some(match navigate.target {
            NodeId::Person(id) => format!("open person {id}: {name}"),
            NodeId::Group(id) => format!("open group {id}: {name}"),
        });
    }
}
