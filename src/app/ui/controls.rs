use eframe::egui::{self, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use tracing::debug;

use crm_graph::EngineOptions;
use crm_graph::crm::PersonId;
use crm_graph::engine::visibility::ANONYMOUS_LABEL;

use super::super::{PersonEntry, ViewModel};

const MAX_PICKER_ROWS: usize = 12;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

fn ranked_people<'a>(people: &'a [PersonEntry], query: &str) -> Vec<&'a PersonEntry> {
    let query = query.trim();
    if query.is_empty() {
        return people.iter().take(MAX_PICKER_ROWS).collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored = people
        .iter()
        .filter_map(|entry| {
            fuzzy_match_score(&matcher, &entry.name, query)
                .or_else(|| fuzzy_match_score(&matcher, &entry.id.to_string(), query))
                .map(|score| (score, entry))
        })
        .collect::<Vec<_>>();
    scored.sort_by(|(a_score, a), (b_score, b)| b_score.cmp(a_score).then(a.id.cmp(&b.id)));
    scored
        .into_iter()
        .take(MAX_PICKER_ROWS)
        .map(|(_, entry)| entry)
        .collect()
}

impl ViewModel {
    fn person_name(&self, id: PersonId) -> String {
        let anonymized = self.options.anonymize && Some(id) != self.self_id;
        match self.people.iter().find(|entry| entry.id == id) {
            Some(_) if anonymized => format!("{ANONYMOUS_LABEL} #{id}"),
            Some(entry) => entry.name.clone(),
            None => format!("unknown person #{id}"),
        }
    }

    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        let mut options = self.options.clone();

        ui.heading("Filters");
        ui.checkbox(&mut options.show_groups, "Show groups");
        ui.checkbox(&mut options.disable_person_lines, "Disable person lines")
            .on_hover_text("Hide relationship lines; people stay reachable through groups");
        ui.checkbox(&mut options.hide_orphans, "Hide orphans")
            .on_hover_text("Hide people without relationships or group memberships");
        ui.checkbox(&mut options.anonymize, "Anonymize names");

        ui.separator();
        ui.heading("Highlight");
        match options.highlight_person_id {
            Some(id) => ui.label(format!("Centered on {}", self.person_name(id))),
            None => ui.label("Showing everyone"),
        };
        ui.horizontal(|ui| {
            if ui
                .add_enabled(
                    options.highlight_person_id.is_some(),
                    egui::Button::new("Clear highlight"),
                )
                .clicked()
            {
                options.highlight_person_id = None;
            }
            if let Some(self_id) = self.self_id
                && ui
                    .add_enabled(
                        options.highlight_person_id != Some(self_id),
                        egui::Button::new("Highlight me"),
                    )
                    .clicked()
            {
                options.highlight_person_id = Some(self_id);
            }
        });

        ui.add(
            egui::TextEdit::singleline(&mut self.highlight_search)
                .hint_text("Find a person to highlight"),
        );
        egui::ScrollArea::vertical()
            .id_salt("highlight_picker")
            .max_height(220.0)
            .show(ui, |ui| {
                for entry in ranked_people(&self.people, &self.highlight_search) {
                    let label = if options.anonymize && Some(entry.id) != self.self_id {
                        format!("{ANONYMOUS_LABEL} #{}", entry.id)
                    } else {
                        entry.name.clone()
                    };
                    let selected = options.highlight_person_id == Some(entry.id);
                    if ui.selectable_label(selected, label).clicked() {
                        options.highlight_person_id = Some(entry.id);
                    }
                }
            });

        ui.separator();
        ui.heading("Lines");
        ui.add(
            egui::Slider::new(&mut options.person_line_opacity, 0.0..=1.0)
                .text("Person line opacity")
                .clamping(egui::SliderClamping::Always),
        );
        ui.add(
            egui::Slider::new(&mut options.group_line_opacity, 0.0..=1.0)
                .text("Group line opacity")
                .clamping(egui::SliderClamping::Always),
        );

        egui::CollapsingHeader::new("Physics")
            .default_open(false)
            .show(ui, |ui| {
                let forces = &mut options.forces;
                ui.add(
                    egui::Slider::new(&mut forces.repulsion, 500.0..=20_000.0)
                        .text("Repulsion")
                        .logarithmic(true)
                        .clamping(egui::SliderClamping::Always),
                );
                ui.add(
                    egui::Slider::new(&mut forces.person_attraction, 0.0..=0.05)
                        .text("Person attraction")
                        .clamping(egui::SliderClamping::Always),
                );
                ui.add(
                    egui::Slider::new(&mut forces.group_attraction, 0.0..=0.05)
                        .text("Group attraction")
                        .clamping(egui::SliderClamping::Always),
                );
                ui.add(
                    egui::Slider::new(&mut forces.center_force, 0.0..=0.02)
                        .text("Center force")
                        .clamping(egui::SliderClamping::Always),
                );
                ui.add(
                    egui::Slider::new(&mut forces.damping, 0.5..=0.98)
                        .text("Damping")
                        .clamping(egui::SliderClamping::Always),
                );
            });

        if options != self.options {
            self.apply_options(options);
        }
    }

    fn apply_options(&mut self, options: EngineOptions) {
        let options = options.sanitized();
        self.options = options.clone();
        if let Some(engine) = self.engine.as_mut() {
            let change = engine.set_options(options);
            debug!(?change, "options updated from controls");
            self.next_frame = None;
        }
    }
}
