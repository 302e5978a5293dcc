use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

use crate::crm::PersonId;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForceParams {
    pub repulsion: f32,
    pub person_attraction: f32,
    pub group_attraction: f32,
    pub center_force: f32,
    pub damping: f32,
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            repulsion: 6000.0,
            person_attraction: 0.004,
            group_attraction: 0.008,
            center_force: 0.002,
            damping: 0.85,
        }
    }
}

impl ForceParams {
    fn sanitized(self) -> Self {
        let defaults = Self::default();
        let non_negative = |value: f32, fallback: f32| {
            if value.is_finite() {
                value.max(0.0)
            } else {
                fallback
            }
        };

        Self {
            repulsion: non_negative(self.repulsion, defaults.repulsion),
            person_attraction: non_negative(self.person_attraction, defaults.person_attraction),
            group_attraction: non_negative(self.group_attraction, defaults.group_attraction),
            center_force: non_negative(self.center_force, defaults.center_force),
            damping: if self.damping.is_finite() {
                self.damping.clamp(0.0, 0.99)
            } else {
                defaults.damping
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineOptions {
    pub show_groups: bool,
    pub disable_person_lines: bool,
    pub hide_orphans: bool,
    pub anonymize: bool,
    pub highlight_person_id: Option<PersonId>,
    pub person_line_opacity: f32,
    pub group_line_opacity: f32,
    pub forces: ForceParams,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            show_groups: true,
            disable_person_lines: false,
            hide_orphans: false,
            anonymize: false,
            highlight_person_id: None,
            person_line_opacity: 0.8,
            group_line_opacity: 0.5,
            forces: ForceParams::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionsChange {
    Unchanged,
    Cosmetic,
    Structural,
}

impl EngineOptions {
    pub fn sanitized(mut self) -> Self {
        let opacity = |value: f32| {
            if value.is_finite() {
                value.clamp(0.0, 1.0)
            } else {
                1.0
            }
        };
        self.person_line_opacity = opacity(self.person_line_opacity);
        self.group_line_opacity = opacity(self.group_line_opacity);
        self.forces = self.forces.sanitized();
        self
    }

    pub fn with_default_highlight(mut self, self_id: Option<PersonId>) -> Self {
        if self.highlight_person_id.is_none() {
            self.highlight_person_id = self_id;
        }
        self
    }

    pub fn change_from(&self, previous: &EngineOptions) -> OptionsChange {
        if self == previous {
            return OptionsChange::Unchanged;
        }

        let structural = self.show_groups != previous.show_groups
            || self.disable_person_lines != previous.disable_person_lines
            || self.hide_orphans != previous.hide_orphans
            || self.highlight_person_id != previous.highlight_person_id;

        if structural {
            OptionsChange::Structural
        } else {
            OptionsChange::Cosmetic
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Color32,
    pub grid: Color32,
    pub person: Color32,
    pub self_person: Color32,
    pub group: Color32,
    pub relationship: Color32,
    pub hover: Color32,
    pub outline: Color32,
    pub label: Color32,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(19, 23, 29),
            grid: Color32::from_rgba_unmultiplied(60, 70, 80, 70),
            person: Color32::from_rgb(86, 156, 214),
            self_person: Color32::from_rgb(245, 206, 93),
            group: Color32::from_rgb(152, 118, 214),
            relationship: Color32::from_rgb(160, 170, 182),
            hover: Color32::from_rgb(255, 164, 101),
            outline: Color32::from_rgba_unmultiplied(15, 15, 15, 190),
            label: Color32::from_gray(238),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color32::from_rgb(246, 247, 249),
            grid: Color32::from_rgba_unmultiplied(180, 186, 194, 80),
            person: Color32::from_rgb(44, 110, 181),
            self_person: Color32::from_rgb(214, 152, 20),
            group: Color32::from_rgb(118, 82, 184),
            relationship: Color32::from_rgb(96, 104, 116),
            hover: Color32::from_rgb(232, 110, 48),
            outline: Color32::from_rgba_unmultiplied(40, 40, 40, 160),
            label: Color32::from_gray(24),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}
