use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Pos2};
use tracing::{error, info, warn};

use crm_graph::crm::{PersonId, Snapshot, load_snapshot};
use crm_graph::engine::scheduler::FrameTicket;
use crm_graph::error::INIT_FAILURE_MESSAGE;
use crm_graph::{EngineOptions, GraphEngine, Palette};

mod graph;
mod render_utils;
mod ui;

pub struct Launch {
    pub snapshot_path: PathBuf,
    pub self_id: Option<PersonId>,
    pub options: EngineOptions,
    pub palette: Palette,
}

pub struct CrmGraphApp {
    launch: Launch,
    state: AppState,
    reload_rx: Option<Receiver<Result<Snapshot, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Snapshot, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
    InitFailed,
}

struct ViewModel {
    snapshot_label: String,
    self_id: Option<PersonId>,
    palette: Palette,
    options: EngineOptions,
    pending_snapshot: Option<Snapshot>,
    engine: Option<GraphEngine>,
    next_frame: Option<FrameTicket>,
    last_pointer: Option<Pos2>,
    people: Vec<PersonEntry>,
    highlight_search: String,
    last_navigation: Option<String>,
}

#[derive(Clone)]
struct PersonEntry {
    id: PersonId,
    name: String,
}

impl CrmGraphApp {
    pub fn new(cc: &eframe::CreationContext<'_>, launch: Launch) -> Self {
        let state = if cc.gl.is_none() {
            error!("no OpenGL context available for the graph canvas");
            AppState::InitFailed
        } else {
            Self::start_load(launch.snapshot_path.clone())
        };

        Self {
            launch,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(snapshot_path: PathBuf) -> Receiver<Result<Snapshot, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_snapshot(&snapshot_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(snapshot_path: PathBuf) -> AppState {
        info!(path = %snapshot_path.display(), "loading snapshot");
        AppState::Loading {
            rx: Self::spawn_load(snapshot_path),
        }
    }
}

impl eframe::App for CrmGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(snapshot)) => {
                        transition =
                            Some(AppState::Ready(Box::new(ViewModel::new(&self.launch, snapshot))));
                    }
                    Ok(Err(error)) => {
                        warn!(%error, "snapshot load failed");
                        transition = Some(AppState::Error(error));
                    }
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition =
                            Some(AppState::Error("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading relationship graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load CRM snapshot");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.launch.snapshot_path.clone()));
                    }
                });
            }
            AppState::InitFailed => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading(INIT_FAILURE_MESSAGE);
                    });
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                if let Err(mount_error) = model.show(ctx, &mut reload_requested, is_reloading) {
                    error!(error = %mount_error, "graph engine failed to mount");
                    transition = Some(AppState::InitFailed);
                }

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.launch.snapshot_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(snapshot)) => model.replace_snapshot(snapshot),
                        Ok(Err(error)) => {
                            warn!(%error, "snapshot reload failed");
                            transition = Some(AppState::Error(error));
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(AppState::Error("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
