mod app;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use crm_graph::crm::{PersonId, load_options};
use crm_graph::error::INIT_FAILURE_MESSAGE;
use crm_graph::{EngineOptions, Palette};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Theme {
    Dark,
    Light,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// CRM snapshot exported as JSON.
    #[arg(long)]
    snapshot: PathBuf,
    /// Person id of the account owner.
    #[arg(long)]
    self_id: Option<u64>,
    /// JSON file with graph options.
    #[arg(long)]
    options: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "dark")]
    theme: Theme,
    /// Overrides `showGroups` from the options file.
    #[arg(long)]
    show_groups: Option<bool>,
    #[arg(long)]
    hide_orphans: bool,
    #[arg(long)]
    disable_person_lines: bool,
    #[arg(long)]
    anonymize: bool,
    /// Person id to highlight instead of the account owner.
    #[arg(long)]
    highlight: Option<u64>,
}

impl Args {
    fn engine_options(&self) -> Result<EngineOptions> {
        let mut options = match &self.options {
            Some(path) => load_options(path)?,
            None => EngineOptions::default(),
        };

        if let Some(show_groups) = self.show_groups {
            options.show_groups = show_groups;
        }
        options.hide_orphans |= self.hide_orphans;
        options.disable_person_lines |= self.disable_person_lines;
        options.anonymize |= self.anonymize;
        if let Some(id) = self.highlight {
            options.highlight_person_id = Some(PersonId(id));
        }
        Ok(options)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let launch = app::Launch {
        snapshot_path: args.snapshot.clone(),
        self_id: args.self_id.map(PersonId),
        options: args.engine_options()?,
        palette: match args.theme {
            Theme::Dark => Palette::dark(),
            Theme::Light => Palette::light(),
        },
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "crm-graph",
        options,
        Box::new(move |cc| Ok(Box::new(app::CrmGraphApp::new(cc, launch)))),
    )
    .map_err(|run_error| {
        error!(error = %run_error, "render surface could not be created");
        eprintln!("{INIT_FAILURE_MESSAGE}");
        anyhow!("{run_error}")
    })
}
