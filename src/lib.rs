pub mod config;
pub mod crm;
pub mod engine;
pub mod error;
pub mod util;

pub use config::{EngineOptions, ForceParams, OptionsChange, Palette};
pub use engine::GraphEngine;
pub use error::EngineError;
