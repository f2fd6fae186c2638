pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;
pub use config::ReportConfig;

pub use adapters::LocalStorage;
pub use crate::core::{engine::ReportEngine, engine::RunStage, pipeline::ReportPipeline};
pub use utils::error::{ReportError, Result};
