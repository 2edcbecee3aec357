//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;

use std::path::Path;

use invnorm_core::PipelineConfig;

/// Load the pipeline configuration, falling back to defaults when no
/// config file was given.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PipelineConfig> {
    match config_path {
        Some(path) => Ok(PipelineConfig::from_file(Path::new(path))?),
        None => Ok(PipelineConfig::default()),
    }
}
