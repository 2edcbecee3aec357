//! Configuration structures for the normalization pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{InvnormError, Result};

/// Main configuration for the invnorm pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Known company names, in canonical spelling. Matched literally
    /// (case-insensitive, whitespace-tolerant) before any structural
    /// pattern; a hit is reported in this exact spelling.
    pub known_companies: Vec<String>,

    /// Value substituted when no company pattern matches.
    pub company_sentinel: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            known_companies: Vec::new(),
            company_sentinel: "Unknown Company".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| InvnormError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| InvnormError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
