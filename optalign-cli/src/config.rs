//! Configuration handling for the optalign CLI
//!
//! Supports loading configuration from optalign.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use clap::ValueEnum;
use optalign_core::{TracebackParams, DEFAULT_GAP, DEFAULT_MAX_PATHS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "optalign.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub traceback: TracebackConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Number of worker threads for alignment reconstruction
    #[serde(default = "default_threads")]
    pub threads: usize,

    /// Reconstruct alignments in parallel
    #[serde(default = "default_true")]
    pub parallel: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Operation costs, e.g. "M0R1I1D1"
    #[serde(default = "default_costs")]
    pub costs: String,

    /// Matrix mode: "min" (distance) or "max" (similarity)
    #[serde(default = "default_mode")]
    pub mode: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracebackConfig {
    /// Maximum number of optimal alignments to enumerate (0 = no limit)
    #[serde(default = "default_max_paths")]
    pub max_paths: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// The full report as JSON
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format: "text" or "json"
    #[serde(default)]
    pub format: OutputFormat,

    /// Gap symbol used in explicit alignments
    #[serde(default = "default_gap")]
    pub gap: char,

    /// Print the filled matrix before the alignments
    #[serde(default)]
    pub show_matrix: bool,

    /// Include traceback pointers when printing the matrix
    #[serde(default = "default_true")]
    pub show_pointers: bool,
}

// Default value functions
fn default_threads() -> usize { num_cpus::get() }
fn default_true() -> bool { true }
fn default_costs() -> String { "M0R1I1D1".to_string() }
fn default_mode() -> String { "min".to_string() }
fn default_max_paths() -> usize { DEFAULT_MAX_PATHS }
fn default_gap() -> char { DEFAULT_GAP }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            parallel: true,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            costs: default_costs(),
            mode: default_mode(),
        }
    }
}

impl Default for TracebackConfig {
    fn default() -> Self {
        Self {
            max_paths: default_max_paths(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            gap: default_gap(),
            show_matrix: false,
            show_pointers: true,
        }
    }
}

impl TracebackConfig {
    pub fn params(&self) -> TracebackParams {
        match self.max_paths {
            0 => TracebackParams::unbounded(),
            n => TracebackParams::with_max_paths(n),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            log::info!("Loading configuration from: {}", path.display());
            return Self::load_from_file(path);
        }

        for candidate in Self::search_paths() {
            if candidate.exists() {
                log::info!("Loading configuration from: {}", candidate.display());
                return Self::load_from_file(&candidate);
            }
        }

        log::debug!("Using default configuration");
        Ok(Self::default())
    }

    /// Locations checked when no explicit path is given, in order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("optalign").join("config.toml"));
        }
        paths
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default())
            .context("Failed to serialize default configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scoring.costs, "M0R1I1D1");
        assert_eq!(config.scoring.mode, "min");
        assert_eq!(config.traceback.max_paths, DEFAULT_MAX_PATHS);
        assert_eq!(config.output.gap, '_');
    }

    #[test]
    fn test_config_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.scoring.costs = "M20R-1I-1D-1".to_string();
        config.output.gap = '-';
        let temp_file = NamedTempFile::new()?;

        config.save_to_file(temp_file.path())?;
        let loaded_config = Config::load_from_file(temp_file.path())?;

        assert_eq!(loaded_config.scoring.costs, "M20R-1I-1D-1");
        assert_eq!(loaded_config.output.gap, '-');
        assert_eq!(loaded_config.general.parallel, config.general.parallel);

        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(
            temp_file,
            "[scoring]\nmode = \"max\"\n\n[traceback]\nmax_paths = 0\n\n[output]\nformat = \"json\""
        )?;

        let config = Config::load(Some(temp_file.path()))?;
        assert_eq!(config.scoring.mode, "max");
        assert_eq!(config.scoring.costs, "M0R1I1D1");
        assert_eq!(config.traceback.params(), TracebackParams::unbounded());
        assert!(config.output.show_pointers);
        assert_eq!(config.output.format, OutputFormat::Json);

        Ok(())
    }

    #[test]
    fn test_example_toml_generation() -> Result<()> {
        let example = Config::example_toml()?;
        assert!(example.contains("[scoring]"));
        assert!(example.contains("[traceback]"));
        assert!(example.contains("[output]"));
        Ok(())
    }
}
