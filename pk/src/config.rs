//! Configuration for pagekit

use eyre::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::assemble::AssembleOptions;
use crate::rewrite::{RewriteError, RewriteJob};

/// Main pagekit configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Directory relative paths are resolved against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,

    /// Template assembly inputs and output
    pub assemble: AssembleConfig,

    /// In-place rewrite jobs, run in order
    pub rewrites: Vec<RewriteJob>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AssembleConfig {
    /// Backup markup template
    pub markup: PathBuf,

    /// Bet logic script
    pub script: PathBuf,

    /// Generated page template
    pub output: PathBuf,

    /// Number of markup lines to copy
    pub line_limit: usize,
}

impl Default for AssembleConfig {
    fn default() -> Self {
        let defaults = AssembleOptions::default();
        Self {
            markup: defaults.markup,
            script: defaults.script,
            output: defaults.output,
            line_limit: defaults.line_limit,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let mut candidates = vec![PathBuf::from(".pagekit.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("pagekit").join("pagekit.yml"));
        }

        for candidate in candidates {
            if candidate.exists() {
                match Self::load_from_file(&candidate) {
                    Ok(config) => return Ok(config),
                    Err(e) => warn!("Failed to load config from {}: {:#}", candidate.display(), e),
                }
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let mut config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        if config.base_dir.is_none() {
            config.base_dir = path.parent().map(Path::to_path_buf);
        }

        info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Base directory with a leading `~/` expanded
    pub fn base(&self) -> PathBuf {
        match &self.base_dir {
            Some(dir) => expand_tilde(dir),
            None => PathBuf::new(),
        }
    }

    /// Resolve a configured path against the base directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        let path = expand_tilde(path);
        if path.is_absolute() {
            path
        } else {
            self.base().join(path)
        }
    }

    /// Assembly options with every path resolved
    pub fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions {
            markup: self.resolve(&self.assemble.markup),
            script: self.resolve(&self.assemble.script),
            output: self.resolve(&self.assemble.output),
            line_limit: self.assemble.line_limit,
        }
    }

    /// Select one job by name, or all jobs when no name is given
    pub fn rewrite_jobs(&self, name: Option<&str>) -> Result<Vec<&RewriteJob>, RewriteError> {
        match name {
            None => Ok(self.rewrites.iter().collect()),
            Some(name) => self
                .rewrites
                .iter()
                .find(|job| job.name == name)
                .map(|job| vec![job])
                .ok_or_else(|| RewriteError::UnknownJob { name: name.to_string() }),
        }
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}
