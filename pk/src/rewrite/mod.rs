//! In-place source rewrites
//!
//! A job applies an ordered list of regex substitutions to each of its files
//! and writes back only the files whose content changed.

mod error;

pub use error::RewriteError;

use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A single substitution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RewriteRule {
    /// Regex to search for
    pub pattern: String,

    /// Replacement text; `$1`/`${name}` expand capture groups, `$$` is a literal `$`
    pub replacement: String,

    /// Skip the rule when the content already contains this text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unless_contains: Option<String>,
}

/// A named set of rules applied to a list of files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RewriteJob {
    pub name: String,
    pub files: Vec<PathBuf>,
    pub rules: Vec<RewriteRule>,
}

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// Content changed; written unless the run was a dry run
    Changed { replacements: usize },
    /// No rule matched, or the result was identical to the input
    Unchanged,
    /// File does not exist; skipped
    Missing,
}

/// Result for one file of a job
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: Result<RewriteOutcome, RewriteError>,
}

struct CompiledRule<'a> {
    regex: Regex,
    rule: &'a RewriteRule,
}

impl RewriteJob {
    /// Run the job against files resolved relative to `base`
    ///
    /// Every pattern is compiled before any file is touched. Per-file
    /// failures are reported and do not stop the remaining files.
    pub fn run(&self, base: &Path, dry_run: bool) -> Result<Vec<FileReport>, RewriteError> {
        let rules = self.compile()?;
        info!("Running rewrite job '{}' on {} files", self.name, self.files.len());

        let reports = self
            .files
            .iter()
            .map(|file| {
                let path = base.join(file);
                let result = rewrite_file(&path, &rules, dry_run);
                match &result {
                    Ok(RewriteOutcome::Missing) => warn!("{} not found, skipped", path.display()),
                    Ok(outcome) => debug!("{}: {:?}", path.display(), outcome),
                    Err(e) => warn!("{}", e),
                }
                FileReport { path, result }
            })
            .collect();

        Ok(reports)
    }

    fn compile(&self) -> Result<Vec<CompiledRule<'_>>, RewriteError> {
        self.rules
            .iter()
            .map(|rule| {
                let regex = Regex::new(&rule.pattern).map_err(|source| RewriteError::InvalidPattern {
                    pattern: rule.pattern.clone(),
                    source,
                })?;
                Ok(CompiledRule { regex, rule })
            })
            .collect()
    }
}

fn rewrite_file(path: &Path, rules: &[CompiledRule<'_>], dry_run: bool) -> Result<RewriteOutcome, RewriteError> {
    let original = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(RewriteOutcome::Missing),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            return Err(RewriteError::Decoding {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(RewriteError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let (content, replacements) = apply_rules(&original, rules);
    if content == original {
        return Ok(RewriteOutcome::Unchanged);
    }

    if !dry_run {
        fs::write(path, content).map_err(|source| RewriteError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    Ok(RewriteOutcome::Changed { replacements })
}

fn apply_rules(original: &str, rules: &[CompiledRule<'_>]) -> (String, usize) {
    let mut content = original.to_string();
    let mut replacements = 0;

    for CompiledRule { regex, rule } in rules {
        if let Some(guard) = &rule.unless_contains {
            if content.contains(guard.as_str()) {
                continue;
            }
        }
        let count = regex.find_iter(&content).count();
        if count == 0 {
            continue;
        }
        content = regex.replace_all(&content, rule.replacement.as_str()).into_owned();
        replacements += count;
    }

    (content, replacements)
}
