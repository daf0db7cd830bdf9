//! Page template assembly
//!
//! Builds the prediction input page from a bounded prefix of the backup
//! template, the bet logic script, and the fixed interactive block.

mod error;

pub use error::AssembleError;

use log::{debug, info};
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Form handlers for the marks form, the bet form and bet deletion
pub const INTERACTIVE_BLOCK: &str = include_str!("../../assets/interactive_block.js");

/// Tags closing the bet list and its containers left open by the markup prefix
const CONTAINER_CLOSE: [&str; 3] = ["</ul>\n", "</div>\n", "</div>\n"];

const SCRIPT_OPEN: &str = "<script>\n";

/// Separator written between the script payload and the interactive block
const PAYLOAD_SEPARATOR: &str = "\n\n";

const DOCUMENT_CLOSE: [&str; 3] = ["</script>\n", "</body>\n", "</html>\n"];

/// Leading lines of the markup file, each with its original terminator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupPrefix {
    /// Lines in source order
    pub lines: Vec<String>,
    /// Whether the source continued past the line limit
    pub truncated: bool,
}

impl MarkupPrefix {
    /// Number of lines kept
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Paths and limits for one assembly run
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Backup markup template
    pub markup: PathBuf,
    /// Bet logic script inlined into the page
    pub script: PathBuf,
    /// Generated page template
    pub output: PathBuf,
    /// Maximum number of markup lines to copy
    pub line_limit: usize,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            markup: PathBuf::from("input.ejs.backup"),
            script: PathBuf::from("input_bet_logic.js"),
            output: PathBuf::from("input.ejs"),
            line_limit: crate::DEFAULT_LINE_LIMIT,
        }
    }
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleReport {
    /// Written file
    pub output: PathBuf,
    /// Markup lines copied
    pub markup_lines: usize,
    /// Whether the markup file was cut at the line limit
    pub truncated: bool,
    /// Size of the inlined script in bytes
    pub script_bytes: usize,
    /// Size of the written document in bytes
    pub output_bytes: usize,
}

/// Assembles one page template
pub struct Assembler {
    options: AssembleOptions,
}

impl Assembler {
    pub fn new(options: AssembleOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AssembleOptions {
        &self.options
    }

    /// Read both inputs and build the document without writing it
    pub fn render_document(&self) -> Result<(MarkupPrefix, String, String), AssembleError> {
        let prefix = read_markup_prefix(&self.options.markup, self.options.line_limit)?;
        let payload = read_script_payload(&self.options.script)?;
        let document = render(&prefix, &payload);
        Ok((prefix, payload, document))
    }

    /// Read the inputs, then replace the output file with the assembled document
    ///
    /// Inputs are read in full before the output is opened, so a read failure
    /// leaves any existing output untouched.
    pub fn run(&self) -> Result<AssembleReport, AssembleError> {
        let (prefix, payload, document) = self.render_document()?;
        let output = &self.options.output;

        fs::write(output, document.as_bytes()).map_err(|e| AssembleError::from_write(output, e))?;

        info!(
            "Wrote {} ({} markup lines, {} script bytes)",
            output.display(),
            prefix.len(),
            payload.len()
        );

        Ok(AssembleReport {
            output: output.clone(),
            markup_lines: prefix.len(),
            truncated: prefix.truncated,
            script_bytes: payload.len(),
            output_bytes: document.len(),
        })
    }
}

/// Read at most `limit` lines from the start of a markup file
///
/// A file shorter than `limit` yields all of its lines. Content past the
/// limit is never decoded.
pub fn read_markup_prefix(path: &Path, limit: usize) -> Result<MarkupPrefix, AssembleError> {
    let file = fs::File::open(path).map_err(|e| AssembleError::from_read(path, e))?;
    let mut reader = BufReader::new(file);
    let mut lines = Vec::new();

    while lines.len() < limit {
        let mut line = String::new();
        let read = reader
            .read_line(&mut line)
            .map_err(|e| AssembleError::from_read(path, e))?;
        if read == 0 {
            break;
        }
        lines.push(line);
    }

    let truncated = !reader
        .fill_buf()
        .map_err(|e| AssembleError::from_read(path, e))?
        .is_empty();

    if truncated {
        debug!(
            "Cut {} at line {}; last kept line: {:?}",
            path.display(),
            lines.len(),
            lines.last().map(|l| l.trim_end())
        );
    } else {
        debug!("Read all {} lines of {}", lines.len(), path.display());
    }

    Ok(MarkupPrefix { lines, truncated })
}

/// Read the whole script file as text
pub fn read_script_payload(path: &Path) -> Result<String, AssembleError> {
    let payload = fs::read_to_string(path).map_err(|e| AssembleError::from_read(path, e))?;
    debug!("Read {} bytes of script from {}", payload.len(), path.display());
    Ok(payload)
}

/// Concatenate the document parts in page order
pub fn render(prefix: &MarkupPrefix, payload: &str) -> String {
    let markup_len: usize = prefix.lines.iter().map(String::len).sum();
    let mut out = String::with_capacity(markup_len + payload.len() + INTERACTIVE_BLOCK.len() + 128);

    for line in &prefix.lines {
        out.push_str(line);
    }
    for tag in CONTAINER_CLOSE {
        out.push_str(tag);
    }
    out.push_str(SCRIPT_OPEN);
    out.push_str(payload);
    out.push_str(PAYLOAD_SEPARATOR);
    out.push_str(INTERACTIVE_BLOCK);
    for tag in DOCUMENT_CLOSE {
        out.push_str(tag);
    }

    out
}
