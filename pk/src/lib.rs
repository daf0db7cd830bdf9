//! pagekit - page template tooling for the prediction site
//!
//! Assembles the prediction input page from a truncated backup template,
//! the externally authored bet logic script, and a fixed block of form
//! handlers. Also runs configured in-place source rewrites.
//!
//! # Output layout
//!
//! ```text
//! <first N lines of the markup backup>
//! </ul>
//! </div>
//! </div>
//! <script>
//! <script payload>
//!
//! <interactive block: marks form, bet form, deleteBet()>
//! </script>
//! </body>
//! </html>
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pagekit::{AssembleOptions, Assembler};
//!
//! let report = Assembler::new(AssembleOptions {
//!     markup: "input.ejs.backup".into(),
//!     script: "input_bet_logic.js".into(),
//!     output: "input.ejs".into(),
//!     line_limit: pagekit::DEFAULT_LINE_LIMIT,
//! })
//! .run()?;
//! ```

pub mod assemble;
pub mod cli;
pub mod config;
pub mod rewrite;

pub use assemble::{AssembleError, AssembleOptions, AssembleReport, Assembler, MarkupPrefix};
pub use rewrite::{RewriteError, RewriteJob, RewriteOutcome, RewriteRule};

/// Number of markup lines copied from the backup template
pub const DEFAULT_LINE_LIMIT: usize = 420;
