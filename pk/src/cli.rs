//! CLI argument parsing for pagekit

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pk")]
#[command(author, version, about = "Page template assembly for the prediction site", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the page template from the markup backup and bet logic script
    Assemble {
        /// Markup backup to take the leading lines from
        #[arg(short, long)]
        markup: Option<PathBuf>,

        /// Script inlined into the page
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Page template to write
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of markup lines to copy (default: 420)
        #[arg(short = 'n', long)]
        line_limit: Option<usize>,

        /// Print the document instead of writing it
        #[arg(long)]
        stdout: bool,
    },

    /// Apply configured regex rewrites to source files in place
    Rewrite {
        /// Job to run (default: all jobs)
        job: Option<String>,

        /// Report changes without writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_assemble_overrides() {
        let cli = Cli::parse_from(["pk", "assemble", "-n", "100", "--output", "out.ejs", "--stdout"]);
        match cli.command {
            Command::Assemble {
                line_limit,
                output,
                stdout,
                markup,
                ..
            } => {
                assert_eq!(line_limit, Some(100));
                assert_eq!(output, Some(PathBuf::from("out.ejs")));
                assert!(stdout);
                assert!(markup.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rewrite_with_global_flags() {
        let cli = Cli::parse_from(["pk", "rewrite", "pool-query", "--dry-run", "-v", "-c", "site.yml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("site.yml")));
        match cli.command {
            Command::Rewrite { job, dry_run } => {
                assert_eq!(job.as_deref(), Some("pool-query"));
                assert!(dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
