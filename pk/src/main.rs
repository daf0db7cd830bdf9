use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use pagekit::Assembler;
use pagekit::cli::{Cli, Command};
use pagekit::config::Config;
use pagekit::rewrite::RewriteOutcome;

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Assemble {
            markup,
            script,
            output,
            line_limit,
            stdout,
        } => {
            let mut options = config.assemble_options();
            if let Some(markup) = markup {
                options.markup = markup;
            }
            if let Some(script) = script {
                options.script = script;
            }
            if let Some(output) = output {
                options.output = output;
            }
            if let Some(line_limit) = line_limit {
                options.line_limit = line_limit;
            }

            let assembler = Assembler::new(options);
            if stdout {
                let (_, _, document) = assembler.render_document()?;
                print!("{}", document);
                return Ok(());
            }

            let report = assembler.run()?;
            let cut = if report.truncated {
                format!(" (cut at {} lines)", report.markup_lines).dimmed().to_string()
            } else {
                String::new()
            };
            println!(
                "{} Wrote {} from {} markup lines{}",
                "✓".green(),
                report.output.display().to_string().cyan(),
                report.markup_lines,
                cut
            );
        }
        Command::Rewrite { job, dry_run } => {
            let base = config.base();
            let mut failures = 0usize;

            for job in config.rewrite_jobs(job.as_deref())? {
                for report in job.run(&base, dry_run)? {
                    let path = report.path.display().to_string();
                    match report.result {
                        Ok(RewriteOutcome::Changed { replacements }) => {
                            let verb = if dry_run { "Would rewrite" } else { "Rewrote" };
                            println!("{} {} {} ({} replacements)", "✓".green(), verb, path.cyan(), replacements);
                        }
                        Ok(RewriteOutcome::Unchanged) => {
                            println!("{} {} already up to date", "ℹ".blue(), path);
                        }
                        Ok(RewriteOutcome::Missing) => {
                            println!("{} {} not found", "⚠".yellow(), path);
                        }
                        Err(e) => {
                            failures += 1;
                            eprintln!("{} {}", "✗".red(), e);
                        }
                    }
                }
            }

            if failures > 0 {
                return Err(eyre::eyre!("{} file(s) failed to rewrite", failures));
            }
            info!("Rewrite complete");
        }
        Command::Config => {
            print!("{}", serde_yaml::to_string(&config)?);
        }
    }

    Ok(())
}
