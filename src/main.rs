//! `stack-license` — resolve one license for a whole dependency stack.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load resolution config ([`stack_license::config::load_config`]), then
//!    apply `--tie-break` / `--conflicts` overrides.
//! 3. Validate the rule set once by building the scoring service.
//! 4. Read the payload (file or stdin) and score it.
//! 5. Render the requested report.
//! 6. Exit `0` when a stack license was found, `1` otherwise.

mod cli;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, ReportFormat};
use stack_license::config::load_config;
use stack_license::ingest::parse_payload;
use stack_license::license::ruleset::StaticRuleSet;
use stack_license::report::terminal;
use stack_license::ScoringService;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let cwd = std::env::current_dir()?;
    let mut config = load_config(&cwd, cli.config.as_deref())?;
    if let Some(tie_break) = cli.tie_break {
        config.resolution.tie_break = tie_break.into();
    }
    if let Some(conflicts) = cli.conflicts {
        config.resolution.conflicts = conflicts.into();
    }

    let service = ScoringService::from_provider(&StaticRuleSet::new(), config.resolution)
        .context("built-in rule set is malformed")?;

    if cli.list_licenses {
        return terminal::render_rule_set(service.rule_set());
    }

    let payload = read_payload(&cli.payload)?;
    let records = parse_payload(&payload)?;
    let result = service.score(&records)?;

    match cli.report {
        ReportFormat::Terminal => {
            let reachability = if cli.verbose {
                service.explain(&records)?
            } else {
                Vec::new()
            };
            terminal::render(&result, records.len(), &reachability, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    if !result.is_resolved() {
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins; otherwise `-v` shows info and `-q` only errors.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn read_payload(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("reading payload from stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading payload {}", path.display()))
}
