use std::path::PathBuf;

use clap::Parser;

use stack_license::license::conflict::ConflictMode;
use stack_license::license::resolver::TieBreak;

#[derive(Parser, Debug)]
#[command(
    name = "stack-license",
    about = "Resolve a single stack license compatible with every package license",
    version
)]
pub struct Cli {
    /// JSON payload with the stack's packages; `-` reads stdin
    #[arg(default_value = "-")]
    pub payload: PathBuf,

    /// Config file [default: ./.stack-license/config.toml, fallback ~/.config/stack-license/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Override the configured tie-break rule
    #[arg(long, value_name = "RULE")]
    pub tie_break: Option<TieBreakArg>,

    /// Override the configured conflict reporting mode
    #[arg(long, value_name = "MODE")]
    pub conflicts: Option<ConflictModeArg>,

    /// Print the known licenses and their upgrade paths, then exit
    #[arg(long)]
    pub list_licenses: bool,

    /// Show each input license's tier and reachable set
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum TieBreakArg {
    MostRestrictive,
    LastMatch,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::MostRestrictive => TieBreak::MostRestrictive,
            TieBreakArg::LastMatch => TieBreak::LastMatch,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ConflictModeArg {
    WholeSet,
    Pairwise,
}

impl From<ConflictModeArg> for ConflictMode {
    fn from(arg: ConflictModeArg) -> Self {
        match arg {
            ConflictModeArg::WholeSet => ConflictMode::WholeSet,
            ConflictModeArg::Pairwise => ConflictMode::Pairwise,
        }
    }
}
