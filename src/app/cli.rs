use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Walker personality used for the single guided walk.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyKind {
    /// Always take the top branch.
    Top,
    /// Always take the bottom branch.
    Bottom,
    /// Take the branch whose first mountain is easiest.
    Greedy,
    /// Replay the decisions given with --script.
    Scripted,
}

#[derive(Parser, Debug)]
#[clap(author, version, about = "Walks a trail of mountains and enumerates its difficulty-bounded paths.", long_about = None)]
pub struct Cli {
    /// Trail description file
    pub trail_file: PathBuf,

    /// Walker personality for the guided walk.
    #[clap(short, long, value_enum, default_value_t = StrategyKind::Greedy)]
    pub strategy: StrategyKind,

    /// Comma separated decisions (top, bottom, stop) for the scripted walker.
    #[clap(long)]
    pub script: Option<String>,

    /// Difficulty budget for the difficulty-limited path enumeration.
    #[clap(short, long, default_value_t = 50)]
    pub limit: u32,

    /// Largest allowed spread between the hardest and easiest mountain of a path.
    #[clap(short = 'd', long)]
    pub max_difference: Option<u32>,

    /// Only report paths that are not a prefix of another reported path.
    #[clap(long)]
    pub maximal_only: bool,

    /// Write the path report to this file instead of standard output.
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Verbose log destination.
    #[clap(long, default_value = "trail-walker.log")]
    pub log_file: PathBuf,

    /// Suppress verbose output, only printing 'Done.' on success or errors.
    #[clap(short, long)]
    pub quiet: bool,
}
