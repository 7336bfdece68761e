//! Core processing steps of the application: loading the trail, running the
//! guided walk and rendering the path report.

use std::io::Write;

use super::cli::StrategyKind;
use super::error::AppError;
use super::{verbose_eprintln, verbose_println};
use trail_walker::path::format_path;
use trail_walker::trail_loader;
use trail_walker::walker::{AlwaysBottom, AlwaysTop, GreedyLeastDifficulty, Scripted};
use trail_walker::{
    DecisionStrategy, PathEnumerator, ReportOptions, Trail, WalkOutcome, WalkSummary,
};

/// Loads and parses the trail description at `trail_file`.
pub fn load_trail(trail_file: &str, quiet_mode: bool) -> Result<Trail, AppError> {
    verbose_println!(quiet_mode, "\n[STEP 1] Loading trail description...");
    let trail = trail_loader::load_trail_from_file(trail_file)?;
    verbose_println!(
        quiet_mode,
        "   => Found {} mountain(s).",
        trail.collect_all_mountains().len()
    );
    Ok(trail)
}

/// Builds the walker personality selected on the command line.
///
/// # Errors
/// `AppError::InvalidArgument` if the scripted walker has no script, and
/// `AppError::Trail` if the script holds an invalid decision.
pub fn build_strategy(
    kind: StrategyKind,
    script: Option<&str>,
    quiet_mode: bool,
) -> Result<Box<dyn DecisionStrategy>, AppError> {
    if script.is_some() && kind != StrategyKind::Scripted {
        verbose_eprintln!(
            quiet_mode,
            "[WARNING] --script is ignored unless --strategy scripted is selected."
        );
    }

    let strategy: Box<dyn DecisionStrategy> = match kind {
        StrategyKind::Top => Box::new(AlwaysTop::new()),
        StrategyKind::Bottom => Box::new(AlwaysBottom::new()),
        StrategyKind::Greedy => Box::new(GreedyLeastDifficulty::new()),
        StrategyKind::Scripted => {
            let script = script.ok_or_else(|| {
                AppError::InvalidArgument("--strategy scripted requires --script".to_string())
            })?;
            Box::new(Scripted::from_script(script)?)
        }
    };
    Ok(strategy)
}

/// Walks the trail once under `strategy` and logs the outcome.
pub fn walk_trail(
    trail: &Trail,
    strategy: &mut dyn DecisionStrategy,
    quiet_mode: bool,
) -> WalkSummary {
    verbose_println!(quiet_mode, "[STEP 2] Walking the trail...");
    let summary = trail.follow_path(strategy);
    verbose_println!(
        quiet_mode,
        "   => Passed {} mountain(s), decided {} split(s), {}.",
        summary.mountains_visited,
        summary.splits_decided,
        outcome_label(summary.outcome)
    );
    summary
}

/// Renders the walk and the path enumeration into a single report.
pub fn build_report(
    trail: &Trail,
    kind: StrategyKind,
    strategy: &dyn DecisionStrategy,
    summary: &WalkSummary,
    options: &ReportOptions,
    quiet_mode: bool,
) -> Result<String, AppError> {
    verbose_println!(quiet_mode, "[STEP 3] Enumerating paths...");
    let mut buffer: Vec<u8> = Vec::new();

    writeln!(buffer, "=== GUIDED WALK ({:?}) ===", kind)?;
    let visited: Vec<_> = strategy.visited().iter().collect();
    if visited.is_empty() {
        writeln!(buffer, "No mountains passed.")?;
    } else {
        writeln!(buffer, "Passed: {}", format_path(&visited))?;
    }
    writeln!(
        buffer,
        "Splits decided: {}, {}",
        summary.splits_decided,
        outcome_label(summary.outcome)
    )?;
    writeln!(buffer)?;

    PathEnumerator::print_paths_to_writer(trail, options, &mut buffer)?;

    let report = String::from_utf8_lossy(&buffer).into_owned();
    verbose_println!(quiet_mode, "   => Report holds {} line(s).", report.lines().count());
    Ok(report)
}

fn outcome_label(outcome: WalkOutcome) -> &'static str {
    match outcome {
        WalkOutcome::Completed => "walked to the end",
        WalkOutcome::Stopped => "stopped early",
    }
}
