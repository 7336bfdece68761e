//! Main application orchestrator.
//!
//! Coordinates one run over a trail description:
//! 1. Initializes logging.
//! 2. Validates the trail file and loads the trail.
//! 3. Walks the trail once under the selected walker personality.
//! 4. Enumerates the difficulty-limited (and optionally difference-bounded) paths.
//! 5. Writes the report to the output file or standard output.
//!
//! Adheres to `--quiet` for controlling verbosity.

use super::cli::Cli;
use super::error::AppError;
use super::file_handler;
use super::logger;
use super::processing;
use super::{verbose_eprintln, verbose_println};
use trail_walker::ReportOptions;

/// Runs the main application logic based on parsed command-line arguments.
///
/// # Errors
/// Returns `AppError` if the trail cannot be loaded, the walker cannot be
/// built from the arguments, or the report cannot be written.
pub fn run_app(cli: Cli) -> Result<(), AppError> {
    let quiet_mode = cli.quiet;

    if !quiet_mode {
        if let Err(e) = logger::init_global_logger(&cli.log_file) {
            // Keep going without the file log.
            eprintln!(
                "Warning: Failed to initialize verbose logger ({}): {}. Verbose file logging will be unavailable.",
                cli.log_file.display(),
                e
            );
        } else {
            verbose_println!(
                quiet_mode,
                "Verbose logging initialized to {}",
                cli.log_file.display()
            );
        }
    }

    let result = run_steps(&cli);

    if let Err(e) = &result {
        verbose_eprintln!(quiet_mode, "[ERROR] {}", e);
    }
    if !quiet_mode {
        if let Err(e) = logger::flush_global_logger() {
            eprintln!(
                "[WARNING] Failed to perform final flush of {}: {}",
                cli.log_file.display(),
                e
            );
        }
    }
    result?;

    if quiet_mode {
        println!("Done.");
    } else if let Some(output) = &cli.output {
        println!(
            "\nTrail walk finished. Report written to '{}', verbose output in '{}'.",
            output.display(),
            cli.log_file.display()
        );
    }
    Ok(())
}

fn run_steps(cli: &Cli) -> Result<(), AppError> {
    let quiet_mode = cli.quiet;

    let trail_file = file_handler::validate_trail_file(&cli.trail_file, quiet_mode)?;

    verbose_println!(
        quiet_mode,
        "\n============================================================"
    );
    verbose_println!(quiet_mode, "Processing Trail: {}", trail_file);
    verbose_println!(
        quiet_mode,
        "============================================================"
    );

    let trail = processing::load_trail(trail_file, quiet_mode)?;

    let mut strategy =
        processing::build_strategy(cli.strategy, cli.script.as_deref(), quiet_mode)?;
    let summary = processing::walk_trail(&trail, strategy.as_mut(), quiet_mode);

    let options = ReportOptions {
        limit: cli.limit,
        max_difference: cli.max_difference,
        maximal_only: cli.maximal_only,
    };
    let report = processing::build_report(
        &trail,
        cli.strategy,
        strategy.as_ref(),
        &summary,
        &options,
        quiet_mode,
    )?;

    match &cli.output {
        Some(output) => {
            file_handler::write_content_to_file(output, &report)?;
            verbose_println!(
                quiet_mode,
                "\n[INFO] Report written to {}",
                output.display()
            );
        }
        None if !quiet_mode => print!("{}", report),
        None => {}
    }
    Ok(())
}
