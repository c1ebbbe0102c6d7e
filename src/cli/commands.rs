//! CLI command handlers.
//!
//! Each command has a `*_report` core that writes to any sink and takes the
//! pacer as a parameter, so tests can drive it instantly. The `run_*`
//! wrappers print to stdout and sleep between frames.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use tracing::{debug, error};
use validator::Validate;

use super::args::{PathOptions, SortInput, SortOptions};
use super::output::{format_bars, format_frame_log, print_help, print_version};
use super::{Args, Command};
use crate::config::{InputConfig, VizConfig};
use crate::engine::{Outcome, Pacer, SleepPacer};
use crate::error::{VizError, VizResult};
use crate::pathfinding::{GridDisplay, GridMode, PathfindingSession};
use crate::sorting::{random_input, SortingSession};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Sort(options) => run_sort(&options),
        Command::Path(options) => run_path(&options),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Run the `sort` command against stdout.
#[must_use]
pub fn run_sort(options: &SortOptions) -> ExitCode {
    let stdout = io::stdout();
    exit_code(sort_report(options, SleepPacer, &mut stdout.lock()))
}

/// Run the `path` command against stdout.
#[must_use]
pub fn run_path(options: &PathOptions) -> ExitCode {
    let stdout = io::stdout();
    exit_code(path_report(options, SleepPacer, &mut stdout.lock()))
}

fn exit_code(result: VizResult<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn load_config(path: Option<&Path>) -> VizResult<VizConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            VizConfig::load(path)
        }
        None => Ok(VizConfig::default()),
    }
}

/// Values the `sort` command will run on.
///
/// # Errors
///
/// Fails when `--random` asks for more values than `input.length` allows.
pub fn resolve_input(input: &SortInput, config: &InputConfig) -> VizResult<Vec<i32>> {
    match input {
        SortInput::Values(values) => Ok(values.clone()),
        SortInput::Random { len, seed } => {
            let random = InputConfig {
                seed: seed.unwrap_or(config.seed),
                length: *len,
                ..config.clone()
            };
            random.validate()?;
            Ok(random_input(&random))
        }
    }
}

/// Play a sort, writing every log line (and, verbosely, the bars) to `out`.
///
/// # Errors
///
/// Fails on an unreadable or invalid config, an empty input, a guard
/// violation, or a write error.
pub fn sort_report(options: &SortOptions, mut pacer: impl Pacer, out: &mut impl Write) -> VizResult<()> {
    let config = load_config(options.config_path.as_deref())?;
    let values = resolve_input(&options.input, &config.input)?;
    if let SortInput::Random { len, seed } = &options.input {
        writeln!(out, "Random input: {len} values, seed {}", seed.unwrap_or(config.input.seed))?;
    }
    let delay = options
        .delay_ms
        .map_or(config.sorting.step_delay(), Duration::from_millis);

    let mut session = SortingSession::with_config(&config);
    let _ = session.set_input(&values);
    writeln!(out, "{}: {}", options.algorithm, format_bars(session.bars()))?;
    if let Outcome::Ignored(reason) = session.start_sort(options.algorithm, delay) {
        return Err(VizError::invalid_input(format!("cannot sort: {reason}")));
    }

    while let Some(frame) = session.advance()? {
        out.write_all(format_frame_log(&frame).as_bytes())?;
        if options.verbose {
            writeln!(out, "    {}", format_bars(&frame.snapshot))?;
        }
        pacer.pause(frame.pause);
    }
    writeln!(out, "Result: {}", format_bars(session.bars()))?;
    Ok(())
}

/// Play a grid search, writing every log line (and, verbosely, the grid)
/// to `out`.
///
/// # Errors
///
/// Fails on an unreadable or invalid config, a missing Start or End, a
/// guard violation, or a write error.
pub fn path_report(options: &PathOptions, mut pacer: impl Pacer, out: &mut impl Write) -> VizResult<()> {
    let config = load_config(options.config_path.as_deref())?;
    let delay = options
        .delay_ms
        .map_or(config.pathfinding.step_delay(), Duration::from_millis);

    let mut session = PathfindingSession::with_config(&config);
    let edits = [(GridMode::SetStart, options.start), (GridMode::SetEnd, options.end)]
        .into_iter()
        .filter_map(|(mode, cell)| cell.map(|cell| (mode, cell)))
        .chain(options.barriers.iter().map(|&cell| (GridMode::DrawBarrier, cell)));
    for (mode, (row, col)) in edits {
        let _ = session.set_mode(mode);
        if let Outcome::Ignored(reason) = session.on_cell_tapped(row, col) {
            writeln!(out, "Ignored {mode:?} at {row},{col}: {reason}")?;
        }
    }

    if let Outcome::PreconditionFailed(message) = session.run_pathfinding(options.algorithm, delay) {
        writeln!(out, "{message}")?;
        return Err(VizError::invalid_input(message));
    }
    writeln!(out, "{}", session.status())?;

    let shape = session.shape();
    while let Some(frame) = session.advance()? {
        out.write_all(format_frame_log(&frame).as_bytes())?;
        if options.verbose {
            write!(out, "{}", GridDisplay::new(shape, &frame.snapshot))?;
        }
        pacer.pause(frame.pause);
    }
    write!(out, "{}", GridDisplay::new(shape, session.cells()))?;
    Ok(())
}
