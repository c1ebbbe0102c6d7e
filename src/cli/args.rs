//! CLI argument parsing.
//!
//! Hand-rolled parser over any iterator of strings so every branch can be
//! exercised from tests. Malformed commands print a message and fall back
//! to help.

use std::path::PathBuf;

use crate::pathfinding::PathfindingAlgorithm;
use crate::sorting::SortAlgorithm;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Animate a sort
    Sort(SortOptions),
    /// Animate a grid search
    Path(PathOptions),
    /// Show help
    Help,
    /// Show version
    Version,
}

/// Where the values to sort come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortInput {
    /// Explicit values.
    Values(Vec<i32>),
    /// Reproducible random values.
    Random {
        /// Number of values.
        len: usize,
        /// Seed override; the configured seed otherwise.
        seed: Option<u64>,
    },
}

/// Options of the `sort` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOptions {
    /// Algorithm to run.
    pub algorithm: SortAlgorithm,
    /// Input values.
    pub input: SortInput,
    /// Per-frame delay override, in milliseconds.
    pub delay_ms: Option<u64>,
    /// Configuration file.
    pub config_path: Option<PathBuf>,
    /// Print the bars after every frame.
    pub verbose: bool,
}

/// Options of the `path` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathOptions {
    /// Algorithm to run.
    pub algorithm: PathfindingAlgorithm,
    /// Start cell.
    pub start: Option<(usize, usize)>,
    /// End cell.
    pub end: Option<(usize, usize)>,
    /// Barrier cells, toggled in order.
    pub barriers: Vec<(usize, usize)>,
    /// Per-frame delay override, in milliseconds.
    pub delay_ms: Option<u64>,
    /// Configuration file.
    pub config_path: Option<PathBuf>,
    /// Print the grid after every frame.
    pub verbose: bool,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// This method is testable as it accepts any iterator of strings,
    /// not just `std::env::args()`.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "sort" => Self::parse_sort_command(args),
            "path" => Self::parse_path_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    fn parse_sort_command(args: &[String]) -> Command {
        let Some(name) = args.get(2) else {
            eprintln!("Error: 'sort' command requires an algorithm");
            return Command::Help;
        };
        let algorithm = match name.parse::<SortAlgorithm>() {
            Ok(algorithm) => algorithm,
            Err(e) => {
                eprintln!("Error: {e}");
                return Command::Help;
            }
        };

        let mut values = None;
        let mut random_len = None;
        let mut seed = None;
        let mut delay_ms = None;
        let mut config_path = None;
        let mut verbose = false;

        let mut i = 3;
        while i < args.len() {
            let next = args.get(i + 1);
            match args[i].as_str() {
                "--random" => {
                    random_len = next.and_then(|s| s.parse().ok());
                    i += 2;
                }
                "--seed" => {
                    seed = next.and_then(|s| s.parse().ok());
                    i += 2;
                }
                "--delay" => {
                    delay_ms = next.and_then(|s| s.parse().ok());
                    i += 2;
                }
                "--config" => {
                    config_path = next.map(PathBuf::from);
                    i += 2;
                }
                "-v" | "--verbose" => {
                    verbose = true;
                    i += 1;
                }
                other => {
                    if values.is_none() {
                        values = Some(parse_values(other));
                    }
                    i += 1;
                }
            }
        }

        let input = match (values, random_len) {
            (_, Some(len)) => SortInput::Random { len, seed },
            (Some(values), None) => SortInput::Values(values),
            (None, None) => {
                eprintln!("Error: 'sort' needs a value list or --random <N>");
                return Command::Help;
            }
        };

        Command::Sort(SortOptions {
            algorithm,
            input,
            delay_ms,
            config_path,
            verbose,
        })
    }

    fn parse_path_command(args: &[String]) -> Command {
        let Some(name) = args.get(2) else {
            eprintln!("Error: 'path' command requires an algorithm");
            return Command::Help;
        };
        let algorithm = match name.parse::<PathfindingAlgorithm>() {
            Ok(algorithm) => algorithm,
            Err(e) => {
                eprintln!("Error: {e}");
                return Command::Help;
            }
        };

        let mut options = PathOptions {
            algorithm,
            start: None,
            end: None,
            barriers: Vec::new(),
            delay_ms: None,
            config_path: None,
            verbose: false,
        };

        let mut i = 3;
        while i < args.len() {
            let next = args.get(i + 1);
            match args[i].as_str() {
                "--start" => {
                    options.start = next.and_then(|s| parse_cell(s));
                    i += 2;
                }
                "--end" => {
                    options.end = next.and_then(|s| parse_cell(s));
                    i += 2;
                }
                "--barrier" => {
                    match next.and_then(|s| parse_cell(s)) {
                        Some(cell) => options.barriers.push(cell),
                        None => eprintln!("Warning: ignoring malformed --barrier"),
                    }
                    i += 2;
                }
                "--delay" => {
                    options.delay_ms = next.and_then(|s| s.parse().ok());
                    i += 2;
                }
                "--config" => {
                    options.config_path = next.map(PathBuf::from);
                    i += 2;
                }
                "-v" | "--verbose" => {
                    options.verbose = true;
                    i += 1;
                }
                _ => i += 1,
            }
        }

        Command::Path(options)
    }
}

/// Parse a comma-separated value list. Blank and non-integer entries are
/// dropped.
#[must_use]
pub fn parse_values(text: &str) -> Vec<i32> {
    text.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

/// Parse `R,C`.
#[must_use]
pub fn parse_cell(text: &str) -> Option<(usize, usize)> {
    let (row, col) = text.split_once(',')?;
    Some((row.trim().parse().ok()?, col.trim().parse().ok()?))
}
