//! CLI module for algoviz.
//!
//! This module contains all CLI logic extracted from main.rs to enable
//! full test coverage. The entry point `run_cli` can be called from main.rs
//! with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{parse_cell, parse_values, Args, Command, PathOptions, SortInput, SortOptions};
pub use commands::{path_report, resolve_input, run_cli, run_path, run_sort, sort_report};
pub use output::{format_bars, format_frame_log, print_help, print_version};
