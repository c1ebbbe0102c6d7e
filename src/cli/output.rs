//! CLI output formatting.
//!
//! Formatting is kept separate from printing so tests can inspect it.

use std::fmt::Write as _;

use crate::engine::Frame;
use crate::sorting::{Bar, BarState};

/// Print version information.
pub fn print_version() {
    match option_env!("ALGOVIZ_GIT_HASH") {
        Some(hash) => println!("algoviz {} ({hash})", env!("CARGO_PKG_VERSION")),
        None => println!("algoviz {}", env!("CARGO_PKG_VERSION")),
    }
}

/// Print help message.
pub fn print_help() {
    println!(
        r"algoviz - step-by-step sorting and pathfinding visualizer

USAGE:
    algoviz <COMMAND> [OPTIONS]

COMMANDS:
    sort <ALGORITHM> <v1,v2,...>    Sort the given values
        --random <N>                Sort N reproducible random values instead
        --seed <S>                  Seed for --random (default: from config)
        --delay <MS>                Delay per frame (default: 500)
        --config <FILE>             Load settings from a YAML file
        -v, --verbose               Print the bars after every frame

        ALGORITHM: bubble | selection | insertion | merge | quick

    path <ALGORITHM>                Search the grid from Start to End
        --start <R,C>               Start cell
        --end <R,C>                 End cell
        --barrier <R,C>             Toggle a barrier (repeatable)
        --delay <MS>                Delay per frame (default: 80)
        --config <FILE>             Load settings from a YAML file
        -v, --verbose               Print the grid after every frame

        ALGORITHM: bfs | dfs | dijkstra

    help                            Show this help message
    version                         Show version information

EXAMPLES:
    algoviz sort bubble 5,2,9,1,7 --delay 0
    algoviz sort merge --random 20 --seed 7
    algoviz path bfs --start 0,0 --end 9,9 --barrier 4,4 --barrier 4,5

ENVIRONMENT:
    ALGOVIZ_LOG                     Tracing filter (e.g. debug, algoviz=trace)
"
    );
}

/// One line per bar: `value` plus a marker for its annotation.
#[must_use]
pub fn format_bars(bars: &[Bar]) -> String {
    let mut out = String::new();
    for (i, bar) in bars.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let marker = match bar.state {
            BarState::Default => "",
            BarState::Comparing => "?",
            BarState::Swapping => "~",
            BarState::Pivot => "^",
            BarState::Sorted => "*",
        };
        let _ = write!(out, "{}{marker}", bar.value);
    }
    out
}

/// Log lines of a frame, oldest first.
#[must_use]
pub fn format_frame_log<C: crate::engine::Cell>(frame: &Frame<C>) -> String {
    let mut out = String::new();
    for line in &frame.log_lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bars_markers() {
        let mut bars = Bar::from_values(&[3, 1, 2]);
        bars[0].state = BarState::Comparing;
        bars[2].state = BarState::Sorted;
        assert_eq!(format_bars(&bars), "3? 1 2*");
        assert_eq!(format_bars(&[]), "");
    }

    #[test]
    fn test_print_functions_do_not_panic() {
        print_help();
        print_version();
    }
}
