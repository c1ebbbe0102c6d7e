//! # algoviz
//!
//! Steppable, deterministic engine for visualizing sorting and grid
//! pathfinding algorithms.
//!
//! Every algorithm runs as a sequence of frames. Between frames the
//! published state (a row of bars, or a grid of cells) is a complete,
//! consistent snapshot that observers can render:
//! - Five sorting algorithms annotate bars as they compare and exchange
//! - Three grid searches annotate cells as they explore and backtrack
//! - One run at a time; interactive edits are rejected while it plays
//! - Pacing is a caller-supplied [`engine::Pacer`], so tests run instantly
//!
//! ## Example
//!
//! ```rust
//! use algoviz::prelude::*;
//!
//! let mut session = SortingSession::new();
//! session.set_input(&[5, 2, 9, 1, 7]);
//! session.start_sort(SortAlgorithm::Bubble, std::time::Duration::ZERO);
//! session.run_to_completion(InstantPacer).expect("guards hold");
//!
//! let values: Vec<i32> = session.bars().iter().map(|b| b.value).collect();
//! assert_eq!(values, vec![1, 2, 5, 7, 9]);
//! assert_eq!(session.log().next(), Some("All elements sorted"));
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::needless_range_loop,   // Sometimes range loops are clearer
    clippy::manual_midpoint,       // Midpoints are written the way the algorithms are taught
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod pathfinding;
pub mod sorting;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{VizConfig, VizConfigBuilder};
    pub use crate::engine::{
        Frame, IgnoreReason, InstantPacer, Outcome, Pacer, RecordingPacer, SleepPacer,
    };
    pub use crate::error::{VizError, VizResult};
    pub use crate::pathfinding::{
        GridMode, Node, NodeRole, PathfindingAlgorithm, PathfindingSession, VisitState,
    };
    pub use crate::sorting::{Bar, BarState, SortAlgorithm, SortingSession};
}

/// Re-export for public API
pub use engine::Outcome;
pub use error::{VizError, VizResult};
