//! Shared step/run infrastructure.
//!
//! Both engines follow one pattern:
//! - an algorithm records its transitions through a [`StepEmitter`]
//! - a [`Run`] replays them frame by frame into a [`SnapshotStore`]
//! - a [`RunController`] keeps runs single-flight
//! - a [`Pacer`] realizes the delay between frames
//! - [`SnapshotGuard`]s stop a run on the first broken invariant

pub mod cell;
pub mod emitter;
pub mod guard;
pub mod pacer;
pub mod rng;
pub mod run;
pub mod step;
pub mod store;

pub use cell::Cell;
pub use emitter::StepEmitter;
pub use guard::{GuardConfig, MultisetGuard, SnapshotGuard};
pub use pacer::{InstantPacer, Pacer, RecordingPacer, SleepPacer};
pub use rng::VizRng;
pub use run::{IgnoreReason, Outcome, Run, RunController, RunGate, RunSummary};
pub use step::{Delta, Frame, Step};
pub use store::{Change, ObserverId, SnapshotStore};
