//! Start/End uniqueness guard.

use crate::engine::SnapshotGuard;
use crate::error::{VizError, VizResult};

use super::grid::{Node, NodeRole};

/// Ensures no snapshot holds more than one Start or more than one End.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalGuard;

impl SnapshotGuard<Node> for TerminalGuard {
    fn check(&mut self, frame: u64, cells: &[Node]) -> VizResult<()> {
        for (role, name) in [(NodeRole::Start, "Start"), (NodeRole::End, "End")] {
            let count = cells.iter().filter(|n| n.role == role).count();
            if count > 1 {
                return Err(VizError::DuplicateTerminal {
                    role: name,
                    count,
                    frame,
                });
            }
        }
        Ok(())
    }
}
