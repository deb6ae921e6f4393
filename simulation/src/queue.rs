//! Commands submitted between ticks.

use std::collections::VecDeque;

use starminer_core::Command;

/// First-in first-out buffer drained once at the start of every tick.
#[derive(Debug, Default)]
pub(crate) struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub(crate) fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    /// Removes every pending command, preserving submission order.
    pub(crate) fn take(&mut self) -> VecDeque<Command> {
        std::mem::take(&mut self.pending)
    }
}
