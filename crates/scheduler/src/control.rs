//! Shared pause/resume/stop state.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    Paused,
    Stopped,
}

/// Cloneable control for a [`Scheduler`](crate::Scheduler). Safe to call from inside a
/// sink callback; the scheduler reads the state at the start of the next tick.
///
/// Calls that make no sense in the current state are ignored.
#[derive(Debug, Clone, Default)]
pub struct SchedulerHandle {
    state: Rc<Cell<RunState>>,
}

impl SchedulerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RunState {
        self.state.get()
    }

    pub fn is_paused(&self) -> bool {
        self.state() == RunState::Paused
    }

    pub fn pause(&self) {
        self.transition(RunState::Running, RunState::Paused, "pause");
    }

    pub fn resume(&self) {
        self.transition(RunState::Paused, RunState::Running, "resume");
    }

    /// Pause when running, resume when paused.
    pub fn toggle(&self) {
        match self.state() {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
            RunState::Stopped => debug!("toggle ignored, scheduler stopped"),
        }
    }

    /// Final. Later calls of any kind are no-ops.
    pub fn stop(&self) {
        match self.state() {
            RunState::Stopped => debug!("stop ignored, already stopped"),
            _ => {
                self.state.set(RunState::Stopped);
                debug!("scheduler stopped");
            }
        }
    }

    fn transition(&self, from: RunState, to: RunState, action: &str) {
        let current = self.state();
        if current == from {
            self.state.set(to);
            debug!(action, "scheduler {:?}", to);
        } else {
            debug!(action, ?current, "ignored");
        }
    }
}
