//! The rendering collaborator contract.

use orrery_session::{BodySnapshot, PositionUpdate};

use crate::control::SchedulerHandle;

/// Receives the output of every tick. Only `on_position_update` is required.
pub trait RenderSink {
    /// Called once per body per tick, planets before their satellites.
    fn on_position_update(&mut self, update: &PositionUpdate);

    /// Called when a body set is installed, including the empty set after a failed load.
    /// `ticks` is how many ticks the session had already applied, so the next tick is
    /// `ticks + 1`.
    fn on_load(&mut self, _bodies: &[BodySnapshot], _ticks: u64) {}

    /// Called after the last update of `tick`.
    fn on_tick_end(&mut self, _tick: u64) {}

    /// Called on every timer event that finds the scheduler paused. A sink that paused the
    /// scheduler resumes (or stops) it from here.
    fn on_idle(&mut self, _handle: &SchedulerHandle) {}
}

impl<F> RenderSink for F
where
    F: FnMut(&PositionUpdate),
{
    fn on_position_update(&mut self, update: &PositionUpdate) {
        self(update)
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn on_position_update(&mut self, _update: &PositionUpdate) {}
}
