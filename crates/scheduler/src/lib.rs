//! Drives a [`SolarSystemSession`] on a fixed period and forwards position updates to a
//! rendering collaborator.

pub mod control;
pub mod sink;

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use orrery_config::{OrreryConfig, RawRecord};
use orrery_session::{LoadError, LoadSummary, SolarSystemSession};

pub use control::{RunState, SchedulerHandle};
pub use sink::{NullSink, RenderSink};

/// What a single timer event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A tick ran and produced this many position updates.
    Ticked(usize),
    Paused,
    Stopped,
}

/// Owns the session and the sink. Ticks never overlap: each one runs to completion on the
/// calling thread before the next timer event is looked at.
pub struct Scheduler<S: RenderSink> {
    session: SolarSystemSession,
    sink: S,
    handle: SchedulerHandle,
    tick_period: Duration,
    ticks_fired: u64,
}

impl<S: RenderSink> Scheduler<S> {
    /// Wrap a session. The sink is told about the bodies already loaded.
    pub fn new(session: SolarSystemSession, sink: S, tick_period: Duration) -> Self {
        Self::with_handle(session, sink, tick_period, SchedulerHandle::new())
    }

    /// Like [`Scheduler::new`], but controlled by an existing handle. Lets a sink hold the
    /// handle of the scheduler that drives it.
    pub fn with_handle(
        session: SolarSystemSession,
        mut sink: S,
        tick_period: Duration,
        handle: SchedulerHandle,
    ) -> Self {
        sink.on_load(&session.snapshots(), session.ticks());
        Self {
            session,
            sink,
            handle,
            tick_period,
            ticks_fired: 0,
        }
    }

    pub fn from_config(session: SolarSystemSession, sink: S, config: &OrreryConfig) -> Self {
        Self::new(session, sink, Duration::from_millis(config.tick_period_ms))
    }

    /// A control handle sharing this scheduler's run state.
    pub fn handle(&self) -> SchedulerHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> RunState {
        self.handle.state()
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Ticks that actually advanced the session.
    pub fn ticks_fired(&self) -> u64 {
        self.ticks_fired
    }

    pub fn session(&self) -> &SolarSystemSession {
        &self.session
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn into_parts(self) -> (SolarSystemSession, S) {
        (self.session, self.sink)
    }

    /// Handle one timer event. Run state is read once, before the tick starts.
    pub fn on_timer(&mut self) -> TickOutcome {
        match self.handle.state() {
            RunState::Stopped => {
                debug!("timer event after stop discarded");
                TickOutcome::Stopped
            }
            RunState::Paused => {
                self.sink.on_idle(&self.handle);
                TickOutcome::Paused
            }
            RunState::Running => {
                let updates = self.session.tick();
                for update in &updates {
                    self.sink.on_position_update(update);
                }
                self.ticks_fired += 1;
                self.sink.on_tick_end(self.session.ticks());
                TickOutcome::Ticked(updates.len())
            }
        }
    }

    /// Fire timer events every `tick_period` until stopped, or until `max_ticks` ticks
    /// have advanced the session. Paused periods keep polling without advancing and hand
    /// the sink [`RenderSink::on_idle`], which is the only place a sink-driven pause can be
    /// lifted while this loop owns the thread.
    pub fn run(&mut self, max_ticks: Option<u64>) -> u64 {
        let start = self.ticks_fired;
        info!(period_ms = self.tick_period.as_millis() as u64, ?max_ticks, "animation started");
        loop {
            if max_ticks.is_some_and(|max| self.ticks_fired - start >= max) {
                break;
            }
            let now = Instant::now();
            if self.on_timer() == TickOutcome::Stopped {
                break;
            }
            let elapsed = now.elapsed();
            if elapsed < self.tick_period {
                thread::sleep(self.tick_period - elapsed);
            }
        }
        let fired = self.ticks_fired - start;
        info!(ticks = fired, "animation finished");
        fired
    }

    /// Replace every body and announce the new set to the sink. On failure the sink sees
    /// an empty scene.
    pub fn reload(&mut self, records: &[RawRecord]) -> Result<LoadSummary, LoadError> {
        let result = self.session.load(records);
        self.sink.on_load(&self.session.snapshots(), self.session.ticks());
        result
    }
}
