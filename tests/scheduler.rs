use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use solar_orrery::config::RawRecord;
use solar_orrery::scheduler::{
    NullSink, RenderSink, RunState, Scheduler, SchedulerHandle, TickOutcome,
};
use solar_orrery::session::{BodySnapshot, Layout, PositionUpdate, SolarSystemSession};

fn records() -> Vec<RawRecord> {
    let planet = |name: &str, distance: &str, years: &str| {
        RawRecord::from_fields([
            ("name", name),
            ("distance", distance),
            ("radius", "3000"),
            ("length_of_year", years),
        ])
    };
    vec![
        planet("Near", "60", "0.3").with_satellites(vec![RawRecord::from_fields([
            ("name", "Pebble"),
            ("distance_from_planet", "5"),
        ])]),
        planet("Far", "400", "4"),
    ]
}

fn session() -> SolarSystemSession {
    let mut session = SolarSystemSession::new(Layout::default(), 2.0);
    session.load(&records()).expect("load");
    session
}

#[derive(Default)]
struct Frames {
    updates: Vec<PositionUpdate>,
    ticks: Vec<u64>,
    loads: Vec<usize>,
}

impl RenderSink for Frames {
    fn on_position_update(&mut self, update: &PositionUpdate) {
        self.updates.push(*update);
    }

    fn on_load(&mut self, bodies: &[BodySnapshot], _ticks: u64) {
        self.loads.push(bodies.len());
    }

    fn on_tick_end(&mut self, tick: u64) {
        self.ticks.push(tick);
    }
}

#[test]
fn each_timer_event_delivers_one_update_per_body() {
    let mut scheduler = Scheduler::new(session(), Frames::default(), Duration::ZERO);
    assert_eq!(scheduler.sink().loads, vec![3]);
    for _ in 0..4 {
        assert_eq!(scheduler.on_timer(), TickOutcome::Ticked(3));
    }
    assert_eq!(scheduler.sink().updates.len(), 12);
    assert_eq!(scheduler.sink().ticks, vec![1, 2, 3, 4]);
}

#[test]
fn paused_scheduler_delivers_nothing_and_resumes_where_it_left_off() {
    let mut reference = Scheduler::new(session(), Frames::default(), Duration::ZERO);
    for _ in 0..6 {
        reference.on_timer();
    }

    let mut scheduler = Scheduler::new(session(), Frames::default(), Duration::ZERO);
    let handle = scheduler.handle();
    for _ in 0..3 {
        scheduler.on_timer();
    }
    handle.pause();
    for _ in 0..25 {
        assert_eq!(scheduler.on_timer(), TickOutcome::Paused);
    }
    assert_eq!(scheduler.sink().updates.len(), 9);
    handle.resume();
    for _ in 0..3 {
        scheduler.on_timer();
    }

    assert_eq!(scheduler.sink().updates, reference.sink().updates);
    assert_eq!(scheduler.ticks_fired(), 6);
}

#[test]
fn stop_is_final_and_idempotent() {
    let mut scheduler = Scheduler::new(session(), Frames::default(), Duration::ZERO);
    let handle = scheduler.handle();
    scheduler.on_timer();
    handle.stop();
    handle.stop();
    handle.resume();
    handle.pause();
    assert_eq!(handle.state(), RunState::Stopped);
    for _ in 0..5 {
        assert_eq!(scheduler.on_timer(), TickOutcome::Stopped);
    }
    assert_eq!(scheduler.sink().updates.len(), 3);
    assert_eq!(scheduler.run(None), 0);
}

#[test]
fn pause_requested_from_a_sink_applies_at_the_next_tick() {
    let seen = Rc::new(RefCell::new(0usize));
    let handle = SchedulerHandle::new();

    let counter = Rc::clone(&seen);
    let control = handle.clone();
    let sink = move |_: &PositionUpdate| {
        *counter.borrow_mut() += 1;
        control.pause();
    };
    let mut scheduler = Scheduler::with_handle(session(), sink, Duration::ZERO, handle.clone());

    assert_eq!(scheduler.on_timer(), TickOutcome::Ticked(3));
    assert_eq!(*seen.borrow(), 3);
    assert!(handle.is_paused());
    assert_eq!(scheduler.on_timer(), TickOutcome::Paused);
    assert_eq!(*seen.borrow(), 3);
}

#[test]
fn reload_announces_the_new_bodies() {
    let mut scheduler = Scheduler::new(session(), Frames::default(), Duration::ZERO);
    let summary = scheduler.reload(&records()[1..]).expect("reload");
    assert_eq!(summary.planets, 1);
    assert_eq!(scheduler.sink().loads, vec![3, 1]);
    assert_eq!(scheduler.on_timer(), TickOutcome::Ticked(1));
}

#[test]
fn run_honours_the_tick_limit() {
    let mut scheduler = Scheduler::new(session(), NullSink, Duration::from_millis(1));
    assert_eq!(scheduler.run(Some(4)), 4);
    assert_eq!(scheduler.session().ticks(), 4);
    assert_eq!(scheduler.state(), RunState::Running);
}

/// Pauses the animation on its first update, as a hover would, and lifts the pause after
/// a couple of idle timer events.
struct Tooltip {
    control: SchedulerHandle,
    updates: usize,
    idle: usize,
    paused_once: bool,
}

impl RenderSink for Tooltip {
    fn on_position_update(&mut self, _update: &PositionUpdate) {
        self.updates += 1;
        if !self.paused_once {
            self.paused_once = true;
            self.control.pause();
        }
    }

    fn on_idle(&mut self, handle: &SchedulerHandle) {
        self.idle += 1;
        if self.idle == 2 {
            handle.resume();
        }
    }
}

#[test]
fn run_resumes_after_a_sink_lifts_its_own_pause() {
    let handle = SchedulerHandle::new();
    let sink = Tooltip {
        control: handle.clone(),
        updates: 0,
        idle: 0,
        paused_once: false,
    };
    let mut scheduler = Scheduler::with_handle(session(), sink, Duration::from_millis(1), handle);

    assert_eq!(scheduler.run(Some(3)), 3);
    assert_eq!(scheduler.sink().idle, 2);
    assert_eq!(scheduler.sink().updates, 9);
    assert_eq!(scheduler.session().ticks(), 3);
    assert_eq!(scheduler.state(), RunState::Running);
}

#[test]
fn a_sink_can_stop_a_paused_run() {
    struct Quitter(SchedulerHandle);

    impl RenderSink for Quitter {
        fn on_position_update(&mut self, _update: &PositionUpdate) {
            self.0.pause();
        }

        fn on_idle(&mut self, handle: &SchedulerHandle) {
            handle.stop();
        }
    }

    let handle = SchedulerHandle::new();
    let mut scheduler =
        Scheduler::with_handle(session(), Quitter(handle.clone()), Duration::ZERO, handle);
    assert_eq!(scheduler.run(None), 1);
    assert_eq!(scheduler.state(), RunState::Stopped);
}
