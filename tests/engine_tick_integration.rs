//! Engine tick integration tests for frame timers and pause groups.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use frameclock::components::frametimer::FrameTimer;
use frameclock::components::pausable::{Pausable, PauseGroup};
use frameclock::events::pause::{PauseEvent, ResumeEvent, pause_observer, resume_observer};
use frameclock::events::timer::FrameTimerEvent;
use frameclock::resources::pausestate::PauseState;
use frameclock::resources::worldtime::WorldTime;
use frameclock::systems::frametimer::update_frame_timers;
use frameclock::systems::time::update_world_time;

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(PauseState::new());
    world.add_observer(pause_observer);
    world.add_observer(resume_observer);
    world.flush();
    world
}

fn tick_timers(world: &mut World, frames: u32) {
    update_world_time(world, frames as f32 / 60.0, frames);
    let mut schedule = Schedule::default();
    schedule.add_systems(update_frame_timers);
    schedule.run(world);
}

fn counting_timer(frames: i32) -> (Arc<AtomicU32>, FrameTimer) {
    let fired = Arc::new(AtomicU32::new(0));
    let fired_clone = fired.clone();
    let timer = FrameTimer::new(frames).with_callback(move |_: &mut FrameTimer| {
        fired_clone.fetch_add(1, Ordering::SeqCst);
    });
    (fired, timer)
}

fn record_timer_events(world: &mut World) -> Arc<Mutex<Vec<FrameTimerEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();
    world.add_observer(move |trigger: On<FrameTimerEvent>| {
        events_clone.lock().unwrap().push(*trigger.event());
    });
    world.flush();
    events
}

#[test]
fn update_world_time_tracks_frames() {
    let mut world = make_world();
    update_world_time(&mut world, 0.5, 1);
    update_world_time(&mut world, 0.25, 3);
    let time = world.resource::<WorldTime>();
    assert_eq!(time.frame_count, 4);
    assert_eq!(time.frame_delta, 3);
    assert!((time.elapsed - 0.75).abs() < 1e-6);
    assert!((time.delta - 0.25).abs() < 1e-6);
}

#[test]
fn one_shot_timer_fires_once_and_emits_event() {
    let mut world = make_world();
    let events = record_timer_events(&mut world);
    let (fired, timer) = counting_timer(3);
    let entity = world.spawn(timer).id();

    for _ in 0..10 {
        tick_timers(&mut world, 1);
    }

    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert!(world.get::<FrameTimer>(entity).unwrap().is_completed());
    assert_eq!(
        *events.lock().unwrap(),
        vec![FrameTimerEvent {
            entity,
            looping: false
        }]
    );
}

#[test]
fn looping_timer_emits_every_cycle() {
    let mut world = make_world();
    let events = record_timer_events(&mut world);
    let (fired, timer) = counting_timer(5);
    let entity = world.spawn(timer.looping(true)).id();

    for _ in 0..20 {
        tick_timers(&mut world, 1);
    }

    assert_eq!(fired.load(Ordering::SeqCst), 4);
    assert_eq!(events.lock().unwrap().len(), 4);
    assert!(events.lock().unwrap().iter().all(|e| e.looping));
    let timer = world.get::<FrameTimer>(entity).unwrap();
    assert_eq!(timer.frames_remaining(), 5);
    assert!(!timer.is_completed());
}

#[test]
fn multi_frame_tick_advances_by_frame_delta() {
    let mut world = make_world();
    let entity = world.spawn(FrameTimer::new(10)).id();
    tick_timers(&mut world, 4);
    assert_eq!(world.get::<FrameTimer>(entity).unwrap().frames_remaining(), 6);
}

#[test]
fn zero_frame_tick_does_nothing() {
    let mut world = make_world();
    let (fired, timer) = counting_timer(0);
    world.spawn(timer);
    tick_timers(&mut world, 0);
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    tick_timers(&mut world, 1);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn invalidated_timer_never_fires() {
    let mut world = make_world();
    let events = record_timer_events(&mut world);
    let (fired, timer) = counting_timer(2);
    let entity = world.spawn(timer.looping(true)).id();

    tick_timers(&mut world, 1);
    world.get_mut::<FrameTimer>(entity).unwrap().invalidate();
    for _ in 0..10 {
        tick_timers(&mut world, 1);
    }

    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn user_pause_halts_user_and_sequenced_groups() {
    let mut world = make_world();
    let user = world
        .spawn((FrameTimer::new(10), Pausable::new(PauseGroup::User)))
        .id();
    let sequenced = world
        .spawn((FrameTimer::new(10), Pausable::new(PauseGroup::Sequenced)))
        .id();
    let menu = world
        .spawn((FrameTimer::new(10), Pausable::new(PauseGroup::None)))
        .id();
    let plain = world.spawn(FrameTimer::new(10)).id();

    world.trigger(PauseEvent::user());
    world.flush();
    tick_timers(&mut world, 2);

    let remaining =
        |world: &World, e: Entity| world.get::<FrameTimer>(e).unwrap().frames_remaining();
    assert_eq!(remaining(&world, user), 10);
    assert_eq!(remaining(&world, sequenced), 10);
    assert_eq!(remaining(&world, menu), 8);
    assert_eq!(remaining(&world, plain), 8);

    world.trigger(ResumeEvent::user());
    world.flush();
    tick_timers(&mut world, 2);
    assert_eq!(remaining(&world, user), 8);
    assert_eq!(remaining(&world, sequenced), 8);
}

#[test]
fn sequence_pause_halts_only_sequenced_group() {
    let mut world = make_world();
    let user = world
        .spawn((FrameTimer::new(10), Pausable::new(PauseGroup::User)))
        .id();
    let sequenced = world
        .spawn((FrameTimer::new(10), Pausable::new(PauseGroup::Sequenced)))
        .id();

    world.trigger(PauseEvent::sequence("intro"));
    world.trigger(PauseEvent::sequence("dialogue"));
    world.flush();
    tick_timers(&mut world, 1);

    world.trigger(ResumeEvent::sequence("intro"));
    world.flush();
    tick_timers(&mut world, 1);

    world.trigger(ResumeEvent::sequence("dialogue"));
    world.flush();
    tick_timers(&mut world, 1);

    assert_eq!(world.get::<FrameTimer>(user).unwrap().frames_remaining(), 7);
    assert_eq!(world.get::<FrameTimer>(sequenced).unwrap().frames_remaining(), 9);
}

#[test]
fn halted_group_keeps_timer_own_pause_flag() {
    let mut world = make_world();
    let entity = world
        .spawn((FrameTimer::new(3), Pausable::new(PauseGroup::User)))
        .id();
    world.trigger(PauseEvent::user());
    world.flush();
    tick_timers(&mut world, 1);
    let timer = world.get::<FrameTimer>(entity).unwrap();
    assert!(!timer.is_paused());
    assert!(timer.is_running());
}

#[test]
fn pause_observer_inserts_missing_state() {
    let mut world = World::new();
    world.add_observer(pause_observer);
    world.flush();
    world.trigger(PauseEvent::user());
    world.flush();
    assert!(world.resource::<PauseState>().is_user_paused());
}

#[test]
fn callback_restart_in_world_keeps_timer_alive() {
    let mut world = make_world();
    let events = record_timer_events(&mut world);
    let entity = world
        .spawn(FrameTimer::new(2).with_callback(|t: &mut FrameTimer| t.reset_and_start_to(3)))
        .id();

    for _ in 0..5 {
        tick_timers(&mut world, 1);
    }

    let timer = world.get::<FrameTimer>(entity).unwrap();
    assert!(!timer.is_completed());
    assert_eq!(timer.total_frames(), 3);
    assert_eq!(events.lock().unwrap().len(), 2);
}

#[test]
fn huge_frame_delta_expires_timer() {
    let mut world = make_world();
    let events = record_timer_events(&mut world);
    let (fired, timer) = counting_timer(10);
    let entity = world.spawn(timer).id();

    tick_timers(&mut world, 3_000_000_000);

    let timer = world.get::<FrameTimer>(entity).unwrap();
    assert!(timer.is_completed());
    assert_eq!(timer.frames_remaining(), 0);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(events.lock().unwrap().len(), 1);
}

#[test]
fn looping_timer_invalidated_by_callback_reports_not_looping() {
    let mut world = make_world();
    let events = record_timer_events(&mut world);
    let entity = world
        .spawn(
            FrameTimer::new(2)
                .looping(true)
                .with_callback(|t: &mut FrameTimer| t.invalidate()),
        )
        .id();

    for _ in 0..4 {
        tick_timers(&mut world, 1);
    }

    assert!(world.get::<FrameTimer>(entity).unwrap().is_completed());
    assert_eq!(
        *events.lock().unwrap(),
        vec![FrameTimerEvent {
            entity,
            looping: false
        }]
    );
}
