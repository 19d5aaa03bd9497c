//! Frameclock headless driver.
//!
//! Runs the frame-driven gameplay support layer without a window:
//!
//! 1. Load display options from the INI file and apply any requested changes
//! 2. Build the ECS world, register observers, spawn a few frame timers
//! 3. Tick the world `--frames` times while replaying a scripted host
//!    lifecycle (about to play, playing, paused, about to stop, stopped) and a
//!    user pause window
//! 4. Log timer expiries and play-mode transitions
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --frames 300 --timer-frames 30
//! cargo run -- --change-option resolution --direction -1
//! cargo run -- --dump-transitions
//! ```

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use clap::Parser;
use frameclock::components::frametimer::FrameTimer;
use frameclock::components::pausable::{Pausable, PauseGroup};
use frameclock::events::options::{
    ChangeOptionEvent, OptionsValueChangedEvent, change_option_observer,
};
use frameclock::events::pause::{PauseEvent, ResumeEvent, pause_observer, resume_observer};
use frameclock::events::playmode::{HostStatusEvent, PlayModeChangedEvent, host_status_observer};
use frameclock::events::timer::FrameTimerEvent;
use frameclock::resources::displayoptions::{DisplayOptions, OptionKey};
use frameclock::resources::pausestate::PauseState;
use frameclock::resources::playmode::{HostFlags, PLAY_MODE_TRANSITIONS, PlayModeClassifier};
use frameclock::resources::worldtime::WorldTime;
use frameclock::systems::frametimer::update_frame_timers;
use frameclock::systems::time::update_world_time;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

const FRAME_SECONDS: f32 = 1.0 / 60.0;
const INTRO_SEQUENCE: &str = "intro";

/// Frameclock headless driver
#[derive(Parser)]
#[command(version, about = "Drives frame timers and the play-mode classifier without a window.")]
struct Cli {
    /// Display options INI file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Duration of the demo timers in frames.
    #[arg(long, default_value_t = 60)]
    timer_frames: i32,

    /// Step a display option before running (FULLSCREEN, RESOLUTION or VSYNC).
    /// May be given several times.
    #[arg(long = "change-option", value_name = "KEY")]
    change_options: Vec<OptionKey>,

    /// Step direction used by --change-option.
    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    direction: i32,

    /// Print the play-mode transition table as JSON and exit.
    #[arg(long)]
    dump_transitions: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: print the transition table and quit
    if cli.dump_transitions {
        let rows: Vec<serde_json::Value> = PLAY_MODE_TRANSITIONS
            .iter()
            .map(|rule| {
                serde_json::json!({
                    "key": rule.flags.composite_key(),
                    "flags": rule.flags,
                    "state": rule.state,
                })
            })
            .collect();
        match serde_json::to_string_pretty(&rows) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let mut options = DisplayOptions::new().with_path(&cli.config);
    if let Err(e) = options.load_from_file() {
        warn!("Config file not found or invalid, using defaults: {}", e);
    }

    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(PauseState::new());
    world.insert_resource(options);

    let transitions = Arc::new(AtomicU32::new(0));
    let mut classifier = PlayModeClassifier::new(false);
    let transitions_clone = transitions.clone();
    classifier.subscribe(move |_, _| {
        transitions_clone.fetch_add(1, Ordering::Relaxed);
    });
    world.insert_resource(classifier);

    world.add_observer(host_status_observer);
    world.add_observer(pause_observer);
    world.add_observer(resume_observer);
    world.add_observer(change_option_observer);
    world.add_observer(|trigger: On<PlayModeChangedEvent>| {
        let event = trigger.event();
        info!("Play mode: {:?} -> {:?}", event.previous, event.next);
    });
    world.add_observer(
        |trigger: On<OptionsValueChangedEvent>, options: Res<DisplayOptions>| {
            let key = trigger.event().key;
            info!("{} = {}", key, options.display_suffix(key));
        },
    );
    world.add_observer(|trigger: On<FrameTimerEvent>| {
        let event = trigger.event();
        debug!(
            "Timer on {:?} expired (looping: {})",
            event.entity, event.looping
        );
    });
    world.flush();

    for key in &cli.change_options {
        world.trigger(ChangeOptionEvent {
            key: *key,
            dir: cli.direction,
        });
    }
    world.flush();

    let loop_cycles = Arc::new(AtomicU32::new(0));
    let loop_cycles_clone = loop_cycles.clone();
    world.spawn((
        FrameTimer::new(cli.timer_frames)
            .looping(true)
            .with_callback(move |_: &mut FrameTimer| {
                loop_cycles_clone.fetch_add(1, Ordering::Relaxed);
            }),
        Pausable::new(PauseGroup::User),
    ));
    world.spawn((
        FrameTimer::new(cli.timer_frames.saturating_mul(3)).with_callback(
            |timer: &mut FrameTimer| {
                info!("One-shot timer of {} frames fired", timer.total_frames())
            },
        ),
        Pausable::new(PauseGroup::Sequenced),
    ));

    let mut schedule = Schedule::default();
    schedule.add_systems(update_frame_timers);

    let total = cli.frames;
    let intro_end = fraction_of(total, 1);
    let user_pause_start = fraction_of(total, 6);
    let user_pause_end = fraction_of(total, 7);
    let mut last_flags: Option<HostFlags> = None;
    for frame in 0..total {
        let flags = scripted_host_flags(frame, total);
        if last_flags != Some(flags) {
            world.trigger(HostStatusEvent { flags });
            last_flags = Some(flags);
        }

        if frame == 0 {
            world.trigger(PauseEvent::sequence(INTRO_SEQUENCE));
        }
        if frame == intro_end {
            world.trigger(ResumeEvent::sequence(INTRO_SEQUENCE));
        }
        if frame == user_pause_start {
            world.trigger(PauseEvent::user());
        }
        if frame == user_pause_end {
            world.trigger(ResumeEvent::user());
        }
        world.flush();

        update_world_time(&mut world, FRAME_SECONDS, 1);
        schedule.run(&mut world);
    }

    let time = world.resource::<WorldTime>();
    info!(
        "Simulated {} frames ({:.2}s): {} looping cycles, {} play mode transitions",
        time.frame_count,
        time.elapsed,
        loop_cycles.load(Ordering::Relaxed),
        transitions.load(Ordering::Relaxed)
    );
}

/// `tenths`/10 of `total`, without overflowing on long runs.
fn fraction_of(total: u32, tenths: u32) -> u32 {
    (total as u64 * tenths as u64 / 10) as u32
}

/// Host status for `frame` in a run of `total` frames.
fn scripted_host_flags(frame: u32, total: u32) -> HostFlags {
    let about_to_play = HostFlags::new(false, true, false, false, false);
    let playing = HostFlags::new(false, true, true, false, false);
    let paused = HostFlags::new(false, true, true, true, false);
    let about_to_stop = HostFlags::new(false, false, true, false, false);
    let stopped = HostFlags::new(false, false, false, false, false);

    if frame == 0 {
        about_to_play
    } else if frame + 1 >= total {
        stopped
    } else if frame + 2 >= total {
        about_to_stop
    } else if frame >= fraction_of(total, 4) && frame < fraction_of(total, 5) {
        paused
    } else {
        playing
    }
}
