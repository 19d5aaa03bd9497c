//! Frame timer system.
//!
//! Each tick:
//!
//! 1. `update_frame_timers` iterates all entities with a [`FrameTimer`]
//! 2. Timers on entities whose [`Pausable`] group is halted are skipped
//! 3. The rest advance by [`WorldTime::frame_delta`] frames; their own
//!    callbacks run inside `advance`
//! 4. Every expiry triggers a [`FrameTimerEvent`]

use bevy_ecs::prelude::*;

use crate::components::frametimer::FrameTimer;
use crate::components::pausable::Pausable;
use crate::events::timer::FrameTimerEvent;
use crate::resources::pausestate::PauseState;
use crate::resources::worldtime::WorldTime;

pub fn update_frame_timers(
    world_time: Res<WorldTime>,
    pause_state: Option<Res<PauseState>>,
    mut query: Query<(Entity, &mut FrameTimer, Option<&Pausable>)>,
    mut commands: Commands,
) {
    // deltas past i32::MAX still expire every timer
    let frames = i32::try_from(world_time.frame_delta).unwrap_or(i32::MAX);
    if frames == 0 {
        return;
    }
    for (entity, mut timer, pausable) in query.iter_mut() {
        let halted = match (pause_state.as_deref(), pausable) {
            (Some(state), Some(pausable)) => state.is_halted(pausable.group),
            _ => false,
        };
        if halted {
            continue;
        }
        if timer.advance(frames) {
            commands.trigger(FrameTimerEvent {
                entity,
                looping: !timer.is_completed(),
            });
        }
    }
}
