//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per tick.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Record a tick of `dt` seconds spanning `frames` frames.
///
/// `frames` is usually 1; a driver catching up after a hitch may pass more.
pub fn update_world_time(world: &mut World, dt: f32, frames: u32) {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.elapsed += dt;
    wt.delta = dt;
    wt.frame_count += frames as u64;
    wt.frame_delta = frames;
}
