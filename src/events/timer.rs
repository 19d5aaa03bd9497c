//! Frame timer expiration events.
//!
//! When a [`FrameTimer`](crate::components::frametimer::FrameTimer) component
//! reaches zero, after its own callback has run, a [`FrameTimerEvent`] is
//! triggered for the entity. Observers can subscribe to this event to react
//! from outside the timer, with full ECS access.
//!
//! # Example
//!
//! ```ignore
//! commands.add_observer(|trigger: On<FrameTimerEvent>, mut commands: Commands| {
//!     if !trigger.event().looping {
//!         commands.entity(trigger.event().entity).despawn();
//!     }
//! });
//! ```
//!
//! # Related
//!
//! - [`crate::components::frametimer::FrameTimer`] – the timer component
//! - [`crate::systems::frametimer::update_frame_timers`] – the system that emits these events

use bevy_ecs::prelude::*;

/// Event emitted each time a frame timer expires.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTimerEvent {
    /// The entity whose timer expired.
    pub entity: Entity,
    /// Whether the timer is still armed: it looped and was not invalidated
    /// by its callback.
    pub looping: bool,
}
