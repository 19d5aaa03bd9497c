//! Frame-driven gameplay support library.
//!
//! Frame-counted timers, a host play-mode classifier, pause broadcasts and
//! persisted display options, exposed as `bevy_ecs` components, resources,
//! systems and events.

pub mod components;
pub mod events;
pub mod resources;
pub mod systems;
