//! ECS components for entities.
//!
//! Submodules overview:
//! - [`frametimer`] – frame-counted countdown with completion callback and looping
//! - [`pausable`] – pause group membership consulted by the frame timer system

pub mod frametimer;
pub mod pausable;
