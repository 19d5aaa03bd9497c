//! Systems.
//!
//! Submodules overview
//! - [`frametimer`] – advance frame timers and emit expiry events
//! - [`time`] – update simulation time and frame delta

pub mod frametimer;
pub mod time;
