//! ECS resources made available to systems.
//!
//! Overview
//! - `displayoptions` – INI-backed fullscreen/resolution/vsync settings
//! - `pausestate` – user pause flag and running pause sequences
//! - `playmode` – host play-mode classifier and its transition table
//! - `worldtime` – simulation time and per-tick frame delta
pub mod displayoptions;
pub mod pausestate;
pub mod playmode;
pub mod worldtime;
