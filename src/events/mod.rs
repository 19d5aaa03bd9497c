//! Event types and observers.
//!
//! Events provide a decoupled way for systems and game code to communicate.
//!
//! Submodules:
//! - [`options`] – display option change requests and change notifications
//! - [`pause`] – pause/resume broadcasts for pause groups and scripted sequences
//! - [`playmode`] – host status samples and play-mode transitions
//! - [`timer`] – frame timer expiry notifications
pub mod options;
pub mod pause;
pub mod playmode;
pub mod timer;
