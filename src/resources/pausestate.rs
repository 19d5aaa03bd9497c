//! Pause bookkeeping resource.
//!
//! [`PauseState`] records whether the player paused the game and which
//! scripted sequences are currently running. It is written by the pause
//! observers in [`crate::events::pause`] and read by
//! [`crate::systems::frametimer::update_frame_timers`].

use bevy_ecs::prelude::Resource;
use log::{debug, warn};
use rustc_hash::FxHashSet;

use crate::components::pausable::PauseGroup;

#[derive(Resource, Debug, Clone, Default)]
pub struct PauseState {
    user_paused: bool,
    sequences: FxHashSet<String>,
}

impl PauseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_user_paused(&mut self, paused: bool) {
        self.user_paused = paused;
    }

    pub fn is_user_paused(&self) -> bool {
        self.user_paused
    }

    /// Mark a sequence as running. Beginning a running sequence again is harmless.
    pub fn begin_sequence(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        debug!("Pause sequence '{}' started", tag);
        self.sequences.insert(tag);
    }

    /// Mark a sequence as finished. Returns `false` if it was not running.
    pub fn end_sequence(&mut self, tag: &str) -> bool {
        let removed = self.sequences.remove(tag);
        if !removed {
            warn!("Tried to end pause sequence '{}' which is not running", tag);
        }
        removed
    }

    pub fn active_sequences(&self) -> usize {
        self.sequences.len()
    }

    /// Whether entities in `group` should currently be held still.
    pub fn is_halted(&self, group: PauseGroup) -> bool {
        match group {
            PauseGroup::None => false,
            PauseGroup::User => self.user_paused,
            PauseGroup::Sequenced => self.user_paused || !self.sequences.is_empty(),
        }
    }
}
