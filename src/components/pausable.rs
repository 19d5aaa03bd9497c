//! Pause group membership.
//!
//! Entities carrying [`Pausable`] stop advancing their frame timers while the
//! [`PauseState`](crate::resources::pausestate::PauseState) reports their
//! group as halted. Entities without the component are never halted.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Which pause broadcasts an entity responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PauseGroup {
    /// Never paused (pause menu and the like).
    #[default]
    None = 0,
    /// Paused during transitions and scripted sequences, and also by a user pause.
    Sequenced = 2,
    /// Paused when the player pauses the game.
    User = 4,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pausable {
    pub group: PauseGroup,
}

impl Pausable {
    pub fn new(group: PauseGroup) -> Self {
        Pausable { group }
    }
}
