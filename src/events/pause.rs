//! Pause and resume broadcasts.
//!
//! Emitting a [`PauseEvent`] or [`ResumeEvent`] updates the [`PauseState`]
//! resource. A user pause halts every entity in the
//! [`PauseGroup::User`] and [`PauseGroup::Sequenced`] groups; a sequence pause
//! (transitions, scripted sequences) halts only [`PauseGroup::Sequenced`]
//! entities and is identified by a tag so overlapping sequences can end
//! independently.
//!
//! ```ignore
//! commands.trigger(PauseEvent::sequence("intro"));
//! // ...
//! commands.trigger(ResumeEvent::sequence("intro"));
//! ```
use crate::components::pausable::PauseGroup;
use crate::resources::pausestate::PauseState;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct PauseEvent {
    pub group: PauseGroup,
    pub tag: Option<String>,
}

impl PauseEvent {
    /// The player paused the game.
    pub fn user() -> Self {
        PauseEvent {
            group: PauseGroup::User,
            tag: None,
        }
    }

    /// A transition or scripted sequence started.
    pub fn sequence(tag: impl Into<String>) -> Self {
        PauseEvent {
            group: PauseGroup::Sequenced,
            tag: Some(tag.into()),
        }
    }
}

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ResumeEvent {
    pub group: PauseGroup,
    pub tag: Option<String>,
}

impl ResumeEvent {
    /// The player resumed the game.
    pub fn user() -> Self {
        ResumeEvent {
            group: PauseGroup::User,
            tag: None,
        }
    }

    /// A transition or scripted sequence finished.
    pub fn sequence(tag: impl Into<String>) -> Self {
        ResumeEvent {
            group: PauseGroup::Sequenced,
            tag: Some(tag.into()),
        }
    }
}

/// Observer that records a pause in [`PauseState`], inserting it if missing.
pub fn pause_observer(
    trigger: On<PauseEvent>,
    mut commands: Commands,
    pause_state: Option<ResMut<PauseState>>,
) {
    let event = trigger.event();
    let Some(mut pause_state) = pause_state else {
        let mut state = PauseState::new();
        apply_pause(&mut state, event);
        commands.insert_resource(state);
        return;
    };
    apply_pause(&mut pause_state, event);
}

/// Observer that records a resume in [`PauseState`].
pub fn resume_observer(trigger: On<ResumeEvent>, pause_state: Option<ResMut<PauseState>>) {
    let event = trigger.event();
    let Some(mut pause_state) = pause_state else {
        debug!("ResumeEvent {:?} with nothing paused", event.group);
        return;
    };
    match event.group {
        PauseGroup::None => debug!("Resume for PauseGroup::None ignored"),
        PauseGroup::User => {
            info!("User resume");
            pause_state.set_user_paused(false);
        }
        PauseGroup::Sequenced => {
            pause_state.end_sequence(event.tag.as_deref().unwrap_or_default());
        }
    }
}

fn apply_pause(state: &mut PauseState, event: &PauseEvent) {
    match event.group {
        PauseGroup::None => debug!("Pause for PauseGroup::None ignored"),
        PauseGroup::User => {
            info!("User pause");
            state.set_user_paused(true);
        }
        PauseGroup::Sequenced => {
            state.begin_sequence(event.tag.clone().unwrap_or_default());
        }
    }
}
