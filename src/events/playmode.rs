//! Host status polling and play-mode change events.
//!
//! The host poller triggers a [`HostStatusEvent`] every time the host signals
//! a possible lifecycle change. [`host_status_observer`] feeds the snapshot to
//! the [`PlayModeClassifier`] resource and, when the classified state changes,
//! triggers a [`PlayModeChangedEvent`] for the rest of the game to react to.
//!
//! Observers registered directly on the classifier run first, synchronously
//! inside `observe`; ECS observers of [`PlayModeChangedEvent`] run after.
use crate::resources::playmode::{HostFlags, PlayModeClassifier, PlayModeState};
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// A fresh sample of the host status flags.
#[derive(Event, Debug, Clone, Copy)]
pub struct HostStatusEvent {
    pub flags: HostFlags,
}

/// The classified play mode changed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayModeChangedEvent {
    pub previous: PlayModeState,
    pub next: PlayModeState,
}

/// Observer that classifies a host status sample.
///
/// Unrecognised flag combinations were already reported by the classifier and
/// leave the state as it was.
pub fn host_status_observer(
    trigger: On<HostStatusEvent>,
    mut commands: Commands,
    classifier: Option<ResMut<PlayModeClassifier>>,
) {
    let flags = trigger.event().flags;
    let Some(mut classifier) = classifier else {
        warn!(
            "HostStatusEvent {} received without a PlayModeClassifier resource",
            flags.composite_key()
        );
        return;
    };

    match classifier.observe(flags) {
        Ok(Some(transition)) => {
            info!(
                "Play mode transitioning from {:?} to {:?}",
                transition.previous, transition.next
            );
            commands.trigger(PlayModeChangedEvent {
                previous: transition.previous,
                next: transition.next,
            });
        }
        Ok(None) => debug!("Play mode unchanged ({:?})", classifier.current()),
        Err(e) => debug!("Ignoring host status sample: {}", e),
    }
}
