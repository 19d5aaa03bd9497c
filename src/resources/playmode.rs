//! Host play-mode classifier.
//!
//! The host runtime exposes five status flags. Each time it signals a possible
//! lifecycle change, the flags are sampled into a [`HostFlags`] snapshot and
//! handed to [`PlayModeClassifier::observe`], which maps the snapshot onto one
//! of the [`PlayModeState`] values and notifies its observers when the state
//! changes.
//!
//! # Composite key
//!
//! Each flag is written as `1` (set) or `2` (clear) and weighted by a power of
//! ten in the order `updating`, `playing_or_will_change_mode`, `is_playing`,
//! `is_paused`, `is_compiling`. Reading the resulting number right to left
//! gives the flags in that order, so `22112` means "playing or about to change
//! mode, playing, everything else clear".
//!
//! | Key   | State       |
//! |-------|-------------|
//! | 22112 | Playing     |
//! | 21112 | Paused      |
//! | 22222 | Stopped     |
//! | 22122 | AboutToStop |
//! | 21122 | AboutToStop |
//! | 21222 | Stopped     |
//! | 22212 | AboutToPlay |
//! | 21212 | Paused      |
//!
//! Lookup is keyed on the flags themselves ([`PLAY_MODE_TRANSITIONS`]); the key
//! is kept for diagnostics.
//!
//! # Related
//!
//! - [`crate::events::playmode`] – ECS events feeding and reporting the classifier

use bevy_ecs::prelude::Resource;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use thiserror::Error;

/// Lifecycle state of the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayModeState {
    #[default]
    Stopped,
    Playing,
    Paused,
    AboutToStop,
    AboutToPlay,
}

/// Snapshot of the host status flags at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HostFlags {
    pub updating: bool,
    pub playing_or_will_change_mode: bool,
    pub is_playing: bool,
    pub is_paused: bool,
    pub is_compiling: bool,
}

const fn digit(flag: bool) -> u32 {
    if flag { 1 } else { 2 }
}

impl HostFlags {
    pub const fn new(
        updating: bool,
        playing_or_will_change_mode: bool,
        is_playing: bool,
        is_paused: bool,
        is_compiling: bool,
    ) -> Self {
        HostFlags {
            updating,
            playing_or_will_change_mode,
            is_playing,
            is_paused,
            is_compiling,
        }
    }

    pub const fn composite_key(&self) -> u32 {
        digit(self.updating)
            + digit(self.playing_or_will_change_mode) * 10
            + digit(self.is_playing) * 100
            + digit(self.is_paused) * 1000
            + digit(self.is_compiling) * 10000
    }

    /// Decode a composite key. Returns `None` unless it has exactly five
    /// digits, each `1` or `2`.
    pub fn from_composite_key(key: u32) -> Option<Self> {
        let mut flags = [false; 5];
        let mut rest = key;
        for flag in flags.iter_mut() {
            *flag = match rest % 10 {
                1 => true,
                2 => false,
                _ => return None,
            };
            rest /= 10;
        }
        if rest != 0 {
            return None;
        }
        Some(HostFlags::new(flags[0], flags[1], flags[2], flags[3], flags[4]))
    }
}

/// One row of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayModeRule {
    pub flags: HostFlags,
    pub state: PlayModeState,
}

const fn rule(
    updating: bool,
    will_change: bool,
    playing: bool,
    paused: bool,
    compiling: bool,
    state: PlayModeState,
) -> PlayModeRule {
    PlayModeRule {
        flags: HostFlags::new(updating, will_change, playing, paused, compiling),
        state,
    }
}

/// Every recognised flag combination and the state it maps to.
pub const PLAY_MODE_TRANSITIONS: [PlayModeRule; 8] = [
    // 22112: stopped or paused -> playing
    rule(false, true, true, false, false, PlayModeState::Playing),
    // 21112: playing -> paused, or editor paused -> play (paused)
    rule(false, true, true, true, false, PlayModeState::Paused),
    // 22222: about to stop -> stopped
    rule(false, false, false, false, false, PlayModeState::Stopped),
    // 22122: playing -> about to stop
    rule(false, false, true, false, false, PlayModeState::AboutToStop),
    // 21122: paused -> about to stop
    rule(false, false, true, true, false, PlayModeState::AboutToStop),
    // 21222: stopped -> paused in editor, still stopped
    rule(false, false, false, true, false, PlayModeState::Stopped),
    // 22212: stopped -> about to play
    rule(false, true, false, false, false, PlayModeState::AboutToPlay),
    // 21212: editor paused -> play, paused anyway
    rule(false, true, false, true, false, PlayModeState::Paused),
];

/// Look up the state for a flag snapshot.
pub fn classify(flags: HostFlags) -> Option<PlayModeState> {
    PLAY_MODE_TRANSITIONS
        .iter()
        .find(|rule| rule.flags == flags)
        .map(|rule| rule.state)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayModeError {
    #[error("no such play mode flag combination defined: {key}")]
    UnrecognizedFlagCombination { key: u32 },
}

/// A state change reported by [`PlayModeClassifier::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayModeTransition {
    pub previous: PlayModeState,
    pub next: PlayModeState,
}

/// Handle returned by [`PlayModeClassifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

pub type PlayModeObserver = Box<dyn FnMut(PlayModeState, PlayModeState) + Send + Sync>;

/// Tracks the host lifecycle state and notifies observers on change.
///
/// Construct one per process and inject it where the host status is polled.
#[derive(Resource)]
pub struct PlayModeClassifier {
    current: PlayModeState,
    observers: SmallVec<[(ObserverId, PlayModeObserver); 4]>,
    next_observer_id: u64,
}

impl PlayModeClassifier {
    /// Start in [`PlayModeState::Stopped`], or [`PlayModeState::Paused`] when
    /// the host already reports paused.
    pub fn new(host_paused: bool) -> Self {
        let current = if host_paused {
            PlayModeState::Paused
        } else {
            PlayModeState::Stopped
        };
        PlayModeClassifier {
            current,
            observers: SmallVec::new(),
            next_observer_id: 0,
        }
    }

    pub fn current(&self) -> PlayModeState {
        self.current
    }

    /// Register an observer. Observers are called in registration order.
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(PlayModeState, PlayModeState) + Send + Sync + 'static,
    {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if the id is unknown.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Classify a flag snapshot.
    ///
    /// Returns the transition if the state changed, `Ok(None)` if it did not.
    /// Unknown combinations are logged and leave the state untouched.
    pub fn observe(
        &mut self,
        flags: HostFlags,
    ) -> Result<Option<PlayModeTransition>, PlayModeError> {
        let Some(next) = classify(flags) else {
            let key = flags.composite_key();
            warn!("No such play mode flag combination defined: {}", key);
            return Err(PlayModeError::UnrecognizedFlagCombination { key });
        };

        if next == self.current {
            return Ok(None);
        }

        let previous = self.current;
        debug!("Play mode {:?} -> {:?}", previous, next);
        for (_, observer) in self.observers.iter_mut() {
            observer(previous, next);
        }
        self.current = next;
        Ok(Some(PlayModeTransition { previous, next }))
    }
}

impl Default for PlayModeClassifier {
    fn default() -> Self {
        Self::new(false)
    }
}

impl fmt::Debug for PlayModeClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayModeClassifier")
            .field("current", &self.current)
            .field("observers", &self.observers.len())
            .finish()
    }
}
