//! Display option change request and notification.
//!
//! Emitting a [`ChangeOptionEvent`] asks [`change_option_observer`] to step the
//! option in [`DisplayOptions`], persist the result, and broadcast an
//! [`OptionsValueChangedEvent`] so menus can refresh their labels.
use crate::resources::displayoptions::{DisplayOptions, OptionKey};
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::warn;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeOptionEvent {
    pub key: OptionKey,
    /// Step direction; only used by [`OptionKey::Resolution`].
    pub dir: i32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionsValueChangedEvent {
    pub key: OptionKey,
}

pub fn change_option_observer(
    trigger: On<ChangeOptionEvent>,
    mut commands: Commands,
    options: Option<ResMut<DisplayOptions>>,
) {
    let event = trigger.event();
    let Some(mut options) = options else {
        warn!("ChangeOptionEvent {} without DisplayOptions resource", event.key);
        return;
    };

    options.change_value(event.key, event.dir);
    if let Err(e) = options.save_to_file() {
        warn!("Display options not saved: {}", e);
    }
    commands.trigger(OptionsValueChangedEvent { key: event.key });
}
