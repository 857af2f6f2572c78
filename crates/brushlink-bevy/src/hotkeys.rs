//! Keyboard shortcuts for highlight actions.
//!
//! `I` inverts the active highlight, `X` deletes highlighted rows, and the
//! digit keys pick the active bucket.

use bevy::prelude::*;
use brushlink_core::BucketId;

use crate::events::HighlightCommand;

const BUCKET_KEYS: [(KeyCode, u8); 10] = [
    (KeyCode::Digit0, 0),
    (KeyCode::Digit1, 1),
    (KeyCode::Digit2, 2),
    (KeyCode::Digit3, 3),
    (KeyCode::Digit4, 4),
    (KeyCode::Digit5, 5),
    (KeyCode::Digit6, 6),
    (KeyCode::Digit7, 7),
    (KeyCode::Digit8, 8),
    (KeyCode::Digit9, 9),
];

/// Translate key presses into [`HighlightCommand`] messages.
pub fn handle_highlight_hotkeys(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut commands: MessageWriter<HighlightCommand>,
) {
    let Some(keys) = keys else { return };

    for (code, id) in BUCKET_KEYS {
        if keys.just_pressed(code) {
            commands.write(HighlightCommand::SetActive(BucketId(id)));
        }
    }
    if keys.just_pressed(KeyCode::KeyI) {
        commands.write(HighlightCommand::Invert);
    }
    if keys.just_pressed(KeyCode::KeyX) {
        commands.write(HighlightCommand::DeleteHighlighted);
    }
}
