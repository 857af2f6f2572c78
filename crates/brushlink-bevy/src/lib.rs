//! Brushlink Bevy Plugin — drives linked brushing from Bevy's ECS.
//!
//! Provides `BrushLinkPlugin` which registers the resources, messages and
//! systems that connect graphs (brush rectangles) and keyboard input
//! (highlight commands) to the selection store in `brushlink-core`.

pub mod events;
pub mod hotkeys;
pub mod resources;
pub mod systems;

use bevy::prelude::*;
use brushlink_core::{SelectionConfig, SelectionStore};

use events::{BrushReleased, HighlightCommand, SelectionChanged};
use hotkeys::handle_highlight_hotkeys;
use resources::{ActiveHighlight, DatasetState, SelectionState};
use systems::{handle_brush_released, handle_highlight_commands, sync_partition_with_dataset};

/// Main Bevy plugin for linked brushing.
///
/// Registers resources, messages, and systems for:
/// - Partitioning the dataset whenever `DatasetState` is replaced
/// - Mapping hotkeys to highlight commands
/// - Inverting and deleting highlights
/// - Hit-testing released brushes into the active highlight
#[derive(Default)]
pub struct BrushLinkPlugin {
    /// Chunk capacity, bucket count and couplings. `BRUSHLINK_CHUNK_CAPACITY`
    /// and `BRUSHLINK_BUCKET_COUNT` override these when the plugin is built.
    pub config: SelectionConfig,
}

impl Plugin for BrushLinkPlugin {
    fn build(&self, app: &mut App) {
        let config = self.config.clone().with_env_overrides();
        let store = match SelectionStore::new(config) {
            Ok(store) => store,
            Err(e) => {
                tracing::error!("Invalid selection config: {e}");
                tracing::warn!("Falling back to the default selection config");
                SelectionStore::default()
            }
        };

        app.add_message::<BrushReleased>()
            .add_message::<HighlightCommand>()
            .add_message::<SelectionChanged>()
            .insert_resource(SelectionState { store })
            .init_resource::<ActiveHighlight>()
            .init_resource::<DatasetState>()
            .add_systems(
                Update,
                (
                    sync_partition_with_dataset,
                    handle_highlight_hotkeys,
                    handle_highlight_commands
                        .after(sync_partition_with_dataset)
                        .after(handle_highlight_hotkeys),
                    handle_brush_released.after(handle_highlight_commands),
                ),
            );
    }
}
