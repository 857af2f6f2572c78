//! Bevy messages exchanged between the renderer, the input layer and the
//! selection systems.

use std::sync::Arc;

use bevy::prelude::*;
use brushlink_core::{BucketId, SelectionSnapshot};

/// Fired by a graph when the user releases a brush drag.
///
/// Corners are in data coordinates of the graph's projected columns.
#[derive(Message, Debug, Clone)]
pub struct BrushReleased {
    /// Graph that reported the brush.
    pub graph: usize,
    /// Dataset column on the graph's x axis.
    pub x_column: usize,
    /// Dataset column on the graph's y axis.
    pub y_column: usize,
    /// Corner where the drag started.
    pub down: Vec2,
    /// Corner where the drag was released.
    pub up: Vec2,
}

/// Discrete highlight actions from the input layer.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightCommand {
    /// Make a bucket the target of subsequent brushes.
    SetActive(BucketId),
    /// Invert the active highlight against the normal bucket.
    Invert,
    /// Delete every highlighted row from the dataset.
    DeleteHighlighted,
}

/// Fired whenever a new selection snapshot is published, so graphs can
/// redraw highlighted points.
#[derive(Message, Debug, Clone)]
pub struct SelectionChanged {
    /// The published snapshot, or `None` when the dataset went away.
    pub snapshot: Option<Arc<SelectionSnapshot>>,
}
