use serde::{Deserialize, Serialize};

use shape_types::{ParamUpdate, ShapeSelection};

use crate::component::LifecycleState;
use crate::redraw::RedrawOutcome;

/// Events from the host UI to the component.
/// Serialized as JSON for transport across the UI boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiEvent {
    // -- Lifecycle --
    /// Initialize the viewer and draw once it is ready.
    Mount,
    /// The viewer finished initializing on its own.
    ViewerReady,
    /// The component is going away.
    Unmount,

    // -- Form input --
    /// Any typed parameter edit.
    SetParam { update: ParamUpdate },
    /// Shape picker, by its display label ("Torus Pipe" etc.).
    SelectShape { label: String },
    /// Color picker: `#rrggbb` plus transparency (0 opaque, 255 clear).
    SetColor { hex: String, transparency: u8 },

    // -- Queries --
    GetState,
}

/// Responses from the component to the host UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiResponse {
    /// The draw target was rebuilt.
    GeometryUpdated {
        selection: ShapeSelection,
        outcome: RedrawOutcome,
    },

    /// The selection was stored without a redraw.
    SelectionStored { selection: ShapeSelection },

    /// Current lifecycle state and selection.
    State {
        state: LifecycleState,
        selection: ShapeSelection,
    },

    Unmounted,

    /// The event could not be handled.
    Error { message: String },
}
