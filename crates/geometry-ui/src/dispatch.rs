use shape_kernel::ShapeKernel;
use shape_types::{ColorDef, ParamUpdate, ShapeKind};
use shape_viewer::Viewer;

use crate::component::{GeometryUi, UiError};
use crate::messages::{UiEvent, UiResponse};
use crate::redraw::RedrawOutcome;

/// Dispatch a UI event to the component and return a response.
///
/// Failures never escape; they come back as `UiResponse::Error`.
pub fn dispatch<K: ShapeKernel, V: Viewer>(ui: &mut GeometryUi<K, V>, event: UiEvent) -> UiResponse {
    match handle_event(ui, event) {
        Ok(response) => response,
        Err(e) => UiResponse::Error {
            message: e.to_string(),
        },
    }
}

/// JSON-in, JSON-out wrapper around [`dispatch`].
pub fn dispatch_json<K: ShapeKernel, V: Viewer>(ui: &mut GeometryUi<K, V>, json: &str) -> String {
    let response = match serde_json::from_str::<UiEvent>(json) {
        Ok(event) => dispatch(ui, event),
        Err(e) => UiResponse::Error {
            message: format!("malformed event: {e}"),
        },
    };
    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(r#"{{"type":"Error","message":"response serialization failed: {e}"}}"#)
    })
}

fn handle_event<K: ShapeKernel, V: Viewer>(
    ui: &mut GeometryUi<K, V>,
    event: UiEvent,
) -> Result<UiResponse, UiError> {
    match event {
        // -- Lifecycle --
        UiEvent::Mount => {
            let outcome = ui.mount()?;
            Ok(after_update(ui, outcome))
        }

        UiEvent::ViewerReady => {
            let outcome = ui.on_viewer_ready()?;
            Ok(after_update(ui, Some(outcome)))
        }

        UiEvent::Unmount => {
            ui.on_unmount()?;
            Ok(UiResponse::Unmounted)
        }

        // -- Form input --
        UiEvent::SetParam { update } => {
            let outcome = ui.on_params_changed(update)?;
            Ok(after_update(ui, outcome))
        }

        UiEvent::SelectShape { label } => {
            let kind: ShapeKind = label.parse().map_err(|e: shape_types::UnknownShapeKind| {
                UiError::InvalidInput {
                    reason: e.to_string(),
                }
            })?;
            let outcome = ui.on_params_changed(ParamUpdate::Kind(kind))?;
            Ok(after_update(ui, outcome))
        }

        UiEvent::SetColor { hex, transparency } => {
            let color = ColorDef::from_hex_rgb(&hex)
                .ok_or_else(|| UiError::InvalidInput {
                    reason: format!("not an #rrggbb color: {hex:?}"),
                })?
                .with_transparency(transparency);
            let outcome = ui.on_params_changed(ParamUpdate::Color(color))?;
            Ok(after_update(ui, outcome))
        }

        // -- Queries --
        UiEvent::GetState => Ok(UiResponse::State {
            state: ui.state(),
            selection: (*ui.selection()).clone(),
        }),
    }
}

fn after_update<K: ShapeKernel, V: Viewer>(
    ui: &GeometryUi<K, V>,
    outcome: Option<RedrawOutcome>,
) -> UiResponse {
    let selection = (*ui.selection()).clone();
    match outcome {
        Some(outcome) => UiResponse::GeometryUpdated { selection, outcome },
        None => UiResponse::SelectionStored { selection },
    }
}
