use geometry_ui::messages::*;
use geometry_ui::*;
use shape_kernel::MockKernel;
use shape_types::*;
use shape_viewer::ViewManager;

fn new_ui() -> GeometryUi<MockKernel, ViewManager> {
    GeometryUi::new(MockKernel::new(), ViewManager::default())
}

#[test]
fn mount_then_select_shape_by_label() {
    let mut ui = new_ui();
    assert!(matches!(
        dispatch(&mut ui, UiEvent::Mount),
        UiResponse::GeometryUpdated { .. }
    ));

    let response = dispatch(
        &mut ui,
        UiEvent::SelectShape {
            label: "Torus Pipe".to_string(),
        },
    );
    match response {
        UiResponse::GeometryUpdated { selection, outcome } => {
            assert_eq!(selection.kind(), ShapeKind::TorusPipe);
            assert_eq!(outcome.kind(), ShapeKind::TorusPipe);
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn unknown_label_is_an_error_response() {
    let mut ui = new_ui();
    let response = dispatch(
        &mut ui,
        UiEvent::SelectShape {
            label: "Pyramid".to_string(),
        },
    );
    assert!(matches!(response, UiResponse::Error { .. }));
    assert_eq!(ui.selection().kind(), ShapeKind::Box);
}

#[test]
fn set_color_from_hex() {
    let mut ui = new_ui();
    dispatch(&mut ui, UiEvent::Mount);
    dispatch(
        &mut ui,
        UiEvent::SetColor {
            hex: "#ff0000".to_string(),
            transparency: 128,
        },
    );
    let color = ui.target().borrow().color();
    assert_eq!(color, ColorDef::from_name(ColorByName::Red).with_transparency(128));

    let bad = dispatch(
        &mut ui,
        UiEvent::SetColor {
            hex: "red".to_string(),
            transparency: 0,
        },
    );
    assert!(matches!(bad, UiResponse::Error { .. }));
}

#[test]
fn params_before_mount_are_stored() {
    let mut ui = new_ui();
    let response = dispatch(
        &mut ui,
        UiEvent::SetParam {
            update: ParamUpdate::ConeHeight(9.0),
        },
    );
    match response {
        UiResponse::SelectionStored { selection } => assert_eq!(selection.cone().height, 9.0),
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn events_after_unmount_are_errors() {
    let mut ui = new_ui();
    dispatch(&mut ui, UiEvent::Mount);
    assert!(matches!(
        dispatch(&mut ui, UiEvent::Unmount),
        UiResponse::Unmounted
    ));
    assert!(matches!(
        dispatch(&mut ui, UiEvent::Unmount),
        UiResponse::Error { .. }
    ));
    match dispatch(&mut ui, UiEvent::GetState) {
        UiResponse::State { state, .. } => assert_eq!(state, LifecycleState::Unmounted),
        other => panic!("unexpected response: {other:?}"),
    }
}

#[test]
fn json_round_trip_through_dispatch() {
    let mut ui = new_ui();
    let reply = dispatch_json(&mut ui, r#"{"type":"Mount"}"#);
    let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(value["type"], "GeometryUpdated");
    assert_eq!(value["outcome"]["result"], "Drawn");

    let reply = dispatch_json(
        &mut ui,
        r#"{"type":"SetParam","update":{"field":"BoxHeight","value":2.5}}"#,
    );
    let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(value["selection"]["box_params"]["height"], 2.5);
}

#[test]
fn malformed_json_yields_error_response() {
    let mut ui = new_ui();
    let reply = dispatch_json(&mut ui, r#"{"type":"Explode"}"#);
    let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(value["type"], "Error");
}
