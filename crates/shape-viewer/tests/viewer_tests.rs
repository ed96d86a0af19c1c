use std::cell::Cell;
use std::rc::Rc;

use shape_kernel::Polyface;
use shape_types::{ColorByName, ColorDef};
use shape_viewer::*;

fn unit_triangle(scale: f32) -> Polyface {
    Polyface {
        points: vec![0.0, 0.0, 0.0, scale, 0.0, 0.0, 0.0, scale, 0.0],
        indices: vec![0, 1, 2],
        ..Default::default()
    }
}

fn drawn_decorator(scale: f32) -> SharedDecorator {
    let decorator = GeometryDecorator::new().shared();
    {
        let mut d = decorator.borrow_mut();
        d.set_color(ColorDef::from_name(ColorByName::Cyan));
        d.add_geometry(unit_triangle(scale));
        d.draw_base();
    }
    decorator
}

// ── Ready signal ─────────────────────────────────────────────────────────

#[test]
fn initialize_signals_ready_once() {
    let mut viewer = ViewManager::default();
    assert!(!viewer.is_ready());
    assert!(viewer.initialize().unwrap());
    assert!(viewer.is_ready());
    assert!(!viewer.initialize().unwrap());
}

#[test]
fn ready_callbacks_run_exactly_once() {
    let fired = Rc::new(Cell::new(0));
    let mut viewer = ViewManager::default();

    let f = fired.clone();
    viewer.on_ready(Box::new(move || f.set(f.get() + 1)));
    assert_eq!(fired.get(), 0);

    viewer.initialize().unwrap();
    viewer.initialize().unwrap();
    assert_eq!(fired.get(), 1);

    let f = fired.clone();
    viewer.on_ready(Box::new(move || f.set(f.get() + 10)));
    assert_eq!(fired.get(), 11, "late callbacks run immediately");
}

#[test]
fn invalid_config_blocks_initialize() {
    let mut config = ViewerConfig::default();
    config.blank_connection.name = "  ".to_string();
    let mut viewer = ViewManager::new(config);
    assert!(matches!(viewer.initialize(), Err(ViewerError::Config { .. })));
    assert!(!viewer.is_ready());
}

// ── Decoration list ──────────────────────────────────────────────────────

#[test]
fn frame_collects_registered_graphics() {
    let mut viewer = ViewManager::default();
    viewer.initialize().unwrap();

    let a = drawn_decorator(1.0);
    let b = drawn_decorator(2.0);
    viewer.add_decorator(a.clone());
    viewer.add_decorator(b.clone());
    assert!(viewer.needs_redraw());

    let frame = viewer.render_frame().unwrap();
    assert_eq!(frame.number, 1);
    assert_eq!(frame.graphics.len(), 2);
    assert_eq!(frame.triangle_count(), 2);
    assert!(frame.grid);
    assert_eq!(frame.theme, Theme::Dark);
    assert!(!viewer.needs_redraw());

    assert!(viewer.drop_decorator(a.borrow().id()));
    let frame = viewer.render_frame().unwrap();
    assert_eq!(frame.graphics.len(), 1);
    assert_eq!(frame.graphics[0].decorator, b.borrow().id());
    assert_eq!(viewer.frames_presented(), 2);
}

#[test]
fn duplicate_registration_is_ignored() {
    let mut viewer = ViewManager::default();
    let d = drawn_decorator(1.0);
    viewer.add_decorator(d.clone());
    viewer.add_decorator(d.clone());
    assert_eq!(viewer.decorator_count(), 1);
}

#[test]
fn dropping_unknown_decorator_is_a_noop() {
    let mut viewer = ViewManager::default();
    let d = GeometryDecorator::new();
    assert!(!viewer.drop_decorator(d.id()));
    assert!(!viewer.needs_redraw());
}

#[test]
fn undrawn_decorator_contributes_nothing() {
    let mut viewer = ViewManager::default();
    viewer.initialize().unwrap();
    viewer.add_decorator(GeometryDecorator::new().shared());
    let frame = viewer.render_frame().unwrap();
    assert!(frame.graphics.is_empty());
}

#[test]
fn render_before_ready_fails() {
    let mut viewer = ViewManager::default();
    assert!(matches!(viewer.render_frame(), Err(ViewerError::NotReady)));
}

#[test]
fn frame_reflects_edits_after_redraw() {
    let mut viewer = ViewManager::default();
    viewer.initialize().unwrap();
    let d = drawn_decorator(1.0);
    viewer.add_decorator(d.clone());

    {
        let mut target = d.borrow_mut();
        target.clear_geometry();
        target.add_geometry(unit_triangle(3.0));
        target.set_color(ColorDef::from_name(ColorByName::Orange));
        target.draw_base();
    }
    viewer.invalidate_decorations();
    assert!(viewer.needs_redraw());

    let frame = viewer.render_frame().unwrap();
    let graphic = &frame.graphics[0];
    assert_eq!(graphic.color, ColorDef::from_name(ColorByName::Orange));
    let (_, max) = graphic.polyfaces[0].bounds().unwrap();
    approx::assert_abs_diff_eq!(max[0], 3.0);
}
