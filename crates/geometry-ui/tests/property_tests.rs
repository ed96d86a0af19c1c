//! Property tests for the redraw trigger.

use proptest::prelude::*;

use geometry_ui::*;
use shape_kernel::{MockKernel, StrokeOptions};
use shape_types::*;
use shape_viewer::GeometryDecorator;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_kind() -> impl Strategy<Value = ShapeKind> {
    prop_oneof![
        Just(ShapeKind::Box),
        Just(ShapeKind::Sphere),
        Just(ShapeKind::Cone),
        Just(ShapeKind::TorusPipe),
    ]
}

fn arb_dim() -> impl Strategy<Value = f64> {
    0.1f64..50.0
}

/// A selection with every parameter set randomized.
fn arb_selection() -> impl Strategy<Value = ShapeSelection> {
    (
        arb_kind(),
        (arb_dim(), arb_dim(), arb_dim()),
        arb_dim(),
        (arb_dim(), arb_dim(), arb_dim()),
        (arb_dim(), arb_dim(), 1.0f64..=360.0),
        any::<u8>(),
    )
        .prop_map(|(kind, (l, w, h), r, (ch, cl, cu), (to, ti, ts), t)| {
            [
                ParamUpdate::BoxLength(l),
                ParamUpdate::BoxWidth(w),
                ParamUpdate::BoxHeight(h),
                ParamUpdate::SphereRadius(r),
                ParamUpdate::ConeHeight(ch),
                ParamUpdate::ConeLowerRadius(cl),
                ParamUpdate::ConeUpperRadius(cu),
                ParamUpdate::TorusOuterRadius(to),
                ParamUpdate::TorusInnerRadius(ti),
                ParamUpdate::TorusSweep(ts),
                ParamUpdate::Color(ColorDef::from_name(ColorByName::Cyan).with_transparency(t)),
                ParamUpdate::Kind(kind),
            ]
            .into_iter()
            .fold(ShapeSelection::default(), |s, u| s.apply(u))
        })
}

// ---------------------------------------------------------------------------
// 1. Exactly one construction call, for the active kind only
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn single_construction_for_active_kind(selection in arb_selection()) {
        let mut kernel = MockKernel::new();
        let mut target = GeometryDecorator::new();
        redraw(&mut kernel, &selection, &mut target, &StrokeOptions::for_curves());

        for kind in ShapeKind::ALL {
            let expected = usize::from(kind == selection.kind());
            prop_assert_eq!(kernel.construction_count(kind), expected);
        }
    }
}

// ---------------------------------------------------------------------------
// 2. Redrawing twice equals redrawing once
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn redraw_is_idempotent(selection in arb_selection()) {
        let options = StrokeOptions::for_curves();

        let mut once_kernel = MockKernel::new();
        let mut once = GeometryDecorator::new();
        redraw(&mut once_kernel, &selection, &mut once, &options);

        let mut twice_kernel = MockKernel::new();
        let mut twice = GeometryDecorator::new();
        redraw(&mut twice_kernel, &selection, &mut twice, &options);
        redraw(&mut twice_kernel, &selection, &mut twice, &options);

        prop_assert_eq!(once.geometry(), twice.geometry());
        prop_assert_eq!(once.color(), twice.color());
        prop_assert_eq!(twice.geometry().len(), 1);
    }
}

// ---------------------------------------------------------------------------
// 3. A rejecting kernel always leaves the target empty
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn rejection_never_draws(selection in arb_selection()) {
        let mut kernel = MockKernel::rejecting();
        let mut target = GeometryDecorator::new();
        target.add_geometry(Default::default());

        let outcome = redraw(&mut kernel, &selection, &mut target, &StrokeOptions::for_curves());

        prop_assert_eq!(outcome, RedrawOutcome::NoSolid { kind: selection.kind() });
        prop_assert!(target.is_empty());
        prop_assert_eq!(target.color(), selection.color());
    }
}
