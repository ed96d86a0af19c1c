//! Rebuild the draw target from a shape selection.

use serde::{Deserialize, Serialize};
use shape_kernel::{ShapeKernel, SolidHandle, StrokeOptions};
use shape_types::{ShapeKind, ShapeSelection};
use shape_viewer::GeometryDecorator;
use tracing::{debug, instrument, warn};

/// What a redraw left in the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result")]
pub enum RedrawOutcome {
    /// One polyface was drawn.
    Drawn { kind: ShapeKind, triangles: usize },
    /// The kernel produced no solid; the target is empty.
    NoSolid { kind: ShapeKind },
    /// The solid could not be tessellated; the target is empty.
    TessellationFailed { kind: ShapeKind, reason: String },
}

impl RedrawOutcome {
    pub fn kind(&self) -> ShapeKind {
        match self {
            RedrawOutcome::Drawn { kind, .. }
            | RedrawOutcome::NoSolid { kind }
            | RedrawOutcome::TessellationFailed { kind, .. } => *kind,
        }
    }

    pub fn is_drawn(&self) -> bool {
        matches!(self, RedrawOutcome::Drawn { .. })
    }
}

/// Make exactly one construction call, for the selection's active kind.
pub fn build_solid<K: ShapeKernel + ?Sized>(
    kernel: &mut K,
    selection: &ShapeSelection,
) -> Option<SolidHandle> {
    match selection.kind() {
        ShapeKind::Box => {
            let p = selection.box_params();
            kernel.create_box(p.length, p.width, p.height)
        }
        ShapeKind::Sphere => kernel.create_sphere(selection.sphere().radius),
        ShapeKind::Cone => {
            let p = selection.cone();
            kernel.create_cone(p.height, p.lower_radius, p.upper_radius)
        }
        ShapeKind::TorusPipe => {
            let p = selection.torus_pipe();
            kernel.create_torus_pipe(p.outer_radius, p.inner_radius, p.sweep_degrees)
        }
    }
}

/// Clear `target`, draw the selected shape into it and rebuild its graphic.
///
/// A shape the kernel refuses leaves the target empty; nothing is raised.
#[instrument(skip_all, fields(kind = %selection.kind()))]
pub fn redraw<K: ShapeKernel + ?Sized>(
    kernel: &mut K,
    selection: &ShapeSelection,
    target: &mut GeometryDecorator,
    options: &StrokeOptions,
) -> RedrawOutcome {
    let kind = selection.kind();
    target.clear_geometry();

    let outcome = match build_solid(kernel, selection) {
        None => {
            debug!("kernel produced no solid");
            RedrawOutcome::NoSolid { kind }
        }
        Some(solid) => {
            let result = kernel.tessellate(&solid, options);
            kernel.release(solid);
            match result {
                Ok(polyface) => {
                    let triangles = polyface.triangle_count();
                    target.add_geometry(polyface);
                    RedrawOutcome::Drawn { kind, triangles }
                }
                Err(e) => {
                    warn!(error = %e, "skipping shape that failed to tessellate");
                    RedrawOutcome::TessellationFailed {
                        kind,
                        reason: e.to_string(),
                    }
                }
            }
        }
    };

    target.set_color(selection.color());
    target.draw_base();
    outcome
}
