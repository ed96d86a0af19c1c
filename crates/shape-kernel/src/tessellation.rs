//! Tessellation wrapper producing a `Polyface` with per-face ranges.
//!
//! Wraps truck-meshalgo. Normals and surface parameters are only copied out
//! when the stroke options ask for them.

use crate::types::*;
use tracing::{debug, instrument};
use truck_meshalgo::prelude::*;
use truck_meshalgo::tessellation::MeshableShape;

type TruckSolid = truck_modeling::Solid;

/// Smallest chord tolerance allowed, as a fraction of the solid's diagonal.
pub const MIN_RELATIVE_TOLERANCE: f64 = 1e-4;
/// Largest chord tolerance allowed, as a fraction of the solid's diagonal.
pub const MAX_RELATIVE_TOLERANCE: f64 = 1e-2;

/// Clamp `tolerance` into the range that gives a solid of diagonal `size`
/// usable detail. Degenerate sizes leave it unchanged.
pub fn scaled_tolerance(tolerance: f64, size: f64) -> f64 {
    if !(size.is_finite() && size > 0.0) {
        return tolerance;
    }
    tolerance.clamp(size * MIN_RELATIVE_TOLERANCE, size * MAX_RELATIVE_TOLERANCE)
}

/// Tessellate a truck solid face by face.
///
/// The requested chord tolerance is first tried as-is; if it is out of
/// proportion to the resulting mesh the solid is meshed again with
/// [`scaled_tolerance`].
#[instrument(skip(solid), fields(tolerance = options.chord_tolerance))]
pub fn tessellate_solid(
    solid: &TruckSolid,
    options: &StrokeOptions,
) -> std::result::Result<Polyface, KernelError> {
    options.check()?;
    let first = mesh_solid(solid, options.chord_tolerance, options)?;

    let size = first.bounds().map_or(0.0, |(lo, hi)| {
        (0..3)
            .map(|i| f64::from(hi[i] - lo[i]).powi(2))
            .sum::<f64>()
            .sqrt()
    });
    let tolerance = scaled_tolerance(options.chord_tolerance, size);
    if tolerance == options.chord_tolerance {
        return Ok(first);
    }
    debug!(size, tolerance, "chord tolerance rescaled to solid size");
    mesh_solid(solid, tolerance, options)
}

fn mesh_solid(
    solid: &TruckSolid,
    tolerance: f64,
    options: &StrokeOptions,
) -> std::result::Result<Polyface, KernelError> {
    let meshed_solid = solid.triangulation(tolerance);

    let mut out = Polyface::default();
    let mut face_index = 0u32;

    for shell in meshed_solid.boundaries().iter() {
        for face in shell.face_iter() {
            let this_face = face_index;
            face_index += 1;

            let maybe_mesh: Option<PolygonMesh> = face.surface();
            let Some(mut face_mesh) = maybe_mesh else {
                continue;
            };
            if !face.orientation() {
                face_mesh.invert();
            }

            let start_index = out.indices.len() as u32;
            append_mesh(&mut out, &face_mesh, options);
            let end_index = out.indices.len() as u32;
            if end_index > start_index {
                out.face_ranges.push(FaceRange {
                    face_index: this_face,
                    start_index,
                    end_index,
                });
            }
        }
    }

    if out.points.is_empty() {
        debug!("per-face tessellation empty, falling back to merged mesh");
        return tessellate_solid_merged(solid, tolerance, options);
    }

    debug!(
        triangles = out.triangle_count(),
        faces = out.face_ranges.len(),
        "tessellated solid"
    );
    Ok(out)
}

/// Fallback: merge everything into a single mesh with one face range.
fn tessellate_solid_merged(
    solid: &TruckSolid,
    tolerance: f64,
    options: &StrokeOptions,
) -> std::result::Result<Polyface, KernelError> {
    use truck_meshalgo::tessellation::MeshedShape;

    let mesh = solid.triangulation(tolerance).to_polygon();
    let mut out = Polyface::default();
    append_mesh(&mut out, &mesh, options);

    if out.indices.is_empty() {
        return Err(KernelError::TessellationFailed {
            reason: "triangulation produced no triangles".to_string(),
        });
    }

    out.face_ranges.push(FaceRange {
        face_index: 0,
        start_index: 0,
        end_index: out.indices.len() as u32,
    });
    Ok(out)
}

/// Append one mesh's points, optional attributes and triangles to `out`.
fn append_mesh(out: &mut Polyface, mesh: &PolygonMesh, options: &StrokeOptions) {
    let base_vertex = out.point_count() as u32;
    let positions = mesh.positions();

    for pos in positions {
        out.points.push(pos[0] as f32);
        out.points.push(pos[1] as f32);
        out.points.push(pos[2] as f32);
    }

    if options.need_normals {
        let normals = mesh.normals();
        if normals.len() == positions.len() {
            for norm in normals {
                out.normals.push(norm[0] as f32);
                out.normals.push(norm[1] as f32);
                out.normals.push(norm[2] as f32);
            }
        } else {
            for _ in 0..positions.len() {
                out.normals.extend_from_slice(&[0.0, 0.0, 1.0]);
            }
        }
    }

    if options.need_params {
        let uvs = mesh.uv_coords();
        if uvs.len() == positions.len() {
            for uv in uvs {
                out.params.push(uv[0] as f32);
                out.params.push(uv[1] as f32);
            }
        } else {
            out.params.resize(out.params.len() + positions.len() * 2, 0.0);
        }
    }

    for tri in mesh.tri_faces() {
        for v in tri.iter() {
            out.indices.push(v.pos as u32 + base_vertex);
        }
    }
}
