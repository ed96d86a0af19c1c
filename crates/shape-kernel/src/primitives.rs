//! Shape builders on top of truck's sweep API.
//!
//! truck has no built-in box/sphere/cone/torus, so every shape here is a
//! sequence of translational or rotational sweeps. Inputs are assumed to be
//! pre-checked by the caller; profile failures still come back as `None`.

use std::f64::consts::PI;
use truck_modeling::builder;
use truck_modeling::topology::{Edge, Solid, Vertex, Wire};
use truck_modeling::{EuclideanSpace, Point3, Rad, Vector3};

/// Distances below this are treated as zero.
pub const LINEAR_TOLERANCE: f64 = 1e-9;

/// Box with one corner at the origin, extending to (length, width, height).
pub fn make_box(length: f64, width: f64, height: f64) -> Solid {
    let v = builder::vertex(Point3::new(0.0, 0.0, 0.0));
    let edge = builder::tsweep(&v, Vector3::new(length, 0.0, 0.0));
    let face = builder::tsweep(&edge, Vector3::new(0.0, width, 0.0));
    builder::tsweep(&face, Vector3::new(0.0, 0.0, height))
}

/// Sphere centered at the origin: a half disc in the XZ plane (x >= 0)
/// revolved a full turn around Z.
pub fn make_sphere(radius: f64) -> Option<Solid> {
    let south = builder::vertex(Point3::new(0.0, 0.0, -radius));
    // Rotating about -Y carries (0, 0, -r) through (r, 0, 0) to (0, 0, r).
    let arc: Wire = builder::rsweep(&south, Point3::origin(), -Vector3::unit_y(), Rad(PI));

    let first = arc.front_vertex()?.clone();
    let last = arc.back_vertex()?.clone();
    let axis_edge = builder::line(&last, &first);

    let mut edges: Vec<Edge> = arc.edge_iter().cloned().collect();
    edges.push(axis_edge);
    let profile = Wire::from_iter(edges);

    let face = builder::try_attach_plane(&[profile]).ok()?;
    Some(builder::rsweep(
        &face,
        Point3::origin(),
        Vector3::unit_z(),
        Rad(2.0 * PI),
    ))
}

/// Cone or frustum on +Z. The profile is the trapezoid between the axis and
/// the slanted side in the XZ plane; a zero radius collapses it to a
/// triangle with an apex on the axis.
pub fn make_cone(height: f64, lower_radius: f64, upper_radius: f64) -> Option<Solid> {
    let mut corners = vec![Point3::new(0.0, 0.0, 0.0)];
    if lower_radius > LINEAR_TOLERANCE {
        corners.push(Point3::new(lower_radius, 0.0, 0.0));
    }
    if upper_radius > LINEAR_TOLERANCE {
        corners.push(Point3::new(upper_radius, 0.0, height));
    }
    corners.push(Point3::new(0.0, 0.0, height));
    if corners.len() < 3 {
        return None;
    }

    let profile = closed_polyline(&corners);
    let face = builder::try_attach_plane(&[profile]).ok()?;
    Some(builder::rsweep(
        &face,
        Point3::origin(),
        Vector3::unit_z(),
        Rad(2.0 * PI),
    ))
}

/// Pipe of radius `inner_radius` whose centerline is a circle of radius
/// `outer_radius` around Z, swept by `sweep` radians. A full turn closes the
/// ring; anything shorter leaves flat end caps.
pub fn make_torus_pipe(outer_radius: f64, inner_radius: f64, sweep: Rad<f64>) -> Option<Solid> {
    let v = builder::vertex(Point3::new(outer_radius + inner_radius, 0.0, 0.0));
    let section: Wire = builder::rsweep(
        &v,
        Point3::new(outer_radius, 0.0, 0.0),
        Vector3::unit_y(),
        Rad(2.0 * PI),
    );
    let disc = builder::try_attach_plane(&[section]).ok()?;
    Some(builder::rsweep(
        &disc,
        Point3::origin(),
        Vector3::unit_z(),
        sweep,
    ))
}

/// Closed wire through `points` with shared vertices between edges.
fn closed_polyline(points: &[Point3]) -> Wire {
    let vertices: Vec<Vertex> = points.iter().map(|&p| builder::vertex(p)).collect();
    let n = vertices.len();
    let edges: Vec<Edge> = (0..n)
        .map(|i| builder::line(&vertices[i], &vertices[(i + 1) % n]))
        .collect();
    Wire::from_iter(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn vertex_bounds(solid: &Solid) -> ([f64; 3], [f64; 3]) {
        let mut min = [f64::MAX; 3];
        let mut max = [f64::MIN; 3];
        for shell in solid.boundaries() {
            for v in shell.vertex_iter() {
                let p = v.point();
                for i in 0..3 {
                    min[i] = min[i].min(p[i]);
                    max[i] = max[i].max(p[i]);
                }
            }
        }
        (min, max)
    }

    #[test]
    fn box_topology() {
        let solid = make_box(1.0, 2.0, 3.0);

        let boundaries = solid.boundaries();
        assert_eq!(boundaries.len(), 1, "Box should have 1 shell");

        let shell = &boundaries[0];
        let faces = shell.face_iter().count();
        let edge_ids: HashSet<_> = shell.edge_iter().map(|e| e.id()).collect();
        let vert_ids: HashSet<_> = shell.vertex_iter().map(|v| v.id()).collect();

        assert_eq!(faces, 6);
        assert_eq!(edge_ids.len(), 12);
        assert_eq!(vert_ids.len(), 8);
        assert_eq!(vert_ids.len() as i64 - edge_ids.len() as i64 + faces as i64, 2);
    }

    #[test]
    fn box_dimensions() {
        let (min, max) = vertex_bounds(&make_box(2.0, 3.0, 4.0));
        let eps = 1e-10;
        assert!((max[0] - min[0] - 2.0).abs() < eps, "length runs along X");
        assert!((max[1] - min[1] - 3.0).abs() < eps, "width runs along Y");
        assert!((max[2] - min[2] - 4.0).abs() < eps, "height runs along Z");
    }

    #[test]
    fn sphere_builds_single_shell() {
        let solid = make_sphere(2.0).expect("sphere profile");
        assert_eq!(solid.boundaries().len(), 1);
        assert!(solid.boundaries()[0].face_iter().count() >= 1);
    }

    #[test]
    fn frustum_and_apex_cone_build() {
        assert!(make_cone(5.0, 5.0, 3.0).is_some());
        assert!(make_cone(5.0, 5.0, 0.0).is_some(), "apex cone");
        assert!(make_cone(5.0, 0.0, 0.0).is_none(), "no radius at all");
    }

    #[test]
    fn torus_pipe_full_and_partial() {
        let full = make_torus_pipe(5.0, 2.0, Rad(2.0 * PI)).expect("full ring");
        assert_eq!(full.boundaries().len(), 1);
        let (min, max) = vertex_bounds(&full);
        assert!(max[0] <= 7.0 + 1e-9 && min[0] >= -7.0 - 1e-9);

        let half = make_torus_pipe(5.0, 2.0, Rad(PI)).expect("half ring");
        assert_eq!(half.boundaries().len(), 1);
    }
}
