//! Recording test double for `ShapeKernel`.
//!
//! Every call is logged as a `KernelCall` so tests can assert exactly which
//! constructions a caller made. Solids are bounding boxes; tessellation
//! produces two triangles per box face.

use crate::traits::ShapeKernel;
use crate::types::*;
use shape_types::ShapeKind;
use std::collections::HashMap;

/// One call made against the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelCall {
    CreateBox {
        length: f64,
        width: f64,
        height: f64,
    },
    CreateSphere {
        radius: f64,
    },
    CreateCone {
        height: f64,
        lower_radius: f64,
        upper_radius: f64,
    },
    CreateTorusPipe {
        outer_radius: f64,
        inner_radius: f64,
        sweep_degrees: f64,
    },
    Tessellate {
        solid: u64,
        options: StrokeOptions,
    },
    Release {
        solid: u64,
    },
}

impl KernelCall {
    /// The shape kind a construction call builds, `None` for other calls.
    pub fn constructed_kind(&self) -> Option<ShapeKind> {
        match self {
            KernelCall::CreateBox { .. } => Some(ShapeKind::Box),
            KernelCall::CreateSphere { .. } => Some(ShapeKind::Sphere),
            KernelCall::CreateCone { .. } => Some(ShapeKind::Cone),
            KernelCall::CreateTorusPipe { .. } => Some(ShapeKind::TorusPipe),
            _ => None,
        }
    }
}

/// A synthetic solid: the shape it stands for and its bounding box.
#[derive(Debug, Clone)]
struct MockSolid {
    kind: ShapeKind,
    min: [f64; 3],
    max: [f64; 3],
}

/// Deterministic test double for the geometry kernel.
pub struct MockKernel {
    next_handle: u64,
    solids: HashMap<u64, MockSolid>,
    calls: Vec<KernelCall>,
    reject_construction: bool,
    fail_tessellation: bool,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            solids: HashMap::new(),
            calls: Vec::new(),
            reject_construction: false,
            fail_tessellation: false,
        }
    }

    /// A mock whose constructions all yield no solid.
    pub fn rejecting() -> Self {
        Self {
            reject_construction: true,
            ..Self::new()
        }
    }

    pub fn set_reject_construction(&mut self, reject: bool) {
        self.reject_construction = reject;
    }

    pub fn set_fail_tessellation(&mut self, fail: bool) {
        self.fail_tessellation = fail;
    }

    pub fn calls(&self) -> &[KernelCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Construction calls made for `kind`.
    pub fn construction_count(&self, kind: ShapeKind) -> usize {
        self.calls
            .iter()
            .filter(|c| c.constructed_kind() == Some(kind))
            .count()
    }

    /// Solids created and not yet released.
    pub fn live_solids(&self) -> usize {
        self.solids.len()
    }

    fn store(&mut self, kind: ShapeKind, min: [f64; 3], max: [f64; 3]) -> Option<SolidHandle> {
        if self.reject_construction {
            return None;
        }
        let h = SolidHandle(self.next_handle);
        self.next_handle += 1;
        self.solids.insert(h.id(), MockSolid { kind, min, max });
        Some(h)
    }

    /// Two triangles per face of the solid's bounding box.
    fn tessellate_bounds(solid: &MockSolid, options: &StrokeOptions) -> Polyface {
        let (lo, hi) = (solid.min, solid.max);
        let c = [
            (lo[0] + hi[0]) / 2.0,
            (lo[1] + hi[1]) / 2.0,
            (lo[2] + hi[2]) / 2.0,
        ];
        let half = [
            (hi[0] - lo[0]) / 2.0,
            (hi[1] - lo[1]) / 2.0,
            (hi[2] - lo[2]) / 2.0,
        ];

        let mut out = Polyface::default();
        let axes: [[f64; 3]; 6] = [
            [-1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, -1.0],
            [0.0, 0.0, 1.0],
        ];

        for (face_index, n) in axes.iter().enumerate() {
            let start_index = out.indices.len() as u32;
            let base_vertex = out.point_count() as u32;

            let (u, v) = tangent_vectors(*n);
            let center: Vec<f64> = (0..3).map(|i| c[i] + n[i] * half[i]).collect();
            let su: Vec<f64> = (0..3).map(|i| u[i] * half[i]).collect();
            let sv: Vec<f64> = (0..3).map(|i| v[i] * half[i]).collect();

            let signs = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
            for (k, &(a, b)) in signs.iter().enumerate() {
                for i in 0..3 {
                    out.points.push((center[i] + a * su[i] + b * sv[i]) as f32);
                }
                if options.need_normals {
                    out.normals
                        .extend_from_slice(&[n[0] as f32, n[1] as f32, n[2] as f32]);
                }
                if options.need_params {
                    let (pu, pv) = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)][k];
                    out.params.extend_from_slice(&[pu, pv]);
                }
            }

            // Two triangles: 0-1-2 and 0-2-3
            out.indices.extend_from_slice(&[
                base_vertex,
                base_vertex + 1,
                base_vertex + 2,
                base_vertex,
                base_vertex + 2,
                base_vertex + 3,
            ]);

            out.face_ranges.push(FaceRange {
                face_index: face_index as u32,
                start_index,
                end_index: out.indices.len() as u32,
            });
        }

        out
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute two tangent vectors orthogonal to a normal.
fn tangent_vectors(n: [f64; 3]) -> ([f64; 3], [f64; 3]) {
    // Pick a vector not parallel to n
    let up = if n[0].abs() < 0.9 {
        [1.0, 0.0, 0.0]
    } else {
        [0.0, 1.0, 0.0]
    };

    let u = cross(up, n);
    let u_len = (u[0] * u[0] + u[1] * u[1] + u[2] * u[2]).sqrt();
    let u = [u[0] / u_len, u[1] / u_len, u[2] / u_len];

    let v = cross(n, u);
    (u, v)
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

impl ShapeKernel for MockKernel {
    fn create_box(&mut self, length: f64, width: f64, height: f64) -> Option<SolidHandle> {
        self.calls.push(KernelCall::CreateBox {
            length,
            width,
            height,
        });
        self.store(ShapeKind::Box, [0.0, 0.0, 0.0], [length, width, height])
    }

    fn create_sphere(&mut self, radius: f64) -> Option<SolidHandle> {
        self.calls.push(KernelCall::CreateSphere { radius });
        self.store(
            ShapeKind::Sphere,
            [-radius, -radius, -radius],
            [radius, radius, radius],
        )
    }

    fn create_cone(
        &mut self,
        height: f64,
        lower_radius: f64,
        upper_radius: f64,
    ) -> Option<SolidHandle> {
        self.calls.push(KernelCall::CreateCone {
            height,
            lower_radius,
            upper_radius,
        });
        let r = lower_radius.max(upper_radius);
        self.store(ShapeKind::Cone, [-r, -r, 0.0], [r, r, height])
    }

    fn create_torus_pipe(
        &mut self,
        outer_radius: f64,
        inner_radius: f64,
        sweep_degrees: f64,
    ) -> Option<SolidHandle> {
        self.calls.push(KernelCall::CreateTorusPipe {
            outer_radius,
            inner_radius,
            sweep_degrees,
        });
        let r = outer_radius + inner_radius;
        self.store(
            ShapeKind::TorusPipe,
            [-r, -r, -inner_radius],
            [r, r, inner_radius],
        )
    }

    fn tessellate(
        &mut self,
        solid: &SolidHandle,
        options: &StrokeOptions,
    ) -> Result<Polyface, KernelError> {
        self.calls.push(KernelCall::Tessellate {
            solid: solid.id(),
            options: *options,
        });
        options.check()?;
        let mock = self
            .solids
            .get(&solid.id())
            .ok_or(KernelError::SolidNotFound { id: solid.id() })?;
        if self.fail_tessellation {
            return Err(KernelError::TessellationFailed {
                reason: format!("mock refused to tessellate {:?}", mock.kind),
            });
        }
        Ok(Self::tessellate_bounds(mock, options))
    }

    fn release(&mut self, solid: SolidHandle) {
        self.calls.push(KernelCall::Release { solid: solid.id() });
        self.solids.remove(&solid.id());
    }
}
