use serde::{Deserialize, Serialize};

/// Opaque handle to a solid owned by a kernel.
/// Valid only for the kernel that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SolidHandle(pub(crate) u64);

impl SolidHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Errors from kernel operations.
///
/// Construction never errors (it yields no solid instead); these cover
/// everything that happens once a solid exists.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    #[error("solid not found: {id}")]
    SolidNotFound { id: u64 },

    #[error("tessellation failed: {reason}")]
    TessellationFailed { reason: String },

    #[error("invalid stroke options: {reason}")]
    InvalidOptions { reason: String },
}

/// Tessellation quality and feature flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeOptions {
    /// Maximum distance between a chord and the true surface. The truck
    /// kernel keeps it between 1e-4 and 1e-2 of the solid's diagonal.
    pub chord_tolerance: f64,
    pub need_normals: bool,
    /// Emit surface (u, v) parameters per point.
    pub need_params: bool,
}

impl StrokeOptions {
    /// Options used when drawing a shape: normals on, params off.
    pub fn for_curves() -> Self {
        Self {
            chord_tolerance: 0.05,
            need_normals: true,
            need_params: false,
        }
    }

    pub(crate) fn check(&self) -> Result<(), KernelError> {
        if !self.chord_tolerance.is_finite() || self.chord_tolerance <= 0.0 {
            return Err(KernelError::InvalidOptions {
                reason: format!("chord tolerance must be positive, got {}", self.chord_tolerance),
            });
        }
        Ok(())
    }
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self::for_curves()
    }
}

/// Triangulated mesh of a solid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyface {
    /// Flat point coordinates [x0, y0, z0, x1, ...].
    pub points: Vec<f32>,
    /// Flat per-point normals, empty unless requested.
    pub normals: Vec<f32>,
    /// Flat per-point surface parameters [u0, v0, u1, ...], empty unless requested.
    pub params: Vec<f32>,
    /// Triangle indices into the point array.
    pub indices: Vec<u32>,
    pub face_ranges: Vec<FaceRange>,
}

/// Contiguous range of `indices` that belongs to one face of the solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRange {
    pub face_index: u32,
    /// Start index in the indices array (inclusive).
    pub start_index: u32,
    /// End index in the indices array (exclusive).
    pub end_index: u32,
}

impl Polyface {
    pub fn point_count(&self) -> usize {
        self.points.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<[f32; 3]> {
        let p = self.points.get(index * 3..index * 3 + 3)?;
        Some([p[0], p[1], p[2]])
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let mut chunks = self.points.chunks_exact(3);
        let first = chunks.next()?;
        let mut min = [first[0], first[1], first[2]];
        let mut max = min;
        for p in chunks {
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }
        Some((min, max))
    }
}
