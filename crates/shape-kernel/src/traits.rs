use crate::types::*;

/// Geometry collaborator: builds parametric solids and tessellates them.
///
/// Construction returns `None` for input the kernel cannot turn into a
/// solid; that is not an error. Implemented by `TruckKernel` (real B-rep
/// construction) and `MockKernel` (recording test double).
pub trait ShapeKernel {
    /// Axis-aligned box spanning `length` along X, `width` along Y and
    /// `height` along Z.
    fn create_box(&mut self, length: f64, width: f64, height: f64) -> Option<SolidHandle>;

    /// Sphere centered at the origin.
    fn create_sphere(&mut self, radius: f64) -> Option<SolidHandle>;

    /// Cone or frustum along +Z with `lower_radius` at z = 0 and
    /// `upper_radius` at z = `height`.
    fn create_cone(
        &mut self,
        height: f64,
        lower_radius: f64,
        upper_radius: f64,
    ) -> Option<SolidHandle>;

    /// Pipe of radius `inner_radius` swept `sweep_degrees` around +Z along a
    /// circle of radius `outer_radius`.
    fn create_torus_pipe(
        &mut self,
        outer_radius: f64,
        inner_radius: f64,
        sweep_degrees: f64,
    ) -> Option<SolidHandle>;

    /// Triangulate a solid into a polyface.
    fn tessellate(
        &mut self,
        solid: &SolidHandle,
        options: &StrokeOptions,
    ) -> Result<Polyface, KernelError>;

    /// Drop a solid the caller no longer needs. Unknown handles are ignored.
    fn release(&mut self, solid: SolidHandle);
}

impl<K: ShapeKernel + ?Sized> ShapeKernel for Box<K> {
    fn create_box(&mut self, length: f64, width: f64, height: f64) -> Option<SolidHandle> {
        (**self).create_box(length, width, height)
    }

    fn create_sphere(&mut self, radius: f64) -> Option<SolidHandle> {
        (**self).create_sphere(radius)
    }

    fn create_cone(
        &mut self,
        height: f64,
        lower_radius: f64,
        upper_radius: f64,
    ) -> Option<SolidHandle> {
        (**self).create_cone(height, lower_radius, upper_radius)
    }

    fn create_torus_pipe(
        &mut self,
        outer_radius: f64,
        inner_radius: f64,
        sweep_degrees: f64,
    ) -> Option<SolidHandle> {
        (**self).create_torus_pipe(outer_radius, inner_radius, sweep_degrees)
    }

    fn tessellate(
        &mut self,
        solid: &SolidHandle,
        options: &StrokeOptions,
    ) -> Result<Polyface, KernelError> {
        (**self).tessellate(solid, options)
    }

    fn release(&mut self, solid: SolidHandle) {
        (**self).release(solid)
    }
}
