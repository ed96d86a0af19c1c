//! Shape kernel backed by the truck B-rep library.

use crate::primitives::{self, LINEAR_TOLERANCE};
use crate::tessellation;
use crate::traits::ShapeKernel;
use crate::types::*;
use std::collections::HashMap;
use tracing::{debug, instrument};

use truck_modeling::topology::Solid;
use truck_modeling::Rad;

/// Real geometry kernel backed by the truck B-rep library.
pub struct TruckKernel {
    next_handle: u64,
    solids: HashMap<u64, Solid>,
}

impl TruckKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            solids: HashMap::new(),
        }
    }

    fn alloc_handle(&mut self) -> SolidHandle {
        let h = SolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    pub(crate) fn store_solid(&mut self, solid: Solid) -> SolidHandle {
        let handle = self.alloc_handle();
        self.solids.insert(handle.id(), solid);
        handle
    }

    pub fn get_solid(&self, handle: &SolidHandle) -> Option<&Solid> {
        self.solids.get(&handle.id())
    }

    /// Number of solids currently held.
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

fn is_length(value: f64) -> bool {
    value.is_finite() && value > LINEAR_TOLERANCE
}

impl ShapeKernel for TruckKernel {
    #[instrument(skip(self))]
    fn create_box(&mut self, length: f64, width: f64, height: f64) -> Option<SolidHandle> {
        if !(is_length(length) && is_length(width) && is_length(height)) {
            debug!("rejecting degenerate box");
            return None;
        }
        Some(self.store_solid(primitives::make_box(length, width, height)))
    }

    #[instrument(skip(self))]
    fn create_sphere(&mut self, radius: f64) -> Option<SolidHandle> {
        if !is_length(radius) {
            debug!("rejecting degenerate sphere");
            return None;
        }
        let solid = primitives::make_sphere(radius)?;
        Some(self.store_solid(solid))
    }

    #[instrument(skip(self))]
    fn create_cone(
        &mut self,
        height: f64,
        lower_radius: f64,
        upper_radius: f64,
    ) -> Option<SolidHandle> {
        let radius_ok = |r: f64| r.is_finite() && r >= 0.0;
        if !is_length(height)
            || !radius_ok(lower_radius)
            || !radius_ok(upper_radius)
            || !(is_length(lower_radius) || is_length(upper_radius))
        {
            debug!("rejecting degenerate cone");
            return None;
        }
        let solid = primitives::make_cone(height, lower_radius, upper_radius)?;
        Some(self.store_solid(solid))
    }

    #[instrument(skip(self))]
    fn create_torus_pipe(
        &mut self,
        outer_radius: f64,
        inner_radius: f64,
        sweep_degrees: f64,
    ) -> Option<SolidHandle> {
        if !is_length(outer_radius)
            || !is_length(inner_radius)
            || inner_radius >= outer_radius
            || !sweep_degrees.is_finite()
            || sweep_degrees <= 0.0
        {
            debug!("rejecting degenerate torus pipe");
            return None;
        }
        let sweep = Rad(sweep_degrees.min(360.0).to_radians());
        let solid = primitives::make_torus_pipe(outer_radius, inner_radius, sweep)?;
        Some(self.store_solid(solid))
    }

    fn tessellate(
        &mut self,
        solid: &SolidHandle,
        options: &StrokeOptions,
    ) -> Result<Polyface, KernelError> {
        let truck_solid = self
            .solids
            .get(&solid.id())
            .ok_or(KernelError::SolidNotFound { id: solid.id() })?;

        tessellation::tessellate_solid(truck_solid, options)
    }

    fn release(&mut self, solid: SolidHandle) {
        self.solids.remove(&solid.id());
    }
}
