//! Transient geometry overlay drawn by the viewer every frame.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use shape_kernel::Polyface;
use shape_types::ColorDef;
use uuid::Uuid;

/// Identity of a decorator within a viewer's decoration list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecoratorId(pub Uuid);

impl DecoratorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DecoratorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DecoratorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Graphic built by [`GeometryDecorator::draw_base`] and presented each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DecorationGraphic {
    pub decorator: DecoratorId,
    pub color: ColorDef,
    pub polyfaces: Vec<Polyface>,
}

impl DecorationGraphic {
    pub fn triangle_count(&self) -> usize {
        self.polyfaces.iter().map(Polyface::triangle_count).sum()
    }
}

/// Decorator shared between the component that fills it and the viewer
/// that presents it. Single-threaded by construction.
pub type SharedDecorator = Rc<RefCell<GeometryDecorator>>;

/// Draw target holding the geometry and color to present.
#[derive(Debug)]
pub struct GeometryDecorator {
    id: DecoratorId,
    geometry: Vec<Polyface>,
    color: ColorDef,
    base: Option<DecorationGraphic>,
}

impl GeometryDecorator {
    pub fn new() -> Self {
        Self {
            id: DecoratorId::new(),
            geometry: Vec::new(),
            color: ColorDef::default(),
            base: None,
        }
    }

    pub fn shared(self) -> SharedDecorator {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> DecoratorId {
        self.id
    }

    /// Remove all geometry and the graphic built from it.
    pub fn clear_geometry(&mut self) {
        self.geometry.clear();
        self.base = None;
    }

    pub fn add_geometry(&mut self, polyface: Polyface) {
        self.geometry.push(polyface);
    }

    pub fn set_color(&mut self, color: ColorDef) {
        self.color = color;
    }

    pub fn color(&self) -> ColorDef {
        self.color
    }

    pub fn geometry(&self) -> &[Polyface] {
        &self.geometry
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }

    /// Rebuild the presented graphic from the current geometry and color.
    pub fn draw_base(&mut self) {
        self.base = Some(DecorationGraphic {
            decorator: self.id,
            color: self.color,
            polyfaces: self.geometry.clone(),
        });
    }

    /// Graphic to add to the next frame, if one has been drawn.
    pub fn decorate(&self) -> Option<&DecorationGraphic> {
        self.base.as_ref()
    }
}

impl Default for GeometryDecorator {
    fn default() -> Self {
        Self::new()
    }
}
