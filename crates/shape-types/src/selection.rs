use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{ColorByName, ColorDef};

/// The parametric solid shown by the shape form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Box,
    Sphere,
    Cone,
    TorusPipe,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Box,
        ShapeKind::Sphere,
        ShapeKind::Cone,
        ShapeKind::TorusPipe,
    ];

    /// Label shown in the shape picker.
    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Box => "Box",
            ShapeKind::Sphere => "Sphere",
            ShapeKind::Cone => "Cone",
            ShapeKind::TorusPipe => "Torus Pipe",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shape kind: {0:?}")]
pub struct UnknownShapeKind(pub String);

impl FromStr for ShapeKind {
    type Err = UnknownShapeKind;

    /// Accepts picker labels case-insensitively, with or without spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "box" => Ok(ShapeKind::Box),
            "sphere" => Ok(ShapeKind::Sphere),
            "cone" => Ok(ShapeKind::Cone),
            "toruspipe" => Ok(ShapeKind::TorusPipe),
            _ => Err(UnknownShapeKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxParams {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereParams {
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConeParams {
    pub height: f64,
    /// Radius at the base (z = 0).
    pub lower_radius: f64,
    /// Radius at the top (z = height).
    pub upper_radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorusPipeParams {
    /// Distance from the ring axis to the pipe centerline.
    pub outer_radius: f64,
    /// Radius of the pipe cross-section.
    pub inner_radius: f64,
    /// Sweep around the ring axis, in degrees.
    pub sweep_degrees: f64,
}

impl Default for BoxParams {
    fn default() -> Self {
        Self {
            length: 4.0,
            width: 4.0,
            height: 4.0,
        }
    }
}

impl Default for SphereParams {
    fn default() -> Self {
        Self { radius: 4.0 }
    }
}

impl Default for ConeParams {
    fn default() -> Self {
        Self {
            height: 5.0,
            lower_radius: 5.0,
            upper_radius: 3.0,
        }
    }
}

impl Default for TorusPipeParams {
    fn default() -> Self {
        Self {
            outer_radius: 5.0,
            inner_radius: 2.0,
            sweep_degrees: 360.0,
        }
    }
}

/// A single form edit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value")]
pub enum ParamUpdate {
    Kind(ShapeKind),
    Color(ColorDef),
    BoxLength(f64),
    BoxWidth(f64),
    BoxHeight(f64),
    SphereRadius(f64),
    ConeHeight(f64),
    ConeLowerRadius(f64),
    ConeUpperRadius(f64),
    TorusOuterRadius(f64),
    TorusInnerRadius(f64),
    TorusSweep(f64),
}

/// Immutable snapshot of the shape form.
///
/// Every kind keeps its own parameter set so switching kinds does not reset
/// the form; only the set matching `kind` is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSelection {
    kind: ShapeKind,
    color: ColorDef,
    box_params: BoxParams,
    sphere: SphereParams,
    cone: ConeParams,
    torus_pipe: TorusPipeParams,
}

impl Default for ShapeSelection {
    fn default() -> Self {
        Self {
            kind: ShapeKind::Box,
            color: ColorDef::from_name(ColorByName::Cyan).with_transparency(50),
            box_params: BoxParams::default(),
            sphere: SphereParams::default(),
            cone: ConeParams::default(),
            torus_pipe: TorusPipeParams::default(),
        }
    }
}

impl ShapeSelection {
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> ColorDef {
        self.color
    }

    pub fn box_params(&self) -> BoxParams {
        self.box_params
    }

    pub fn sphere(&self) -> SphereParams {
        self.sphere
    }

    pub fn cone(&self) -> ConeParams {
        self.cone
    }

    pub fn torus_pipe(&self) -> TorusPipeParams {
        self.torus_pipe
    }

    /// Return a new snapshot with `update` applied. Values pass through
    /// unchecked; see [`ShapeSelection::advisories`].
    #[must_use]
    pub fn apply(&self, update: ParamUpdate) -> ShapeSelection {
        let mut next = self.clone();
        match update {
            ParamUpdate::Kind(kind) => next.kind = kind,
            ParamUpdate::Color(color) => next.color = color,
            ParamUpdate::BoxLength(v) => next.box_params.length = v,
            ParamUpdate::BoxWidth(v) => next.box_params.width = v,
            ParamUpdate::BoxHeight(v) => next.box_params.height = v,
            ParamUpdate::SphereRadius(v) => next.sphere.radius = v,
            ParamUpdate::ConeHeight(v) => next.cone.height = v,
            ParamUpdate::ConeLowerRadius(v) => next.cone.lower_radius = v,
            ParamUpdate::ConeUpperRadius(v) => next.cone.upper_radius = v,
            ParamUpdate::TorusOuterRadius(v) => next.torus_pipe.outer_radius = v,
            ParamUpdate::TorusInnerRadius(v) => next.torus_pipe.inner_radius = v,
            ParamUpdate::TorusSweep(v) => next.torus_pipe.sweep_degrees = v,
        }
        next
    }

    /// Informational diagnostics for the active parameter set.
    pub fn advisories(&self) -> Vec<Advisory> {
        fn positive(out: &mut Vec<Advisory>, field: &'static str, value: f64) {
            if !value.is_finite() || value <= 0.0 {
                out.push(Advisory::NotPositive { field, value });
            }
        }

        let mut out = Vec::new();
        match self.kind {
            ShapeKind::Box => {
                positive(&mut out, "length", self.box_params.length);
                positive(&mut out, "width", self.box_params.width);
                positive(&mut out, "height", self.box_params.height);
            }
            ShapeKind::Sphere => positive(&mut out, "radius", self.sphere.radius),
            ShapeKind::Cone => {
                positive(&mut out, "height", self.cone.height);
                let c = self.cone;
                let radii = [("lower_radius", c.lower_radius), ("upper_radius", c.upper_radius)];
                for (field, value) in radii {
                    if !value.is_finite() || value < 0.0 {
                        out.push(Advisory::Negative { field, value });
                    }
                }
                // One zero end is an apex; both zero leaves nothing to revolve.
                if c.lower_radius == 0.0 && c.upper_radius == 0.0 {
                    out.push(Advisory::ConeWithoutRadius);
                }
            }
            ShapeKind::TorusPipe => {
                let tp = self.torus_pipe;
                positive(&mut out, "outer_radius", tp.outer_radius);
                positive(&mut out, "inner_radius", tp.inner_radius);
                if tp.inner_radius >= tp.outer_radius {
                    out.push(Advisory::PipeTooThick {
                        inner_radius: tp.inner_radius,
                        outer_radius: tp.outer_radius,
                    });
                }
                if !(tp.sweep_degrees > 0.0 && tp.sweep_degrees <= 360.0) {
                    out.push(Advisory::SweepOutOfRange {
                        degrees: tp.sweep_degrees,
                    });
                }
            }
        }
        out
    }
}

/// Non-fatal diagnostic about a parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Advisory {
    NotPositive { field: &'static str, value: f64 },
    Negative { field: &'static str, value: f64 },
    ConeWithoutRadius,
    PipeTooThick { inner_radius: f64, outer_radius: f64 },
    SweepOutOfRange { degrees: f64 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::NotPositive { field, value } => {
                write!(f, "{field} should be a positive number, got {value}")
            }
            Advisory::Negative { field, value } => {
                write!(f, "{field} should be zero or a positive number, got {value}")
            }
            Advisory::ConeWithoutRadius => f.write_str("cone needs at least one non-zero radius"),
            Advisory::PipeTooThick {
                inner_radius,
                outer_radius,
            } => write!(
                f,
                "inner radius {inner_radius} is not smaller than outer radius {outer_radius}"
            ),
            Advisory::SweepOutOfRange { degrees } => {
                write!(f, "sweep {degrees} is outside (0, 360] degrees")
            }
        }
    }
}
