use serde::{Deserialize, Serialize};

/// Named colors offered by the shape form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorByName {
    Black,
    White,
    Red,
    Green,
    Blue,
    Cyan,
    Magenta,
    Yellow,
    Orange,
    Gray,
}

impl ColorByName {
    /// RGB components of the named color.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorByName::Black => (0x00, 0x00, 0x00),
            ColorByName::White => (0xFF, 0xFF, 0xFF),
            ColorByName::Red => (0xFF, 0x00, 0x00),
            ColorByName::Green => (0x00, 0x80, 0x00),
            ColorByName::Blue => (0x00, 0x00, 0xFF),
            ColorByName::Cyan => (0x00, 0xFF, 0xFF),
            ColorByName::Magenta => (0xFF, 0x00, 0xFF),
            ColorByName::Yellow => (0xFF, 0xFF, 0x00),
            ColorByName::Orange => (0xFF, 0xA5, 0x00),
            ColorByName::Gray => (0x80, 0x80, 0x80),
        }
    }
}

/// An RGB color with a transparency byte.
///
/// Transparency runs from 0 (opaque) to 255 (fully transparent), so the
/// alpha seen by a renderer is `255 - transparency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorDef {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub transparency: u8,
}

impl ColorDef {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            transparency: 0,
        }
    }

    pub fn from_name(name: ColorByName) -> Self {
        let (r, g, b) = name.rgb();
        Self::from_rgb(r, g, b)
    }

    /// Copy of this color with the transparency replaced.
    pub fn with_transparency(self, transparency: u8) -> Self {
        Self {
            transparency,
            ..self
        }
    }

    pub fn alpha(&self) -> u8 {
        255 - self.transparency
    }

    pub fn is_opaque(&self) -> bool {
        self.transparency == 0
    }

    /// Normalized `[r, g, b, a]` for GPU upload.
    pub fn to_rgba_f32(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.alpha() as f32 / 255.0,
        ]
    }

    /// `#rrggbb` form, ignoring transparency.
    pub fn to_hex_rgb(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rrggbb` (leading `#` optional). Transparency starts at 0.
    pub fn from_hex_rgb(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::from_rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Default for ColorDef {
    fn default() -> Self {
        Self::from_name(ColorByName::White)
    }
}
