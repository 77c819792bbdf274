/// Material resources.
///
/// A Material is a flat color plus the name of the shading model the
/// render host should apply. Shading itself belongs to the host.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};

/// Named colors (`0xRRGGBB`) shared by a scene description
pub type Palette = BTreeMap<String, u32>;

/// Shading model requested from the render host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shading {
    /// Diffuse-only lighting
    #[default]
    Lambert,
    /// Unlit flat color
    Basic,
}

/// Color given either literally or by palette name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorRef {
    Hex(u32),
    Named(String),
}

impl ColorRef {
    /// Resolve against a palette.
    ///
    /// # Errors
    ///
    /// `InvalidResource` for an unknown palette name or a literal wider
    /// than 24 bits.
    pub fn resolve(&self, palette: &Palette) -> Result<Color> {
        let hex = match self {
            ColorRef::Hex(hex) => *hex,
            ColorRef::Named(name) => *palette.get(name).ok_or_else(|| {
                Error::InvalidResource(format!("unknown palette color '{}'", name))
            })?,
        };
        if hex > 0xFF_FFFF {
            return Err(Error::InvalidResource(format!("color {:#x} is not 0xRRGGBB", hex)));
        }
        Ok(Color::from_hex(hex))
    }
}

/// RGB color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Build from a `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    /// Pack back into `0xRRGGBB`
    pub fn to_hex(&self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }
}

/// Material descriptor as written in scene data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDesc {
    pub color: ColorRef,
    #[serde(default)]
    pub shading: Shading,
}

/// Immutable shared material
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    color: Color,
    shading: Shading,
}

impl Material {
    /// Resolve a descriptor against a palette and build the material.
    ///
    /// # Errors
    ///
    /// `InvalidResource` if the color names a palette entry that does not
    /// exist or a literal wider than 24 bits.
    pub fn new(desc: &MaterialDesc, palette: &Palette) -> Result<Self> {
        Ok(Self {
            color: desc.color.resolve(palette)?,
            shading: desc.shading,
        })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn shading(&self) -> Shading {
        self.shading
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
