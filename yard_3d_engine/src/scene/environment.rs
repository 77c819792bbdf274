/// Scene environment — background color and lights, resolved for the
/// render host.
///
/// Lights carry no culling state: the render host applies them to every
/// drawn mesh. Shadow flags on nodes only take effect through a
/// `Directional` light that has a shadow map.

use glam::Vec3;
use crate::engine_bail;
use crate::error::Result;
use crate::resource::{Color, ColorRef, Palette};
use super::description::{LightDesc, ShadowDesc};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Ambient,
    Directional {
        /// Where the light sits; it shines towards the origin
        position: Vec3,
        shadow: Option<ShadowDesc>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
}

impl Light {
    /// Resolve a light descriptor against a palette.
    ///
    /// # Errors
    ///
    /// `InvalidResource` for an unresolvable color, `InvalidConfig` for a
    /// negative or non-finite intensity, a directional light at the origin
    /// or an unusable shadow map.
    pub fn from_desc(desc: &LightDesc, palette: &Palette) -> Result<Self> {
        let (color, intensity, kind) = match desc {
            LightDesc::Ambient { color, intensity } => (color, *intensity, LightKind::Ambient),
            LightDesc::Directional { color, intensity, position, shadow } => {
                if !position.is_finite() || *position == Vec3::ZERO {
                    engine_bail!("yard3d::Environment", InvalidConfig,
                        "Directional light position {} gives no direction", position);
                }
                if let Some(shadow) = shadow {
                    Self::validate_shadow(shadow)?;
                }
                (color, *intensity, LightKind::Directional { position: *position, shadow: *shadow })
            }
        };

        if !(intensity.is_finite() && intensity >= 0.0) {
            engine_bail!("yard3d::Environment", InvalidConfig,
                "Light intensity must be finite and non-negative, got {}", intensity);
        }

        Ok(Self { kind, color: color.resolve(palette)?, intensity })
    }

    fn validate_shadow(shadow: &ShadowDesc) -> Result<()> {
        if !shadow.map_size.is_power_of_two() {
            engine_bail!("yard3d::Environment", InvalidConfig,
                "Shadow map size must be a power of two, got {}", shadow.map_size);
        }
        if !(shadow.near > 0.0 && shadow.far > shadow.near && shadow.far.is_finite()) {
            engine_bail!("yard3d::Environment", InvalidConfig,
                "Shadow camera needs 0 < near < far, got near={} far={}", shadow.near, shadow.far);
        }
        if !(shadow.extent > 0.0 && shadow.extent.is_finite()) {
            engine_bail!("yard3d::Environment", InvalidConfig,
                "Shadow camera extent must be positive, got {}", shadow.extent);
        }
        Ok(())
    }

    /// Unit vector the light travels along (directional lights only)
    pub fn direction(&self) -> Option<Vec3> {
        match self.kind {
            LightKind::Directional { position, .. } => Some(-position.normalize()),
            LightKind::Ambient => None,
        }
    }

    pub fn casts_shadow(&self) -> bool {
        matches!(self.kind, LightKind::Directional { shadow: Some(_), .. })
    }
}

/// Everything a render host needs besides the nodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    pub background: Option<Color>,
    pub lights: Vec<Light>,
}

impl Environment {
    /// Resolve the background and every light.
    pub fn from_desc(
        background: Option<&ColorRef>,
        lights: &[LightDesc],
        palette: &Palette,
    ) -> Result<Self> {
        let background = background.map(|color| color.resolve(palette)).transpose()?;
        let lights = lights.iter()
            .map(|light| Light::from_desc(light, palette))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { background, lights })
    }

    /// Lights that render a shadow map
    pub fn shadow_casters(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter().filter(|light| light.casts_shadow())
    }
}

#[cfg(test)]
#[path = "environment_tests.rs"]
mod tests;
