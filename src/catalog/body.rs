//! Body entity: orbital elements, phase, and presentation attributes.
//!
//! A [`Body`] is one orbiting object in the catalog. Its position on the
//! orbit ellipse is produced by a single canonical projection,
//! [`Body::position`], used by the coupling rule and by every external
//! query alike so the two can never diverge.

use serde::{Deserialize, Serialize};

use crate::error::{OrreryError, OrreryResult};

/// Full turn in radians.
pub const TAU: f64 = std::f64::consts::TAU;

/// Largest eccentricity the engine will ever store.
///
/// Keeps `e < 1` for any configured distortion scale.
pub const ECCENTRICITY_MAX: f64 = 0.999_999;

/// 2D vector in catalog units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[must_use]
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > f64::EPSILON {
            Self::new(self.x / mag, self.y / mag)
        } else {
            Self::new(0.0, 0.0)
        }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// RGB color, passed through unchanged to the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Presentation attributes, opaque to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    /// Draw size in renderer units.
    pub size: f64,
    /// Draw color.
    pub color: Color,
}

/// Stable body identity: the catalog slot assigned in construction order.
///
/// Identities survive `reset()` because the catalog is rebuilt from the same
/// table in the same order. Display names are presentation data and are
/// never used for lookup.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BodyId(usize);

impl BodyId {
    /// Create an identity for the given catalog slot.
    #[must_use]
    pub const fn new(slot: usize) -> Self {
        Self(slot)
    }

    /// Catalog slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Construction record for one body.
///
/// A [`crate::catalog::CatalogBlueprint`] holds a table of these; building
/// the catalog validates every definition and assigns identities in table
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDef {
    /// Display name (presentation only).
    pub name: String,
    /// Semi-major axis `a` in catalog units, > 0.
    pub semi_major_axis: f64,
    /// Eccentricity `e`, 0 <= e < 1.
    pub eccentricity: f64,
    /// Inclination in degrees. Presentation-facing: the planar coupling
    /// rule ignores it.
    pub inclination: f64,
    /// Orbital period in years, > 0.
    pub orbital_period: f64,
    /// Axis tilt in degrees (presentation-facing).
    pub axis_tilt: f64,
    /// Mass in target-body masses. Carried as a semantic attribute.
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Fixed initial phase in radians. `None` draws the phase uniformly
    /// from [0, 2π) at build time.
    #[serde(default)]
    pub initial_angle: Option<f64>,
    /// Presentation attributes, passed through unchanged.
    pub presentation: Presentation,
}

fn default_mass() -> f64 {
    1.0
}

impl BodyDef {
    /// Validate the orbital elements of this definition.
    ///
    /// # Errors
    ///
    /// Returns `InvalidElements` for any element that would produce NaN/Inf
    /// during updates.
    pub fn validate(&self) -> OrreryResult<()> {
        if !self.semi_major_axis.is_finite() || self.semi_major_axis <= 0.0 {
            return Err(OrreryError::invalid_elements(
                &self.name,
                format!("semi-major axis must be positive, got {}", self.semi_major_axis),
            ));
        }
        if !self.eccentricity.is_finite()
            || self.eccentricity < 0.0
            || self.eccentricity >= 1.0
        {
            return Err(OrreryError::invalid_elements(
                &self.name,
                format!("eccentricity must be in [0, 1), got {}", self.eccentricity),
            ));
        }
        if !self.orbital_period.is_finite() || self.orbital_period <= 0.0 {
            return Err(OrreryError::invalid_elements(
                &self.name,
                format!("orbital period must be positive, got {}", self.orbital_period),
            ));
        }
        if !self.inclination.is_finite() || !self.axis_tilt.is_finite() {
            return Err(OrreryError::invalid_elements(
                &self.name,
                "inclination and axis tilt must be finite",
            ));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(OrreryError::invalid_elements(
                &self.name,
                format!("mass must be positive, got {}", self.mass),
            ));
        }
        if let Some(angle) = self.initial_angle {
            if !angle.is_finite() {
                return Err(OrreryError::invalid_elements(
                    &self.name,
                    "initial angle must be finite",
                ));
            }
        }
        Ok(())
    }
}

/// One orbiting object: validated elements plus current phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Stable identity (catalog slot).
    pub id: BodyId,
    /// Display name (presentation only, never used for lookup).
    pub name: String,
    /// Semi-major axis `a` in catalog units.
    pub semi_major_axis: f64,
    /// Eccentricity `e` in [0, 1).
    pub eccentricity: f64,
    /// Inclination in degrees (presentation-facing).
    pub inclination: f64,
    /// Orbital period in years.
    pub orbital_period: f64,
    /// Current phase in radians, always in [0, 2π).
    pub angle: f64,
    /// Axis tilt in degrees (presentation-facing).
    pub axis_tilt: f64,
    /// Axis tilt at construction, never recomputed.
    pub original_axis_tilt: f64,
    /// Mass in target-body masses.
    pub mass: f64,
    /// Presentation attributes, opaque to the engine.
    pub presentation: Presentation,
}

impl Body {
    /// Build a body from a validated definition at the given catalog slot.
    ///
    /// # Errors
    ///
    /// Returns `InvalidElements` if the definition fails validation.
    pub fn from_def(id: BodyId, def: &BodyDef, angle: f64) -> OrreryResult<Self> {
        def.validate()?;
        Ok(Self {
            id,
            name: def.name.clone(),
            semi_major_axis: def.semi_major_axis,
            eccentricity: def.eccentricity,
            inclination: def.inclination,
            orbital_period: def.orbital_period,
            angle: wrap_angle(angle),
            axis_tilt: def.axis_tilt,
            original_axis_tilt: def.axis_tilt,
            mass: def.mass,
            presentation: def.presentation,
        })
    }

    /// Canonical projection of the current phase onto the orbit ellipse.
    ///
    /// `b = a·sqrt(1 − e²)`, position `(a·cos θ, b·sin θ)` in catalog
    /// units. Every consumer of a body's position goes through this one
    /// function.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        let a = self.semi_major_axis;
        let b = a * (1.0 - self.eccentricity * self.eccentricity).sqrt();
        Vec2::new(a * self.angle.cos(), b * self.angle.sin())
    }

    /// Advance the phase by `dt` years at this body's angular rate.
    ///
    /// The wrap uses true mathematical modulo so negative steps normalize
    /// into [0, 2π) as well.
    pub fn advance(&mut self, dt: f64) {
        self.angle = wrap_angle(self.angle + (TAU / self.orbital_period) * dt);
    }
}

/// Normalize an angle into [0, 2π).
///
/// `rem_euclid` can round up to exactly 2π for tiny negative inputs; the
/// extra guard keeps the half-open interval.
#[must_use]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
