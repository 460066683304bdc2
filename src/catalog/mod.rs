//! Catalog: the ordered population of bodies and its structural roles.
//!
//! A [`CatalogBlueprint`] is the construction table — body definitions plus
//! the perturber/target role slots. Building it validates every definition,
//! assigns identities in table order, and draws each body's initial phase
//! from the injected RNG (uniform over [0, 2π)) unless the definition pins
//! one. `reset()` semantics fall out of rebuilding from the same blueprint.

pub mod body;

use serde::{Deserialize, Serialize};

use crate::engine::rng::SimRng;
use crate::error::{OrreryError, OrreryResult};
use body::{Body, BodyDef, BodyId, Color, Presentation};

/// Construction table: body definitions plus structural role slots.
///
/// Roles are fixed indices into the table, not display names. The original
/// pen-and-paper version of this system located its special bodies by
/// scanning for a name every tick; slots make the roles structural and the
/// lookup O(1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogBlueprint {
    /// Body definitions in catalog order.
    pub defs: Vec<BodyDef>,
    /// Table slot of the perturber.
    pub perturber: usize,
    /// Table slot of the target.
    pub target: usize,
}

impl CatalogBlueprint {
    /// Create a blueprint from definitions and role slots.
    #[must_use]
    pub fn new(defs: Vec<BodyDef>, perturber: usize, target: usize) -> Self {
        Self {
            defs,
            perturber,
            target,
        }
    }

    /// The default nine-body table: the eight planets plus the hypothetical
    /// perturber Nibiru on a wide, slow orbit.
    #[must_use]
    pub fn solar_system() -> Self {
        let planet = |name: &str,
                      a: f64,
                      e: f64,
                      incl: f64,
                      size: f64,
                      color: Color,
                      period: f64,
                      tilt: f64,
                      mass: f64| BodyDef {
            name: name.to_string(),
            semi_major_axis: a,
            eccentricity: e,
            inclination: incl,
            orbital_period: period,
            axis_tilt: tilt,
            mass,
            initial_angle: None,
            presentation: Presentation { size, color },
        };

        let defs = vec![
            planet("Mercury", 0.39, 0.205, 7.0, 4.0, Color::new(169, 169, 169), 0.24, 0.03, 1.0),
            planet("Venus", 0.72, 0.007, 3.4, 6.0, Color::new(255, 165, 0), 0.62, 177.4, 1.0),
            planet("Earth", 1.00, 0.017, 0.0, 6.0, Color::new(0, 100, 200), 1.00, 23.5, 1.0),
            planet("Mars", 1.52, 0.093, 1.85, 5.0, Color::new(255, 69, 0), 1.88, 25.2, 1.0),
            planet("Jupiter", 5.20, 0.049, 1.3, 20.0, Color::new(255, 140, 0), 11.86, 3.1, 1.0),
            planet("Saturn", 9.58, 0.056, 2.5, 18.0, Color::new(255, 215, 0), 29.46, 26.7, 1.0),
            planet("Uranus", 19.18, 0.046, 0.8, 12.0, Color::new(64, 224, 208), 84.01, 97.8, 1.0),
            planet("Neptune", 30.07, 0.010, 1.8, 12.0, Color::new(0, 0, 255), 164.8, 28.3, 1.0),
            planet("Nibiru", 60.0, 0.5, 30.0, 15.0, Color::new(139, 69, 19), 360.0, 45.0, 10.0),
        ];

        Self::new(defs, 8, 2)
    }

    /// Build a catalog from this blueprint.
    ///
    /// Definitions without a pinned `initial_angle` get a phase drawn
    /// uniformly from [0, 2π); phases are drawn in table order, so a seeded
    /// RNG reproduces the same catalog bit-for-bit.
    ///
    /// # Errors
    ///
    /// Returns `InvalidElements` for any bad definition, `Config` for an
    /// empty table, and `UnknownBody` for a role slot outside the table.
    pub fn build(&self, rng: &mut SimRng) -> OrreryResult<Catalog> {
        if self.defs.is_empty() {
            return Err(OrreryError::config("catalog must contain at least one body"));
        }
        if self.perturber >= self.defs.len() {
            return Err(OrreryError::UnknownBody {
                id: BodyId::new(self.perturber),
            });
        }
        if self.target >= self.defs.len() {
            return Err(OrreryError::UnknownBody {
                id: BodyId::new(self.target),
            });
        }

        let mut bodies = Vec::with_capacity(self.defs.len());
        for (slot, def) in self.defs.iter().enumerate() {
            let angle = def.initial_angle.unwrap_or_else(|| rng.gen_angle());
            bodies.push(Body::from_def(BodyId::new(slot), def, angle)?);
        }

        Ok(Catalog {
            bodies,
            perturber: BodyId::new(self.perturber),
            target: BodyId::new(self.target),
        })
    }
}

impl Default for CatalogBlueprint {
    fn default() -> Self {
        Self::solar_system()
    }
}

/// The ordered collection of bodies currently simulated.
///
/// Order is construction order and stays stable across ticks; only a
/// rebuild from the blueprint replaces the population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    bodies: Vec<Body>,
    perturber: BodyId,
    target: BodyId,
}

impl Catalog {
    /// Read-only view of all bodies in catalog order.
    #[must_use]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable iteration for the engine's tick loop.
    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Number of bodies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the catalog is empty (never true for a built catalog).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Look up a body by identity.
    ///
    /// # Errors
    ///
    /// Returns `UnknownBody` if the identity is not in the catalog.
    pub fn get(&self, id: BodyId) -> OrreryResult<&Body> {
        self.bodies
            .get(id.index())
            .ok_or(OrreryError::UnknownBody { id })
    }

    /// Identity of the perturber.
    #[must_use]
    pub const fn perturber_id(&self) -> BodyId {
        self.perturber
    }

    /// Identity of the target.
    #[must_use]
    pub const fn target_id(&self) -> BodyId {
        self.target
    }

    /// The perturber body.
    #[must_use]
    pub fn perturber(&self) -> &Body {
        &self.bodies[self.perturber.index()]
    }

    /// The target body.
    #[must_use]
    pub fn target(&self) -> &Body {
        &self.bodies[self.target.index()]
    }

    pub(crate) fn perturber_mut(&mut self) -> &mut Body {
        &mut self.bodies[self.perturber.index()]
    }

    pub(crate) fn target_mut(&mut self) -> &mut Body {
        &mut self.bodies[self.target.index()]
    }
}
