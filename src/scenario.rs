//! Scenario commands issued against the engine's catalog.
//!
//! Two discrete commands exist beside the tick loop: rebuild the catalog
//! from its construction table, and rewrite the perturber's elements into
//! the scripted close-approach configuration. Both act through structural
//! roles; nothing is ever looked up by display name.

use crate::engine::OrbitalEngine;
use crate::error::OrreryResult;

/// Close-approach semi-major axis: between the third and fourth default
/// orbits, catalog units.
pub const APPROACH_SEMI_MAJOR_AXIS: f64 = 1.5;

/// Close-approach eccentricity: a highly elliptical pass.
pub const APPROACH_ECCENTRICITY: f64 = 0.8;

/// Close-approach inclination in degrees.
pub const APPROACH_INCLINATION: f64 = 30.0;

/// Close-approach orbital period in years, short enough for visible motion.
pub const APPROACH_ORBITAL_PERIOD: f64 = 2.0;

/// Command surface over an owned engine.
#[derive(Debug, Clone)]
pub struct ScenarioController {
    engine: OrbitalEngine,
}

impl ScenarioController {
    /// Take ownership of an engine.
    #[must_use]
    pub const fn new(engine: OrbitalEngine) -> Self {
        Self { engine }
    }

    /// The engine, for queries.
    #[must_use]
    pub const fn engine(&self) -> &OrbitalEngine {
        &self.engine
    }

    /// The engine, for driving ticks.
    #[must_use]
    pub fn engine_mut(&mut self) -> &mut OrbitalEngine {
        &mut self.engine
    }

    /// Release the engine.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Destructor not const in stable Rust
    pub fn into_engine(self) -> OrbitalEngine {
        self.engine
    }

    /// Rebuild the catalog from its construction table.
    ///
    /// Count, order and elements come back exactly; each body's initial
    /// phase is independently re-drawn from the engine's RNG stream.
    ///
    /// # Errors
    ///
    /// Only fails if the engine's blueprint is invalid, which a built
    /// engine's blueprint cannot be.
    pub fn reset(&mut self) -> OrreryResult<()> {
        self.engine.reset()
    }

    /// Rewrite the perturber's elements into the close-approach
    /// configuration.
    ///
    /// Only the perturber changes, and only its semi-major axis,
    /// eccentricity, inclination and period; its phase keeps advancing
    /// from wherever it was. Calling this twice is a no-op after the
    /// first call.
    pub fn trigger_close_approach(&mut self) {
        let perturber = self.engine.catalog_mut().perturber_mut();
        perturber.semi_major_axis = APPROACH_SEMI_MAJOR_AXIS;
        perturber.eccentricity = APPROACH_ECCENTRICITY;
        perturber.inclination = APPROACH_INCLINATION;
        perturber.orbital_period = APPROACH_ORBITAL_PERIOD;
    }
}
