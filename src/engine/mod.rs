//! Orbital engine: the per-tick update rule and the proximity coupling.
//!
//! The engine owns the catalog and advances it in discrete time steps. Each
//! tick has two phases with simultaneous-snapshot semantics:
//!
//! 1. every body's phase angle advances by `(2π / period) · dt` and wraps
//!    into [0, 2π);
//! 2. the coupling rule is evaluated exactly once from the post-advance
//!    positions: if the perturber is within the configured threshold of the
//!    target, the target's eccentricity is distorted in proportion to the
//!    proximity; otherwise it snaps back to the baseline.
//!
//! The engine is a pure in-memory state machine: no I/O, no timing policy,
//! single control thread by design. The driving cadence belongs to the
//! caller, and behavior is identical whether ticks come once per frame or
//! batched.

pub mod rng;

use serde::{Deserialize, Serialize};

pub use rng::SimRng;

use crate::catalog::body::{Body, BodyId, Presentation, Vec2, ECCENTRICITY_MAX};
use crate::catalog::{Catalog, CatalogBlueprint};
use crate::config::{CouplingConfig, EngineConfig};
use crate::error::{OrreryError, OrreryResult};

/// Renderer-facing snapshot of one body.
///
/// Everything a drawing collaborator needs for one frame: identity,
/// elements, phase, the canonical position, presentation attributes, and
/// the derived disturbance flag (true only on the target, only while the
/// coupling condition currently holds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub id: BodyId,
    pub name: String,
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub orbital_period: f64,
    pub angle: f64,
    pub axis_tilt: f64,
    pub original_axis_tilt: f64,
    pub mass: f64,
    /// Canonical projected position in catalog units.
    pub position: Vec2,
    pub presentation: Presentation,
    /// Whether this body is currently disturbed by the coupling rule.
    pub disturbed: bool,
}

/// Derived perturber/target proximity report.
///
/// Gives a renderer the numbers behind a coupling overlay: the current
/// separation, the unit direction from the target toward the perturber
/// (the tidal direction), and whether the coupling currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Proximity {
    /// Separation between perturber and target, catalog units.
    pub distance: f64,
    /// Unit vector from target toward perturber; zero when coincident.
    pub direction: Vec2,
    /// Whether the separation is currently below the threshold.
    pub disturbed: bool,
}

/// The orbital engine: catalog, coupling constants, and tick bookkeeping.
#[derive(Debug, Clone)]
pub struct OrbitalEngine {
    /// Construction table the catalog is rebuilt from on reset.
    blueprint: CatalogBlueprint,
    /// Current population.
    catalog: Catalog,
    /// Coupling constants.
    coupling: CouplingConfig,
    /// Accumulated simulated years (signed; time may run backward).
    time: f64,
    /// Ticks since construction or last reset.
    steps: u64,
    /// Phase-drawing RNG, also used by reset.
    rng: SimRng,
}

impl OrbitalEngine {
    /// Create an engine over the default nine-body catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration's coupling constants are out
    /// of range.
    pub fn new(config: EngineConfig) -> OrreryResult<Self> {
        Self::with_blueprint(CatalogBlueprint::solar_system(), config)
    }

    /// Create an engine over a custom catalog blueprint.
    ///
    /// # Errors
    ///
    /// Returns an error if the coupling constants are out of range, any
    /// body definition is invalid, or a role slot is outside the table.
    pub fn with_blueprint(
        blueprint: CatalogBlueprint,
        config: EngineConfig,
    ) -> OrreryResult<Self> {
        config.coupling.validate_semantic()?;
        let mut rng = match config.seed {
            Some(seed) => SimRng::new(seed),
            None => SimRng::from_entropy(),
        };
        let catalog = blueprint.build(&mut rng)?;
        Ok(Self {
            blueprint,
            catalog,
            coupling: config.coupling,
            time: 0.0,
            steps: 0,
            rng,
        })
    }

    /// Advance every body by `dt` years, then evaluate the coupling rule
    /// once from the post-advance positions.
    ///
    /// Negative `dt` runs time backward; `dt = 0` leaves angles unchanged
    /// but still re-evaluates (and may re-snap) the target's eccentricity.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTimeStep` for NaN or infinite `dt`, before any
    /// mutation.
    pub fn update(&mut self, dt: f64) -> OrreryResult<()> {
        if !dt.is_finite() {
            return Err(OrreryError::InvalidTimeStep { value: dt });
        }

        for body in self.catalog.bodies_mut() {
            body.advance(dt);
        }
        self.evaluate_coupling();

        self.time += dt;
        self.steps += 1;
        Ok(())
    }

    /// The coupling rule, evaluated once per tick after all angles advance.
    fn evaluate_coupling(&mut self) {
        let distance = self.separation().magnitude();

        let coupling = &self.coupling;
        if distance < coupling.threshold {
            let effect = (coupling.threshold - distance) / coupling.threshold;
            let distorted = coupling.base_eccentricity + effect * coupling.distortion_scale;
            self.catalog.target_mut().eccentricity = distorted.min(ECCENTRICITY_MAX);
        } else {
            self.catalog.target_mut().eccentricity = coupling.base_eccentricity;
        }
    }

    /// Vector from target toward perturber, canonical projections.
    fn separation(&self) -> Vec2 {
        self.catalog.perturber().position() - self.catalog.target().position()
    }

    /// Canonical projected position of a body.
    ///
    /// # Errors
    ///
    /// Returns `UnknownBody` if the identity is not in the current catalog.
    pub fn position(&self, id: BodyId) -> OrreryResult<Vec2> {
        Ok(self.catalog.get(id)?.position())
    }

    /// Read-only view of all bodies in catalog order.
    #[must_use]
    pub fn bodies(&self) -> &[Body] {
        self.catalog.bodies()
    }

    /// Renderer snapshot of every body, in catalog order.
    #[must_use]
    pub fn views(&self) -> Vec<BodyView> {
        let target = self.catalog.target_id();
        let disturbed = self.disturbed();
        self.catalog
            .bodies()
            .iter()
            .map(|b| BodyView {
                id: b.id,
                name: b.name.clone(),
                semi_major_axis: b.semi_major_axis,
                eccentricity: b.eccentricity,
                inclination: b.inclination,
                orbital_period: b.orbital_period,
                angle: b.angle,
                axis_tilt: b.axis_tilt,
                original_axis_tilt: b.original_axis_tilt,
                mass: b.mass,
                position: b.position(),
                presentation: b.presentation,
                disturbed: disturbed && b.id == target,
            })
            .collect()
    }

    /// Current perturber/target proximity report.
    #[must_use]
    pub fn proximity(&self) -> Proximity {
        let separation = self.separation();
        let distance = separation.magnitude();
        Proximity {
            distance,
            direction: separation.normalize(),
            disturbed: distance < self.coupling.threshold,
        }
    }

    /// Whether the coupling's distance condition currently holds.
    ///
    /// Derived from the same canonical projection every query uses, never
    /// stored, so an external recomputation from [`OrbitalEngine::position`]
    /// outputs can never disagree with it.
    #[must_use]
    pub fn disturbed(&self) -> bool {
        self.separation().magnitude() < self.coupling.threshold
    }

    /// Accumulated simulated years since construction or last reset.
    #[must_use]
    pub const fn time(&self) -> f64 {
        self.time
    }

    /// Ticks since construction or last reset.
    #[must_use]
    pub const fn step_count(&self) -> u64 {
        self.steps
    }

    /// The catalog itself, for read access to roles and bodies.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The coupling constants in effect.
    #[must_use]
    pub const fn coupling(&self) -> &CouplingConfig {
        &self.coupling
    }

    /// Rebuild the catalog from its blueprint.
    ///
    /// Restores the exact construction table (count, order, elements) with
    /// fresh initial phases drawn from this engine's RNG stream, and clears
    /// tick bookkeeping.
    ///
    /// # Errors
    ///
    /// Only fails if the blueprint is invalid, which a built engine's
    /// blueprint cannot be.
    pub fn reset(&mut self) -> OrreryResult<()> {
        self.catalog = self.blueprint.build(&mut self.rng)?;
        self.time = 0.0;
        self.steps = 0;
        Ok(())
    }

    pub(crate) fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::body::{BodyDef, Color, TAU};

    /// Two coincident bodies on the same track, phases pinned.
    fn pair_blueprint(target_angle: f64, perturber_angle: f64) -> CatalogBlueprint {
        let def = |name: &str, angle: f64| BodyDef {
            name: name.to_string(),
            semi_major_axis: 1.5,
            eccentricity: 0.0,
            inclination: 0.0,
            orbital_period: 1.0,
            axis_tilt: 0.0,
            mass: 1.0,
            initial_angle: Some(angle),
            presentation: Presentation {
                size: 5.0,
                color: Color::new(255, 255, 255),
            },
        };
        CatalogBlueprint::new(
            vec![def("Target", target_angle), def("Perturber", perturber_angle)],
            1,
            0,
        )
    }

    fn pair_engine(target_angle: f64, perturber_angle: f64) -> OrbitalEngine {
        OrbitalEngine::with_blueprint(
            pair_blueprint(target_angle, perturber_angle),
            EngineConfig::seeded(42),
        )
        .unwrap()
    }

    #[test]
    fn test_new_default_catalog() {
        let engine = OrbitalEngine::new(EngineConfig::seeded(42)).unwrap();
        assert_eq!(engine.bodies().len(), 9);
        assert_eq!(engine.catalog().perturber().name, "Nibiru");
        assert_eq!(engine.catalog().target().name, "Earth");
        assert!(!engine.disturbed());
        assert_eq!(engine.step_count(), 0);
    }

    #[test]
    fn test_new_rejects_bad_coupling() {
        let mut config = EngineConfig::seeded(42);
        config.coupling.threshold = -1.0;
        assert!(OrbitalEngine::new(config).is_err());
    }

    #[test]
    fn test_update_rejects_nan() {
        let mut engine = OrbitalEngine::new(EngineConfig::seeded(42)).unwrap();
        let before = engine.views();
        let err = engine.update(f64::NAN).unwrap_err();
        assert!(matches!(err, OrreryError::InvalidTimeStep { .. }));
        assert_eq!(engine.views(), before, "failed update must not mutate");
        assert_eq!(engine.step_count(), 0);
    }

    #[test]
    fn test_update_rejects_infinity() {
        let mut engine = OrbitalEngine::new(EngineConfig::seeded(42)).unwrap();
        assert!(engine.update(f64::INFINITY).is_err());
        assert!(engine.update(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_update_advance_rate() {
        let mut engine = pair_engine(0.0, TAU / 2.0);
        engine.update(0.25).unwrap();
        // period 1.0, quarter-year step: quarter turn
        let target = &engine.bodies()[0];
        assert!((target.angle - TAU / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_update_negative_step_normalizes() {
        let mut engine = pair_engine(0.0, TAU / 2.0);
        engine.update(-0.25).unwrap();
        let target = &engine.bodies()[0];
        assert!(target.angle >= 0.0 && target.angle < TAU);
        assert!((target.angle - 3.0 * TAU / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_coupling_fires_when_coincident() {
        let mut engine = pair_engine(0.0, 0.0);
        engine.update(0.0).unwrap();
        // distance 0: full effect, e = 0.017 + 1.0 * 0.2
        assert!(engine.disturbed());
        let target = engine.catalog().target();
        assert!((target.eccentricity - 0.217).abs() < 1e-12);
    }

    #[test]
    fn test_coupling_snaps_back_outside_threshold() {
        let mut engine = pair_engine(0.0, 0.0);
        engine.update(0.0).unwrap();
        assert!(engine.disturbed());

        // Opposite sides of the track: distance 3.0 > threshold 2.0.
        let mut engine = pair_engine(0.0, TAU / 2.0);
        engine.update(0.0).unwrap();
        assert!(!engine.disturbed());
        let target = engine.catalog().target();
        assert!((target.eccentricity - 0.017).abs() < 1e-12);
    }

    #[test]
    fn test_coupling_effect_is_proportional() {
        // Circular tracks of radius 1.5; quarter-turn separation gives
        // distance 1.5·√2 ≈ 2.121 > 2, so pick a narrower split.
        let mut engine = pair_engine(0.0, 0.4);
        engine.update(0.0).unwrap();
        let d = engine.proximity().distance;
        assert!(d < 2.0);
        let expected = 0.017 + ((2.0 - d) / 2.0) * 0.2;
        let target = engine.catalog().target();
        assert!((target.eccentricity - expected).abs() < 1e-12);
    }

    #[test]
    fn test_coupling_clamps_eccentricity() {
        let blueprint = pair_blueprint(0.0, 0.0);
        let mut config = EngineConfig::seeded(42);
        config.coupling.distortion_scale = 50.0;
        let mut engine = OrbitalEngine::with_blueprint(blueprint, config).unwrap();
        engine.update(0.0).unwrap();
        let e = engine.catalog().target().eccentricity;
        assert!(e < 1.0);
        assert!((e - ECCENTRICITY_MAX).abs() < 1e-12);
    }

    #[test]
    fn test_zero_step_resnaps_eccentricity() {
        let mut engine = pair_engine(0.0, TAU / 2.0);
        engine.catalog_mut().target_mut().eccentricity = 0.5;
        engine.update(0.0).unwrap();
        let target = engine.catalog().target();
        assert!((target.eccentricity - 0.017).abs() < 1e-12);
    }

    #[test]
    fn test_position_unknown_body() {
        let engine = OrbitalEngine::new(EngineConfig::seeded(42)).unwrap();
        let err = engine.position(BodyId::new(99)).unwrap_err();
        assert!(matches!(err, OrreryError::UnknownBody { .. }));
    }

    #[test]
    fn test_position_matches_body_projection() {
        let engine = OrbitalEngine::new(EngineConfig::seeded(42)).unwrap();
        for body in engine.bodies() {
            let p = engine.position(body.id).unwrap();
            assert_eq!(p, body.position());
        }
    }

    #[test]
    fn test_views_disturbed_only_on_target() {
        let mut engine = pair_engine(0.0, 0.0);
        engine.update(0.0).unwrap();
        let views = engine.views();
        assert!(views[0].disturbed, "target view must carry the flag");
        assert!(!views[1].disturbed, "perturber view must not");
    }

    #[test]
    fn test_views_match_catalog_order() {
        let engine = OrbitalEngine::new(EngineConfig::seeded(42)).unwrap();
        let views = engine.views();
        assert_eq!(views.len(), 9);
        for (view, body) in views.iter().zip(engine.bodies()) {
            assert_eq!(view.id, body.id);
            assert_eq!(view.name, body.name);
            assert_eq!(view.position, body.position());
        }
    }

    #[test]
    fn test_proximity_direction_is_unit() {
        let mut engine = pair_engine(0.0, 0.4);
        engine.update(0.0).unwrap();
        let prox = engine.proximity();
        assert!(prox.distance > 0.0);
        assert!((prox.direction.magnitude() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_proximity_coincident_direction_is_zero() {
        let engine = pair_engine(0.0, 0.0);
        let prox = engine.proximity();
        assert!(prox.distance.abs() < 1e-12);
        assert!(prox.direction.magnitude() < 1e-12);
    }

    #[test]
    fn test_proximity_points_from_target_to_perturber() {
        // Perturber ahead of the target on the same circular track.
        let mut engine = pair_engine(0.0, 0.4);
        engine.update(0.0).unwrap();
        let prox = engine.proximity();
        let target = engine.catalog().target().position();
        let perturber = engine.catalog().perturber().position();
        let d = perturber - target;
        assert!((prox.direction.x - d.normalize().x).abs() < 1e-12);
        assert!((prox.direction.y - d.normalize().y).abs() < 1e-12);
    }

    #[test]
    fn test_time_and_step_bookkeeping() {
        let mut engine = OrbitalEngine::new(EngineConfig::seeded(42)).unwrap();
        engine.update(0.5).unwrap();
        engine.update(-0.25).unwrap();
        assert!((engine.time() - 0.25).abs() < 1e-12);
        assert_eq!(engine.step_count(), 2);
    }

    #[test]
    fn test_reset_restores_elements_and_bookkeeping() {
        let mut engine = OrbitalEngine::new(EngineConfig::seeded(42)).unwrap();
        for _ in 0..10 {
            engine.update(0.37).unwrap();
        }
        engine.reset().unwrap();
        assert_eq!(engine.step_count(), 0);
        assert!(engine.time().abs() < 1e-12);
        assert!(!engine.disturbed());

        let blueprint = CatalogBlueprint::solar_system();
        for (body, def) in engine.bodies().iter().zip(&blueprint.defs) {
            assert_eq!(body.name, def.name);
            assert!((body.semi_major_axis - def.semi_major_axis).abs() < 1e-12);
            assert!((body.eccentricity - def.eccentricity).abs() < 1e-12);
            assert!((body.orbital_period - def.orbital_period).abs() < 1e-12);
        }
    }

    #[test]
    fn test_reset_rerandomizes_angles() {
        let mut engine = OrbitalEngine::new(EngineConfig::seeded(42)).unwrap();
        let before: Vec<f64> = engine.bodies().iter().map(|b| b.angle).collect();
        engine.reset().unwrap();
        let after: Vec<f64> = engine.bodies().iter().map(|b| b.angle).collect();
        assert_ne!(before, after);
        for a in &after {
            assert!(*a >= 0.0 && *a < TAU);
        }
    }

    #[test]
    fn test_seeded_engines_are_identical() {
        let e1 = OrbitalEngine::new(EngineConfig::seeded(42)).unwrap();
        let e2 = OrbitalEngine::new(EngineConfig::seeded(42)).unwrap();
        assert_eq!(e1.bodies(), e2.bodies());
    }

    #[test]
    fn test_seeded_reset_sequence_replays() {
        let run = || {
            let mut engine = OrbitalEngine::new(EngineConfig::seeded(7)).unwrap();
            engine.update(1.3).unwrap();
            engine.reset().unwrap();
            engine.update(2.6).unwrap();
            engine
                .bodies()
                .iter()
                .map(|b| b.angle)
                .collect::<Vec<f64>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_views_serialize() {
        let engine = OrbitalEngine::new(EngineConfig::seeded(42)).unwrap();
        let json = serde_json::to_string(&engine.views()).unwrap();
        assert!(json.contains("Nibiru"));
        assert!(json.contains("disturbed"));
    }
}
