//! # orrery
//!
//! Parametric orbital catalog engine with a scripted close-approach
//! perturbation.
//!
//! A fixed population of bodies advances in discrete time steps under a
//! simplified, non-gravitational orbital model: each body's phase angle
//! moves at `2π / period` per simulated year and its position is the
//! canonical projection onto its orbit ellipse. One scripted rule couples
//! two designated bodies — when the perturber's projected position comes
//! within a distance threshold of the target, the target's eccentricity is
//! distorted in proportion to the proximity, and snaps back to baseline
//! once the threshold is no longer met.
//!
//! The crate is the state machine only. Rendering, windowing, timers and
//! input are external collaborators that drive [`OrbitalEngine::update`]
//! and read the query surface ([`engine::BodyView`], [`engine::Proximity`]).
//!
//! ## Example
//!
//! ```rust
//! use orrery::prelude::*;
//!
//! let engine = OrbitalEngine::new(EngineConfig::seeded(42))?;
//! let mut controller = ScenarioController::new(engine);
//!
//! // One tick of a hundredth of a year, then a frame snapshot.
//! controller.engine_mut().update(0.01)?;
//! let views = controller.engine().views();
//! assert_eq!(views.len(), 9);
//!
//! // Script the close approach and keep ticking.
//! controller.trigger_close_approach();
//! controller.engine_mut().update(0.01)?;
//! # Ok::<(), orrery::OrreryError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
)]

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod scenario;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::catalog::body::{Body, BodyDef, BodyId, Color, Presentation, Vec2};
    pub use crate::catalog::{Catalog, CatalogBlueprint};
    pub use crate::config::{CouplingConfig, EngineConfig};
    pub use crate::engine::rng::SimRng;
    pub use crate::engine::{BodyView, OrbitalEngine, Proximity};
    pub use crate::error::{OrreryError, OrreryResult};
    pub use crate::scenario::ScenarioController;
}

/// Re-export for public API
pub use error::{OrreryError, OrreryResult};
