//! The `cocult_core` crate is the growth-simulation engine for a two-member
//! microbial co-culture: a photosynthetic producer secreting a metabolite and
//! a heterotrophic consumer feeding on it.
//!
//! Key components:
//! - **Traits**: `VectorField` (ODE right-hand side) and `Stepper` (fixed-step
//!   integrators) over a three-component `State`.
//! - **Kinetics**: pure rate laws (Monod saturation, light limitation,
//!   time-decaying nutrients, mutual inhibition/competition) and the coupled
//!   vector field built from them.
//! - **Solvers**: classical fixed-step RK4.
//! - **Simulate**: deterministic trajectories with divergence diagnostics
//!   attached to partial results.
//! - **Dataset / Fit**: sparse OD600 observations with explicitly-absent
//!   fields, and a coordinate-wise grid search refining a whitelisted subset
//!   of coefficients against them.
//!
//! The engine is synchronous and free of I/O; hosts expose `simulate` and
//! `fit` behind whatever transport they like and may abandon a running fit
//! through a [`fit::CancelToken`].

pub mod dataset;
pub mod error;
pub mod fit;
pub mod kinetics;
pub mod params;
pub mod simulate;
pub mod solvers;
pub mod traits;

pub use dataset::{Dataset, Observation};
pub use error::EngineError;
pub use fit::{fit, fit_with_cancel, CancelToken, FitRange, FitResult};
pub use params::{FitParam, KineticParams};
pub use simulate::{simulate, Divergence, Sample, Simulation, Trajectory};
