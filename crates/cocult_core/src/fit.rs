use crate::dataset::Dataset;
use crate::error::EngineError;
use crate::params::{FitParam, KineticParams};
use crate::simulate::{simulate, Trajectory};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Candidate values sampled per fitted parameter.
pub const GRID_POINTS: usize = 10;

/// A simulation sample matches an observation when their times differ by
/// less than this.
const MATCH_TOLERANCE: f64 = 0.5;

/// Every objective evaluation runs this fixed-length simulation.
const FIT_DURATION: f64 = 240.0;
const FIT_STEP: f64 = 1.0;

/// Search interval for one fitted coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitRange {
    pub param: FitParam,
    pub min: f64,
    pub max: f64,
}

impl FitRange {
    pub fn new(param: FitParam, min: f64, max: f64) -> Self {
        Self { param, min, max }
    }

    /// Search intervals used by the reference calibration.
    pub fn defaults() -> Vec<FitRange> {
        vec![
            FitRange::new(FitParam::MuMaxProducer, 0.5, 1.2),
            FitRange::new(FitParam::MuMaxConsumer, 0.8, 1.8),
            FitRange::new(FitParam::KsProducer, 0.1, 1.0),
            FitRange::new(FitParam::KsConsumer, 0.05, 0.5),
        ]
    }

    fn validate(&self) -> Result<(), EngineError> {
        if !self.min.is_finite() || self.min < 0.0 {
            return Err(EngineError::InvalidParameter {
                name: self.param.name(),
                value: self.min,
            });
        }
        if !self.max.is_finite() || self.max <= self.min {
            return Err(EngineError::InvalidParameter {
                name: self.param.name(),
                value: self.max,
            });
        }
        Ok(())
    }

    /// Evenly spaced grid over `[min, max]`, endpoints included.
    fn candidate(&self, index: usize) -> f64 {
        self.min + (self.max - self.min) * index as f64 / (GRID_POINTS - 1) as f64
    }
}

/// Refined coefficients and the squared error they achieved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub params: KineticParams,
    pub error: f64,
}

/// Cooperative cancellation flag checked between grid candidates.
///
/// Clones share the flag, so a host can hand one end to a request handler
/// and keep the other to abandon a fit that is no longer wanted.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Sum of squared errors between a trajectory and the observations.
///
/// Only present measurement fields contribute; an absent field adds nothing
/// rather than being scored as zero. Observations with no matching sample
/// are skipped.
fn sum_squared_error(trajectory: &Trajectory, dataset: &Dataset) -> f64 {
    let mut error = 0.0;
    for obs in dataset.observations() {
        let Some(sample) = trajectory.sample_near(obs.time, MATCH_TOLERANCE) else {
            continue;
        };
        if let Some(measured) = obs.producer {
            error += (sample.producer - measured).powi(2);
        }
        if let Some(measured) = obs.consumer {
            error += (sample.consumer - measured).powi(2);
        }
    }
    error
}

/// Scores one candidate parameter set against the dataset. A candidate whose
/// simulation diverges scores infinitely badly and can never win.
fn objective(params: &KineticParams, dataset: &Dataset) -> Result<f64, EngineError> {
    let sim = simulate(params, FIT_DURATION, FIT_STEP)?;
    if sim.divergence.is_some() {
        return Ok(f64::INFINITY);
    }
    Ok(sum_squared_error(&sim.trajectory, dataset))
}

/// Coordinate-wise grid search over the whitelisted coefficients.
///
/// Each parameter is searched independently: every candidate is `params0`
/// with only that one coefficient overridden, scored against the same
/// baseline. Improvements found for different parameters are recorded into
/// the returned set but never combined during evaluation, so the search can
/// miss jointly-better combinations; that is the documented behavior of the
/// reference calibration, not a joint optimizer. The returned error is never
/// above the baseline.
pub fn fit(
    dataset: &Dataset,
    params0: &KineticParams,
    ranges: &[FitRange],
) -> Result<FitResult, EngineError> {
    fit_with_cancel(dataset, params0, ranges, &CancelToken::new())
}

/// [`fit`] with a cooperative cancellation flag, checked before each grid
/// candidate. A cancelled fit returns [`EngineError::Cancelled`].
pub fn fit_with_cancel(
    dataset: &Dataset,
    params0: &KineticParams,
    ranges: &[FitRange],
    cancel: &CancelToken,
) -> Result<FitResult, EngineError> {
    params0.validate()?;
    for range in ranges {
        range.validate()?;
    }
    let usable = dataset.len();
    if usable < ranges.len() {
        return Err(EngineError::InsufficientData {
            needed: ranges.len(),
            usable,
        });
    }

    let baseline = objective(params0, dataset)?;
    let mut best_params = *params0;
    let mut best_error = baseline;

    for range in ranges {
        for index in 0..GRID_POINTS {
            if cancel.is_cancelled() {
                return Err(EngineError::Cancelled);
            }
            let value = range.candidate(index);
            let candidate = params0.with_value(range.param, value);
            let error = objective(&candidate, dataset)?;
            if error < best_error {
                best_error = error;
                best_params = best_params.with_value(range.param, value);
            }
        }
    }

    Ok(FitResult {
        params: best_params,
        error: best_error,
    })
}
