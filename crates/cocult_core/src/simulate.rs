use crate::error::EngineError;
use crate::kinetics::CocultureField;
use crate::params::KineticParams;
use crate::solvers::Rk4;
use crate::traits::{State, Stepper};
use serde::{Deserialize, Serialize};

/// One time-stamped point of a simulated trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub t: f64,
    pub producer: f64,
    pub consumer: f64,
    pub metabolite: f64,
}

impl Sample {
    fn new(t: f64, state: &State) -> Self {
        Self {
            t,
            producer: state.x,
            consumer: state.y,
            metabolite: state.z,
        }
    }
}

/// Ordered, fixed-step sequence of samples starting at t = 0.
///
/// Serializes as a plain array of `{t, producer, consumer, metabolite}`
/// records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory {
    samples: Vec<Sample>,
}

impl Trajectory {
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First sample whose time lies within `tolerance` of `t`.
    pub fn sample_near(&self, t: f64, tolerance: f64) -> Option<&Sample> {
        self.samples.iter().find(|s| (s.t - t).abs() < tolerance)
    }
}

/// Point at which the integration left the finite range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Divergence {
    /// Index of the step whose result was non-finite (1-based, step 1
    /// produces the sample after the initial condition).
    pub step: usize,
    /// Time the diverged step would have reached.
    pub t: f64,
}

/// Outcome of a simulation run.
///
/// A diverged integration is not an error: the trajectory holds the
/// furthest-reached finite prefix and `divergence` records where the state
/// blew up, so a caller can still render what completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub trajectory: Trajectory,
    pub divergence: Option<Divergence>,
}

/// Integrates the co-culture model over `duration` hours with fixed step
/// `dt`, from the initial condition carried by `params`.
///
/// The trajectory holds the initial sample plus one sample per completed
/// step: `floor(duration / dt) + 1` samples when nothing diverges. The run
/// is deterministic; identical inputs reproduce the identical trajectory.
pub fn simulate(
    params: &KineticParams,
    duration: f64,
    dt: f64,
) -> Result<Simulation, EngineError> {
    params.validate()?;
    if !duration.is_finite() || duration < 0.0 {
        return Err(EngineError::InvalidParameter {
            name: "duration",
            value: duration,
        });
    }
    if !dt.is_finite() || dt <= 0.0 {
        return Err(EngineError::InvalidParameter {
            name: "step",
            value: dt,
        });
    }

    let field = CocultureField::new(*params);
    let mut stepper = Rk4::new();
    let n_steps = (duration / dt).floor() as usize;

    let mut t = 0.0;
    let mut state = params.initial_state();
    let mut samples = Vec::with_capacity(n_steps + 1);
    samples.push(Sample::new(t, &state));

    let mut divergence = None;
    for step in 1..=n_steps {
        stepper.step(&field, &mut t, &mut state, dt);
        if !state.iter().all(|v| v.is_finite()) {
            divergence = Some(Divergence { step, t });
            break;
        }
        samples.push(Sample::new(t, &state));
    }

    Ok(Simulation {
        trajectory: Trajectory { samples },
        divergence,
    })
}
