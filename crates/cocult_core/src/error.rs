use thiserror::Error;

/// Failures surfaced by the simulation and fitting entry points.
///
/// Numerical divergence is deliberately absent: a diverged integration is
/// reported as a [`crate::simulate::Divergence`] diagnostic attached to the
/// partial trajectory, so callers can still render the prefix that completed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A coefficient is non-finite, or negative where physics requires a
    /// non-negative value. Raised before any integration begins.
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// Fitting was requested against fewer usable observations than fitted
    /// parameters. An observation is usable if at least one of its
    /// measurement fields is present.
    #[error("insufficient data for fitting: {usable} usable observation(s) for {needed} parameter(s)")]
    InsufficientData { needed: usize, usable: usize },

    /// The caller abandoned a fit through its `CancelToken`.
    #[error("fit cancelled")]
    Cancelled,
}
