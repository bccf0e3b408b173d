use crate::error::EngineError;
use crate::traits::State;
use serde::{Deserialize, Serialize};

/// Kinetic coefficients and initial conditions for the co-culture model.
///
/// This is a plain `Copy` value: every simulation and every fitting candidate
/// receives its own copy, so no caller can ever observe a partially-updated
/// parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KineticParams {
    /// Producer maximum specific growth rate (1/h).
    pub mu_max_producer: f64,
    /// Producer half-saturation constant (g/L). Not read by the producer
    /// rate law, which is light- and nutrient-limited, but carried and
    /// fittable to match the reference model.
    pub k_s_producer: f64,
    /// Light half-saturation constant (umol/m^2/s).
    pub k_i: f64,
    /// Incident light intensity, held constant (umol/m^2/s).
    pub i0: f64,
    /// Metabolite yield per unit of producer growth.
    pub yield_producer: f64,
    /// Consumer maximum specific growth rate (1/h).
    pub mu_max_consumer: f64,
    /// Consumer half-saturation constant for the metabolite (g/L).
    pub k_s_consumer: f64,
    /// Consumer biomass yield per unit of metabolite consumed.
    pub yield_consumer: f64,
    /// Producer death rate (1/h).
    pub k_d_producer: f64,
    /// Consumer death rate (1/h).
    pub k_d_consumer: f64,
    /// Strength of the consumer's inhibition of producer growth.
    pub k_inhibition: f64,
    /// Initial producer density (OD600).
    pub producer_0: f64,
    /// Initial consumer density (OD600).
    pub consumer_0: f64,
    /// Initial metabolite concentration (g/L).
    pub metabolite_0: f64,
}

impl Default for KineticParams {
    /// Reference coefficients calibrated against the co-culture experiment.
    fn default() -> Self {
        Self {
            mu_max_producer: 0.03,
            k_s_producer: 0.01,
            k_i: 50.0,
            i0: 200.0,
            yield_producer: 0.8,
            mu_max_consumer: 0.08,
            k_s_consumer: 0.005,
            yield_consumer: 0.5,
            k_d_producer: 0.02,
            k_d_consumer: 0.01,
            k_inhibition: 0.5,
            producer_0: 0.0157,
            consumer_0: 0.0123,
            metabolite_0: 0.0,
        }
    }
}

impl KineticParams {
    /// Checks every coefficient before integration: all must be finite and
    /// non-negative, and the divisors of the rate laws must be positive.
    pub fn validate(&self) -> Result<(), EngineError> {
        let fields: [(&'static str, f64); 14] = [
            ("mu_max_producer", self.mu_max_producer),
            ("k_s_producer", self.k_s_producer),
            ("k_i", self.k_i),
            ("i0", self.i0),
            ("yield_producer", self.yield_producer),
            ("mu_max_consumer", self.mu_max_consumer),
            ("k_s_consumer", self.k_s_consumer),
            ("yield_consumer", self.yield_consumer),
            ("k_d_producer", self.k_d_producer),
            ("k_d_consumer", self.k_d_consumer),
            ("k_inhibition", self.k_inhibition),
            ("producer_0", self.producer_0),
            ("consumer_0", self.consumer_0),
            ("metabolite_0", self.metabolite_0),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidParameter { name, value });
            }
        }
        // These appear in denominators.
        if self.k_i == 0.0 {
            return Err(EngineError::InvalidParameter {
                name: "k_i",
                value: self.k_i,
            });
        }
        if self.yield_consumer == 0.0 {
            return Err(EngineError::InvalidParameter {
                name: "yield_consumer",
                value: self.yield_consumer,
            });
        }
        Ok(())
    }

    /// Initial condition (producer, consumer, metabolite).
    pub fn initial_state(&self) -> State {
        State::new(self.producer_0, self.consumer_0, self.metabolite_0)
    }

    /// Reads the coefficient addressed by a fit handle.
    pub fn value(&self, param: FitParam) -> f64 {
        match param {
            FitParam::MuMaxProducer => self.mu_max_producer,
            FitParam::MuMaxConsumer => self.mu_max_consumer,
            FitParam::KsProducer => self.k_s_producer,
            FitParam::KsConsumer => self.k_s_consumer,
        }
    }

    /// Returns a copy with a single fitted coefficient overridden.
    pub fn with_value(mut self, param: FitParam, value: f64) -> Self {
        match param {
            FitParam::MuMaxProducer => self.mu_max_producer = value,
            FitParam::MuMaxConsumer => self.mu_max_consumer = value,
            FitParam::KsProducer => self.k_s_producer = value,
            FitParam::KsConsumer => self.k_s_consumer = value,
        }
        self
    }
}

/// The coefficients the grid search is allowed to refine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitParam {
    MuMaxProducer,
    MuMaxConsumer,
    KsProducer,
    KsConsumer,
}

impl FitParam {
    pub fn name(self) -> &'static str {
        match self {
            FitParam::MuMaxProducer => "mu_max_producer",
            FitParam::MuMaxConsumer => "mu_max_consumer",
            FitParam::KsProducer => "k_s_producer",
            FitParam::KsConsumer => "k_s_consumer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FitParam, KineticParams};
    use crate::error::EngineError;

    #[test]
    fn default_parameters_validate() {
        KineticParams::default()
            .validate()
            .expect("reference coefficients should be valid");
    }

    #[test]
    fn negative_rate_constant_is_rejected() {
        let params = KineticParams {
            k_d_producer: -0.01,
            ..KineticParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(EngineError::InvalidParameter {
                name: "k_d_producer",
                value: -0.01,
            })
        );
    }

    #[test]
    fn non_finite_coefficient_is_rejected() {
        let params = KineticParams {
            mu_max_consumer: f64::NAN,
            ..KineticParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(EngineError::InvalidParameter {
                name: "mu_max_consumer",
                ..
            })
        ));
    }

    #[test]
    fn zero_consumer_yield_is_rejected() {
        let params = KineticParams {
            yield_consumer: 0.0,
            ..KineticParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn with_value_overrides_only_the_addressed_coefficient() {
        let base = KineticParams::default();
        let updated = base.with_value(FitParam::KsConsumer, 0.25);
        assert_eq!(updated.value(FitParam::KsConsumer), 0.25);
        assert_eq!(updated.value(FitParam::MuMaxProducer), base.mu_max_producer);
        assert_eq!(updated.k_d_consumer, base.k_d_consumer);
        // The original value is untouched.
        assert_eq!(base.value(FitParam::KsConsumer), 0.005);
    }

    #[test]
    fn initial_state_matches_initial_coefficients() {
        let state = KineticParams::default().initial_state();
        assert_eq!(state.x, 0.0157);
        assert_eq!(state.y, 0.0123);
        assert_eq!(state.z, 0.0);
    }
}
