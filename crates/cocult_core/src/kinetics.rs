use crate::params::KineticParams;
use crate::traits::{State, VectorField};

/// Baseline substrate available to the consumer besides the exchanged
/// metabolite (g/L).
pub const BASE_SUBSTRATE: f64 = 0.01;

/// First-order decay rate of the free metabolite (1/h).
pub const METABOLITE_DECAY: f64 = 0.001;

/// Monod saturation kinetics: zero at `s = 0`, asymptotic to `mu_max`.
pub fn monod(s: f64, k_s: f64, mu_max: f64) -> f64 {
    mu_max * s / (k_s + s)
}

/// Saturating light response of the producer.
pub fn light_limitation(i: f64, k_i: f64) -> f64 {
    i / (k_i + i)
}

/// Progressive depletion of the shared medium, independent of biomass.
/// Decays from 1.0 at t = 0 toward a residual floor of 0.1.
pub fn nutrient_limitation(t: f64) -> f64 {
    0.1 + 0.9 * (-t / 50.0).exp()
}

/// Suppression of producer growth by consumer density.
pub fn consumer_inhibition(x_consumer: f64, k_inhibition: f64) -> f64 {
    1.0 / (1.0 + k_inhibition * x_consumer)
}

/// Mild competition penalty on the consumer from producer density.
pub fn producer_competition(x_producer: f64) -> f64 {
    1.0 + 0.1 * x_producer
}

/// Producer specific growth rate under constant light, time-decaying
/// nutrients and consumer inhibition.
pub fn producer_growth_rate(params: &KineticParams, t: f64, x_consumer: f64) -> f64 {
    params.mu_max_producer
        * light_limitation(params.i0, params.k_i)
        * consumer_inhibition(x_consumer, params.k_inhibition)
        * nutrient_limitation(t)
}

/// Consumer specific growth rate: Monod on the metabolite plus baseline
/// substrate, divided by the competition factor.
pub fn consumer_growth_rate(params: &KineticParams, x_producer: f64, metabolite: f64) -> f64 {
    monod(
        metabolite + BASE_SUBSTRATE,
        params.k_s_consumer,
        params.mu_max_consumer,
    ) / producer_competition(x_producer)
}

/// The coupled three-state vector field of the co-culture.
///
/// State layout: `(producer, consumer, metabolite)`.
#[derive(Debug, Clone, Copy)]
pub struct CocultureField {
    params: KineticParams,
}

impl CocultureField {
    pub fn new(params: KineticParams) -> Self {
        Self { params }
    }
}

impl VectorField for CocultureField {
    fn eval(&self, t: f64, y: &State) -> State {
        let p = &self.params;
        let (x_p, x_c, s) = (y.x, y.y, y.z);

        let mu_p = producer_growth_rate(p, t, x_c);
        let mu_c = consumer_growth_rate(p, x_p, s);

        let d_producer = mu_p * x_p - p.k_d_producer * x_p * (1.0 + 0.5 * x_c);
        let d_consumer = mu_c * x_c - p.k_d_consumer * x_c;
        let d_metabolite = p.yield_producer * mu_p * x_p
            - (1.0 / p.yield_consumer) * mu_c * x_c
            - METABOLITE_DECAY * s;

        // The non-negativity clamp applies to the instantaneous derivative,
        // before the RK4 weighted sum, matching the reference trajectories.
        State::new(d_producer, d_consumer, d_metabolite.max(0.0))
    }
}
