use crate::traits::{State, Stepper, VectorField};

/// Classic Runge-Kutta 4th Order Stepper.
///
/// Fixed step size, no adaptive error control; the global truncation error
/// scales as O(h^4). Reference trajectories used for fitting are produced by
/// this scheme, so it stays the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rk4;

impl Rk4 {
    pub fn new() -> Self {
        Self
    }
}

impl Stepper for Rk4 {
    fn step(&mut self, field: &impl VectorField, t: &mut f64, y: &mut State, dt: f64) {
        let t0 = *t;

        // k1 = f(t, y)
        let k1 = field.eval(t0, y);

        // k2 = f(t + dt/2, y + dt*k1/2)
        let k2 = field.eval(t0 + dt * 0.5, &(*y + k1 * (dt * 0.5)));

        // k3 = f(t + dt/2, y + dt*k2/2)
        let k3 = field.eval(t0 + dt * 0.5, &(*y + k2 * (dt * 0.5)));

        // k4 = f(t + dt, y + dt*k3)
        let k4 = field.eval(t0 + dt, &(*y + k3 * dt));

        // y_next = y + dt/6 * (k1 + 2k2 + 2k3 + k4)
        *y += (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0);
        *t = t0 + dt;
    }
}

#[cfg(test)]
mod tests {
    use super::Rk4;
    use crate::traits::{State, Stepper, VectorField};
    use approx::assert_relative_eq;

    /// dy/dt = -k * y in the first component, other components frozen.
    struct Decay {
        rate: f64,
    }

    impl VectorField for Decay {
        fn eval(&self, _t: f64, y: &State) -> State {
            State::new(-self.rate * y.x, 0.0, 0.0)
        }
    }

    fn integrate_decay(rate: f64, duration: f64, dt: f64) -> f64 {
        let field = Decay { rate };
        let mut stepper = Rk4::new();
        let mut t = 0.0;
        let mut y = State::new(1.0, 0.0, 0.0);
        let steps = (duration / dt).round() as usize;
        for _ in 0..steps {
            stepper.step(&field, &mut t, &mut y, dt);
        }
        y.x
    }

    #[test]
    fn rk4_matches_exponential_decay() {
        let numeric = integrate_decay(1.0, 2.0, 0.01);
        assert_relative_eq!(numeric, (-2.0_f64).exp(), max_relative = 1e-9);
    }

    #[test]
    fn rk4_error_shrinks_as_fourth_order() {
        let exact = (-2.0_f64).exp();
        let error_h = (integrate_decay(1.0, 2.0, 0.1) - exact).abs();
        let error_half = (integrate_decay(1.0, 2.0, 0.05) - exact).abs();
        let ratio = error_h / error_half;
        // Halving the step should cut the error by ~2^4.
        assert!(
            (8.0..32.0).contains(&ratio),
            "expected ~16x error reduction, got {ratio}"
        );
    }

    #[test]
    fn rk4_advances_time_by_dt() {
        let field = Decay { rate: 1.0 };
        let mut stepper = Rk4::new();
        let mut t = 3.0;
        let mut y = State::new(1.0, 0.0, 0.0);
        stepper.step(&field, &mut t, &mut y, 0.25);
        assert_relative_eq!(t, 3.25);
    }
}
