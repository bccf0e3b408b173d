use nalgebra::Vector3;

/// State of the co-culture: producer density, consumer density and metabolite
/// concentration, in that order.
pub type State = Vector3<f64>;

/// Right-hand side of a three-state ordinary differential equation.
pub trait VectorField {
    /// Evaluates the vector field dy/dt at time `t` and state `y`.
    fn eval(&self, t: f64, y: &State) -> State;
}

/// A fixed-step scheme that advances a `VectorField` forward in time.
pub trait Stepper {
    /// Performs one step of size `dt`.
    /// `t` and `y` are updated in place.
    fn step(&mut self, field: &impl VectorField, t: &mut f64, y: &mut State, dt: f64);
}
