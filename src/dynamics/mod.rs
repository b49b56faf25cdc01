pub mod model;
pub mod state;

pub use model::{BallisticModel, Derivative};
pub use state::{Deriv, Sample, State};
