pub mod aerodynamics;
pub mod params;

pub use aerodynamics::{cross_section_area, drag_accel, drag_factor};
pub use params::{PhysicalParameters, AIR_DENSITY, DRAG_COEFFICIENT, GRAVITY};
