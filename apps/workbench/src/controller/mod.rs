//! Controller layer: status modeling and the run action wiring.

pub mod events;
pub mod orchestration;
