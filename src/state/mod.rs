//! State - Mutable Working State
//!
//! Values that change tick by tick and are owned by a single session.

mod accumulator_state;

pub use accumulator_state::*;
