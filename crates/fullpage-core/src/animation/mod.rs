//! Animation math for panel properties
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing curves mapping [0, 1] to [0, 1]
//! - `timing` - Progress and interpolation on the engine clock
//!
//! ## L3 Molecular Layer
//! - `value` - `AnimatedValue`, a scalar that transitions between targets
//!
//! Times are `Duration`s measured from the start of the viewing session, so the
//! same code runs against the wall clock in the terminal and against a simulated
//! clock in tests.

// L4 Atomic Layer
pub mod easing;
pub mod timing;

// L3 Molecular Layer
pub mod value;

pub use value::{AnimatedValue, Motion};
