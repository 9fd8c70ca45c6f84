//! Saturating growth-minus-decay recurrence engine.
//!
//! Computes the trajectory of a single scalar state `I` over a fixed time
//! grid `[0, 1)` sampled at step 0.001:
//!
//! ```text
//! I ← I + N·(1 − exp(−I·λ·τ / N)) − γ·I
//! ```
//!
//! Zero I/O and no process-wide state: each call is a pure function of its
//! [`Parameters`], safe to run concurrently from any number of callers.

pub mod constants;
pub mod engine;
pub mod error;
pub mod grid;
pub mod params;
pub mod slider;
pub mod trajectory;

pub use constants::{GRID_LEN, GRID_START, GRID_STEP, MAX_EXPONENT, SLIDER_STEPS};
pub use engine::{Samples, generate, growth, step};
pub use error::{EngineError, Result};
pub use grid::{time_at, times};
pub use params::{ParameterField, Parameters};
pub use slider::{SliderSpec, SweepPoint, sweep, sweep_slider};
pub use trajectory::{Sample, Trajectory};
