/// Number of samples on the fixed time grid.
pub const GRID_LEN: usize = 1000;

/// Grid origin.
pub const GRID_START: f64 = 0.0;

/// Spacing between successive grid points.
pub const GRID_STEP: f64 = 0.001;

/// Magnitude bound on the growth exponent `I·λ·τ/N`.
/// exp(700) ≈ 1e304 is still finite; beyond it `1 - exp(-x)` is 1.0 in f64.
pub const MAX_EXPONENT: f64 = 700.0;

/// Number of discrete steps across each slider's range.
pub const SLIDER_STEPS: usize = 100;

// --- Reset defaults ---

pub const DEFAULT_I0: f64 = 1e3;
pub const DEFAULT_N: f64 = 1e6;
pub const DEFAULT_TAU: f64 = 1.0;
pub const DEFAULT_GAMMA: f64 = 0.0;
pub const DEFAULT_LAMBDA: f64 = 50.0;
pub const DEFAULT_ALPHA: f64 = 1.0;

// --- Slider maxima (all sliders start at 0) ---

pub const MAX_I0: f64 = 1e3;
pub const MAX_N: f64 = 1e6;
pub const MAX_TAU: f64 = 1.0;
pub const MAX_GAMMA: f64 = 1.0;
pub const MAX_LAMBDA: f64 = 50.0;
pub const MAX_ALPHA: f64 = 1.0;
