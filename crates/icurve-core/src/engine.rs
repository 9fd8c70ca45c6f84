//! The recurrence engine.
//!
//! Each step applies
//!
//! ```text
//! I ← I + N·(1 − exp(−I·λ·τ / N)) − γ·I
//! ```
//!
//! an Euler step of saturating growth minus linear decay. For `I ≪ N` the
//! growth term is ≈ `I·λ·τ` (near-exponential); for `I ≫ N` it saturates at
//! `N`. `τ` rescales the growth step independently of the decay term.

use std::iter::FusedIterator;

use crate::constants::{GRID_LEN, MAX_EXPONENT};
use crate::error::Result;
use crate::params::Parameters;

/// Growth term `N·(1 − exp(−x))` with `x = I·λ·τ/N`.
///
/// Evaluated as `−N·expm1(−x)`. Always finite. For positive `x` the exponent
/// is capped at `MAX_EXPONENT`, where the term already equals `N`. For
/// negative `x` (only reachable once `gamma > 1` drives `I` below zero) the
/// exponent is capped so that `N·e^{|x|}` stays below `f64::MAX`.
pub fn growth(i: f64, params: &Parameters) -> f64 {
    let rate = params.lambda * params.tau / params.n;
    if rate == 0.0 || i == 0.0 {
        return 0.0;
    }
    let floor = MAX_EXPONENT
        .min(f64::MAX.ln() - params.n.ln() - 1.0)
        .max(0.0);
    let x = (i * rate).clamp(-floor, MAX_EXPONENT);
    -params.n * (-x).exp_m1()
}

/// One application of the update rule. `alpha` is not read.
///
/// Never yields NaN along a trajectory from validated parameters. Once `|I|`
/// exceeds `f64::MAX` the state is `±inf` and stays infinite; with
/// `gamma > 1` its sign alternates each step.
pub fn step(i: f64, params: &Parameters) -> f64 {
    i * (1.0 - params.gamma) + growth(i, params)
}

/// Lazy trajectory: yields exactly [`GRID_LEN`] samples, the first being `I0`.
///
/// Cloning a fresh `Samples` restarts the sequence; it holds no shared state.
#[derive(Clone, Debug)]
pub struct Samples {
    params: Parameters,
    current: f64,
    remaining: usize,
}

impl Samples {
    fn new(params: Parameters) -> Self {
        Self {
            params,
            current: params.i0,
            remaining: GRID_LEN,
        }
    }
}

impl Iterator for Samples {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        let value = self.current;
        self.remaining -= 1;
        // The update after the last sample is never observable, so skip it.
        if self.remaining > 0 {
            self.current = step(value, &self.params);
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Samples {}

impl FusedIterator for Samples {}

/// Validate `params` and return the lazy sample sequence.
///
/// Fails only with `InvalidParameter`; numeric magnitude never causes an error.
pub fn generate(params: Parameters) -> Result<Samples> {
    params.validate()?;
    Ok(Samples::new(params))
}
