//! Slider bounds for each parameter, and one-parameter sweeps across them.
//!
//! Every slider runs from 0 to its field's maximum in `SLIDER_STEPS` equal
//! steps. A sweep recomputes the trajectory at each position with the other
//! fields held fixed, which is what dragging one slider does interactively.

use serde::Serialize;

use crate::constants::{MAX_ALPHA, MAX_GAMMA, MAX_I0, MAX_LAMBDA, MAX_N, MAX_TAU, SLIDER_STEPS};
use crate::error::Result;
use crate::params::{ParameterField, Parameters};
use crate::trajectory::Trajectory;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SliderSpec {
    pub field: ParameterField,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderSpec {
    pub fn for_field(field: ParameterField) -> Self {
        let max = match field {
            ParameterField::I0 => MAX_I0,
            ParameterField::N => MAX_N,
            ParameterField::Tau => MAX_TAU,
            ParameterField::Gamma => MAX_GAMMA,
            ParameterField::Lambda => MAX_LAMBDA,
            ParameterField::Alpha => MAX_ALPHA,
        };
        Self {
            field,
            min: 0.0,
            max,
            step: max / SLIDER_STEPS as f64,
        }
    }

    pub fn all() -> [SliderSpec; 6] {
        ParameterField::ALL.map(Self::for_field)
    }

    /// Value at position `k`. Position `SLIDER_STEPS` and beyond is `max`.
    pub fn position(&self, k: usize) -> f64 {
        if k >= SLIDER_STEPS {
            return self.max;
        }
        (self.min + k as f64 * self.step).min(self.max)
    }

    /// The `SLIDER_STEPS + 1` positions from `min` to `max` inclusive.
    pub fn positions(self) -> impl ExactSizeIterator<Item = f64> + Clone {
        (0..SLIDER_STEPS + 1).map(move |k| self.position(k))
    }

    /// Nearest slider position to `value`, after clamping into range.
    /// NaN snaps to `min`.
    pub fn snap(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        let k = ((clamped - self.min) / self.step).round() as usize;
        self.position(k)
    }
}

/// Outcome of one sweep position.
#[derive(Clone, Debug)]
pub struct SweepPoint {
    pub value: f64,
    pub outcome: Result<Trajectory>,
}

/// Recompute the trajectory for each value of `field`, others fixed at `base`.
///
/// An invalid value (e.g. `N = 0`) fails only its own position.
pub fn sweep(
    base: Parameters,
    field: ParameterField,
    values: impl IntoIterator<Item = f64>,
) -> Vec<SweepPoint> {
    values
        .into_iter()
        .map(|value| SweepPoint {
            value,
            outcome: Trajectory::compute(base.with(field, value)),
        })
        .collect()
}

/// Sweep every `every`-th slider position of `field` (0 is treated as 1).
pub fn sweep_slider(base: Parameters, field: ParameterField, every: usize) -> Vec<SweepPoint> {
    let slider = SliderSpec::for_field(field);
    sweep(base, field, slider.positions().step_by(every.max(1)))
}
