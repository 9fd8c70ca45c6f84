use serde::Serialize;

use crate::engine::generate;
use crate::error::Result;
use crate::grid::time_at;
use crate::params::Parameters;

/// A single grid point of a trajectory.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sample {
    pub index: usize,
    pub time: f64,
    pub value: f64,
}

/// Fully materialized trajectory for one parameter set.
/// Identical, value for value, to draining [`generate`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trajectory {
    params: Parameters,
    values: Vec<f64>,
}

impl Trajectory {
    pub fn compute(params: Parameters) -> Result<Self> {
        let values = generate(params)?.collect();
        Ok(Self { params, values })
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(t, I)` pairs in grid order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = (f64, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(k, &v)| (time_at(k), v))
    }

    /// Largest value; the earliest one on ties.
    pub fn peak(&self) -> Sample {
        self.extreme(|candidate, best| candidate > best)
    }

    /// Smallest value; the earliest one on ties.
    pub fn min(&self) -> Sample {
        self.extreme(|candidate, best| candidate < best)
    }

    /// The last emitted sample (t = 0.999).
    pub fn last(&self) -> Sample {
        Sample {
            index: self.values.len() - 1,
            time: time_at(self.values.len() - 1),
            value: self.values[self.values.len() - 1],
        }
    }

    fn extreme(&self, better: impl Fn(f64, f64) -> bool) -> Sample {
        let mut best = 0;
        for (k, &v) in self.values.iter().enumerate().skip(1) {
            if better(v, self.values[best]) {
                best = k;
            }
        }
        Sample {
            index: best,
            time: time_at(best),
            value: self.values[best],
        }
    }
}
