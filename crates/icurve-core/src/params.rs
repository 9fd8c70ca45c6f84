use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ALPHA, DEFAULT_GAMMA, DEFAULT_I0, DEFAULT_LAMBDA, DEFAULT_N, DEFAULT_TAU,
};
use crate::error::{EngineError, Result};

/// Names the six scalar knobs of a [`Parameters`] set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterField {
    I0,
    N,
    #[serde(rename = "tau")]
    Tau,
    #[serde(rename = "gamma")]
    Gamma,
    #[serde(rename = "lambda")]
    Lambda,
    #[serde(rename = "alpha")]
    Alpha,
}

impl ParameterField {
    /// All fields in declaration order. Validation reports the first failure
    /// in this order.
    pub const ALL: [ParameterField; 6] = [
        ParameterField::I0,
        ParameterField::N,
        ParameterField::Tau,
        ParameterField::Gamma,
        ParameterField::Lambda,
        ParameterField::Alpha,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParameterField::I0 => "I0",
            ParameterField::N => "N",
            ParameterField::Tau => "tau",
            ParameterField::Gamma => "gamma",
            ParameterField::Lambda => "lambda",
            ParameterField::Alpha => "alpha",
        }
    }
}

impl fmt::Display for ParameterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParameterField {
    type Err = String;

    /// Case-insensitive. Accepts the short names `I` and `lam` as well.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "i0" | "i" => Ok(ParameterField::I0),
            "n" => Ok(ParameterField::N),
            "tau" => Ok(ParameterField::Tau),
            "gamma" => Ok(ParameterField::Gamma),
            "lambda" | "lam" => Ok(ParameterField::Lambda),
            "alpha" => Ok(ParameterField::Alpha),
            _ => Err(format!(
                "unknown parameter '{s}' (expected one of I0, N, tau, gamma, lambda, alpha)"
            )),
        }
    }
}

/// One parameter set for the recurrence.
///
/// `alpha` is carried through every interface but the recurrence never reads
/// it. Missing fields in a deserialized document take their default value;
/// unknown fields are rejected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    /// Initial value of the state variable.
    #[serde(rename = "I0", alias = "I")]
    pub i0: f64,
    /// Saturation scale. Must be strictly positive.
    #[serde(rename = "N")]
    pub n: f64,
    /// Time-step scale applied to the growth exponent.
    pub tau: f64,
    /// Fraction of the state removed each step.
    pub gamma: f64,
    /// Growth-rate coefficient.
    #[serde(alias = "lam")]
    pub lambda: f64,
    /// Inert.
    pub alpha: f64,
}

impl Default for Parameters {
    /// The reset parameter set: `I0=1000, N=1e6, tau=1, gamma=0, lambda=50, alpha=1`.
    fn default() -> Self {
        Self {
            i0: DEFAULT_I0,
            n: DEFAULT_N,
            tau: DEFAULT_TAU,
            gamma: DEFAULT_GAMMA,
            lambda: DEFAULT_LAMBDA,
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl Parameters {
    pub fn get(&self, field: ParameterField) -> f64 {
        match field {
            ParameterField::I0 => self.i0,
            ParameterField::N => self.n,
            ParameterField::Tau => self.tau,
            ParameterField::Gamma => self.gamma,
            ParameterField::Lambda => self.lambda,
            ParameterField::Alpha => self.alpha,
        }
    }

    /// Copy of `self` with one field replaced.
    pub fn with(mut self, field: ParameterField, value: f64) -> Self {
        match field {
            ParameterField::I0 => self.i0 = value,
            ParameterField::N => self.n = value,
            ParameterField::Tau => self.tau = value,
            ParameterField::Gamma => self.gamma = value,
            ParameterField::Lambda => self.lambda = value,
            ParameterField::Alpha => self.alpha = value,
        }
        self
    }

    /// Check every field is finite and non-negative, and that `N > 0`.
    /// Upper bounds are not enforced.
    pub fn validate(&self) -> Result<()> {
        for field in ParameterField::ALL {
            let value = self.get(field);
            if !value.is_finite() {
                return Err(EngineError::invalid(
                    field,
                    format!("must be finite, got {value}"),
                ));
            }
            if value < 0.0 {
                return Err(EngineError::invalid(
                    field,
                    format!("must be non-negative, got {value}"),
                ));
            }
            if field == ParameterField::N && value == 0.0 {
                return Err(EngineError::invalid(
                    field,
                    "must be > 0 (saturation scale divides the growth exponent)",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reset_values() {
        let p = Parameters::default();
        assert_eq!(p.i0, 1000.0);
        assert_eq!(p.n, 1e6);
        assert_eq!(p.tau, 1.0);
        assert_eq!(p.gamma, 0.0);
        assert_eq!(p.lambda, 50.0);
        assert_eq!(p.alpha, 1.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_zero_n_rejected() {
        let p = Parameters::default().with(ParameterField::N, 0.0);
        let err = p.validate().unwrap_err();
        assert_eq!(err.field(), ParameterField::N);
    }

    #[test]
    fn test_negative_fields_rejected_by_name() {
        for field in ParameterField::ALL {
            let p = Parameters::default().with(field, -1.0);
            let err = p.validate().unwrap_err();
            assert_eq!(err.field(), field, "expected {field} to be reported");
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let p = Parameters::default().with(ParameterField::Lambda, f64::NAN);
        assert_eq!(p.validate().unwrap_err().field(), ParameterField::Lambda);

        let p = Parameters::default().with(ParameterField::I0, f64::INFINITY);
        assert_eq!(p.validate().unwrap_err().field(), ParameterField::I0);
    }

    #[test]
    fn test_first_offending_field_reported() {
        let p = Parameters {
            gamma: -0.5,
            n: 0.0,
            ..Parameters::default()
        };
        assert_eq!(p.validate().unwrap_err().field(), ParameterField::N);

        let p = Parameters {
            i0: -1.0,
            alpha: -1.0,
            ..Parameters::default()
        };
        assert_eq!(p.validate().unwrap_err().field(), ParameterField::I0);
    }

    #[test]
    fn test_above_slider_max_accepted() {
        let p = Parameters::default().with(ParameterField::Gamma, 1.5);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_field_roundtrip() {
        for field in ParameterField::ALL {
            let p = Parameters::default().with(field, 0.25);
            assert_eq!(p.get(field), 0.25);
            assert_eq!(field.name().parse::<ParameterField>().unwrap(), field);
        }
    }

    #[test]
    fn test_field_parse_aliases() {
        assert_eq!("I".parse::<ParameterField>().unwrap(), ParameterField::I0);
        assert_eq!("lam".parse::<ParameterField>().unwrap(), ParameterField::Lambda);
        assert_eq!("GAMMA".parse::<ParameterField>().unwrap(), ParameterField::Gamma);
        assert!("beta".parse::<ParameterField>().is_err());
    }
}
