//! Parameter resolution: defaults, then a TOML file, then per-field flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use icurve_core::{ParameterField, Parameters, SliderSpec};

/// Environment variable naming a TOML parameter file, used when `--params`
/// is not given.
pub const PARAMS_ENV: &str = "ICURVE_PARAMS";

#[derive(Args, Debug, Default, Clone)]
pub struct ParamArgs {
    /// TOML parameter file (falls back to $ICURVE_PARAMS)
    #[arg(long, global = true, value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Initial value of the state variable
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub i0: Option<f64>,

    /// Saturation scale (must be > 0)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub n: Option<f64>,

    /// Time-step scale of the growth term
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub tau: Option<f64>,

    /// Decay rate per step
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub gamma: Option<f64>,

    /// Growth-rate coefficient
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub lambda: Option<f64>,

    /// Carried through; does not affect the trajectory
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub alpha: Option<f64>,

    /// Round every parameter to its nearest slider position
    #[arg(long, global = true)]
    pub snap: bool,
}

impl ParamArgs {
    /// Resolve the effective parameter set. Does not validate it; the engine
    /// reports invalid fields itself.
    pub fn resolve(&self) -> Result<Parameters> {
        let path = self
            .params
            .clone()
            .or_else(|| std::env::var_os(PARAMS_ENV).map(PathBuf::from));

        let mut params = match path {
            Some(path) => load_file(&path)?,
            None => Parameters::default(),
        };

        for (field, value) in self.overrides() {
            params = params.with(field, value);
        }

        if self.snap {
            for field in ParameterField::ALL {
                let snapped = SliderSpec::for_field(field).snap(params.get(field));
                params = params.with(field, snapped);
            }
        }

        tracing::debug!(?params, "resolved parameters");
        Ok(params)
    }

    fn overrides(&self) -> impl Iterator<Item = (ParameterField, f64)> {
        [
            (ParameterField::I0, self.i0),
            (ParameterField::N, self.n),
            (ParameterField::Tau, self.tau),
            (ParameterField::Gamma, self.gamma),
            (ParameterField::Lambda, self.lambda),
            (ParameterField::Alpha, self.alpha),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
    }
}

pub fn load_file(path: &Path) -> Result<Parameters> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    tracing::debug!("loaded parameter file {}", path.display());
    parse_toml(&content).with_context(|| format!("invalid parameter file {}", path.display()))
}

pub fn parse_toml(content: &str) -> Result<Parameters> {
    Ok(toml::from_str(content)?)
}

pub fn to_toml(params: &Parameters) -> Result<String> {
    toml::to_string(params).context("failed to serialize parameters")
}
