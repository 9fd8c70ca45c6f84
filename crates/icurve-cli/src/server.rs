use icurve_core::{ParameterField, Parameters, Trajectory, sweep_slider};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters as ToolParams;
use rmcp::model::*;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::Deserialize;

use crate::report;

/// Stateless: every tool call computes from its own arguments.
#[derive(Clone)]
pub struct IcurveServer {
    tool_router: ToolRouter<Self>,
}

impl IcurveServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for IcurveServer {
    fn default() -> Self {
        Self::new()
    }
}

// --- Tool parameter types ---

/// Per-field overrides of the default parameter set. Omitted fields keep
/// their default (I0=1000, N=1e6, tau=1, gamma=0, lambda=50, alpha=1).
#[derive(Debug, Default, Deserialize, JsonSchema)]
struct ParamOverrides {
    /// Initial value of the state variable
    #[serde(rename = "I0")]
    i0: Option<f64>,
    /// Saturation scale, must be > 0
    #[serde(rename = "N")]
    n: Option<f64>,
    /// Time-step scale of the growth term
    tau: Option<f64>,
    /// Fraction of the state removed each step
    gamma: Option<f64>,
    /// Growth-rate coefficient
    lambda: Option<f64>,
    /// Accepted but has no effect on the trajectory
    alpha: Option<f64>,
}

impl ParamOverrides {
    fn resolve(&self) -> Parameters {
        [
            (ParameterField::I0, self.i0),
            (ParameterField::N, self.n),
            (ParameterField::Tau, self.tau),
            (ParameterField::Gamma, self.gamma),
            (ParameterField::Lambda, self.lambda),
            (ParameterField::Alpha, self.alpha),
        ]
        .into_iter()
        .fold(Parameters::default(), |p, (field, value)| match value {
            Some(v) => p.with(field, v),
            None => p,
        })
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct GenerateRequest {
    #[serde(flatten)]
    params: ParamOverrides,
    /// Include all 1000 `[t, I]` points (default true)
    include_points: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SweepRequest {
    /// Parameter to sweep: one of I0, N, tau, gamma, lambda, alpha
    field: String,
    #[serde(flatten)]
    params: ParamOverrides,
    /// Use every K-th of the 101 slider positions (default 10)
    every: Option<usize>,
}

fn json_result(value: &serde_json::Value) -> CallToolResult {
    CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value).unwrap_or_default(),
    )])
}

#[tool_router]
impl IcurveServer {
    #[tool(
        description = "Compute the 1000-sample trajectory of I over t = 0.000..0.999 under I <- I + N(1 - exp(-I*lambda*tau/N)) - gamma*I. Any omitted parameter takes its default. Returns params, peak, min, final sample and (unless include_points is false) all [t, I] points."
    )]
    async fn icurve_generate(
        &self,
        ToolParams(req): ToolParams<GenerateRequest>,
    ) -> Result<CallToolResult, McpError> {
        let params = req.params.resolve();
        let trajectory = Trajectory::compute(params)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        tracing::debug!(?params, "generated trajectory");
        Ok(json_result(&report::trajectory_json(
            &trajectory,
            req.include_points.unwrap_or(true),
        )))
    }

    #[tool(description = "Return the default (reset) parameter set.")]
    async fn icurve_defaults(&self) -> Result<CallToolResult, McpError> {
        let json = serde_json::json!(Parameters::default());
        Ok(json_result(&json))
    }

    #[tool(description = "List the slider bounds (min, max, step) for every parameter.")]
    async fn icurve_sliders(&self) -> Result<CallToolResult, McpError> {
        Ok(json_result(&report::sliders_json()))
    }

    #[tool(
        description = "Sweep one parameter across its slider positions with the others fixed, returning peak and final value per position. Positions that are invalid (N = 0) report an error entry instead."
    )]
    async fn icurve_sweep(
        &self,
        ToolParams(req): ToolParams<SweepRequest>,
    ) -> Result<CallToolResult, McpError> {
        let field: ParameterField = req
            .field
            .parse()
            .map_err(|e: String| McpError::invalid_params(e, None))?;
        let base = req.params.resolve();
        let points = sweep_slider(base, field, req.every.unwrap_or(10));
        Ok(json_result(&report::sweep_json(field, &points)))
    }
}

#[tool_handler]
impl ServerHandler for IcurveServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Computes trajectories of a single state variable I under saturating growth \
                 minus linear decay, on a fixed grid of 1000 points over t in [0, 1).\n\n\
                 - icurve_generate: one trajectory; omitted parameters take their defaults.\n\
                 - icurve_defaults: the reset parameter set.\n\
                 - icurve_sliders: the bounds each parameter is normally explored within.\n\
                 - icurve_sweep: how peak and final value respond to one parameter.\n\n\
                 N must be > 0 and every parameter finite and non-negative. alpha is accepted \
                 but currently has no effect."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_from_result(result: &CallToolResult) -> String {
        result
            .content
            .iter()
            .filter_map(|c| match &c.raw {
                RawContent::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }

    fn parse_result(result: &CallToolResult) -> serde_json::Value {
        let text = text_from_result(result);
        serde_json::from_str(&text).expect("handler should return valid JSON")
    }

    #[tokio::test]
    async fn test_generate_defaults() {
        let server = IcurveServer::new();
        let result = server
            .icurve_generate(ToolParams(GenerateRequest {
                params: ParamOverrides::default(),
                include_points: None,
            }))
            .await
            .unwrap();

        let json = parse_result(&result);
        assert_eq!(json["len"], 1000);
        assert_eq!(json["params"]["I0"], 1000.0);
        assert_eq!(json["points"].as_array().unwrap().len(), 1000);
    }

    #[tokio::test]
    async fn test_generate_decay_only() {
        let server = IcurveServer::new();
        let result = server
            .icurve_generate(ToolParams(GenerateRequest {
                params: ParamOverrides {
                    gamma: Some(0.1),
                    lambda: Some(0.0),
                    ..ParamOverrides::default()
                },
                include_points: Some(true),
            }))
            .await
            .unwrap();

        let json = parse_result(&result);
        let second = json["points"][1][1].as_f64().unwrap();
        assert!((second - 900.0).abs() < 1e-9);
        assert_eq!(json["peak"]["index"], 0);
    }

    #[tokio::test]
    async fn test_generate_without_points() {
        let server = IcurveServer::new();
        let result = server
            .icurve_generate(ToolParams(GenerateRequest {
                params: ParamOverrides::default(),
                include_points: Some(false),
            }))
            .await
            .unwrap();
        assert!(parse_result(&result).get("points").is_none());
    }

    #[tokio::test]
    async fn test_generate_rejects_zero_n() {
        let server = IcurveServer::new();
        let err = server
            .icurve_generate(ToolParams(GenerateRequest {
                params: ParamOverrides {
                    n: Some(0.0),
                    ..ParamOverrides::default()
                },
                include_points: None,
            }))
            .await
            .unwrap_err();
        assert!(err.message.contains("N"), "got: {}", err.message);
    }

    #[tokio::test]
    async fn test_defaults_tool() {
        let server = IcurveServer::new();
        let json = parse_result(&server.icurve_defaults().await.unwrap());
        assert_eq!(json["N"], 1e6);
        assert_eq!(json["lambda"], 50.0);
    }

    #[tokio::test]
    async fn test_sliders_tool() {
        let server = IcurveServer::new();
        let json = parse_result(&server.icurve_sliders().await.unwrap());
        let sliders = json.as_array().unwrap();
        assert_eq!(sliders.len(), 6);
        assert_eq!(sliders[0]["field"], "I0");
    }

    #[tokio::test]
    async fn test_sweep_tool() {
        let server = IcurveServer::new();
        let result = server
            .icurve_sweep(ToolParams(SweepRequest {
                field: "N".to_string(),
                params: ParamOverrides::default(),
                every: Some(50),
            }))
            .await
            .unwrap();
        let json = parse_result(&result);
        assert_eq!(json["count"], 3);
        assert!(json["points"][0].get("error").is_some());
        assert!(json["points"][2].get("peak").is_some());
    }

    #[tokio::test]
    async fn test_sweep_unknown_field() {
        let server = IcurveServer::new();
        let err = server
            .icurve_sweep(ToolParams(SweepRequest {
                field: "beta".to_string(),
                params: ParamOverrides::default(),
                every: None,
            }))
            .await
            .unwrap_err();
        assert!(err.message.contains("beta"));
    }

    #[test]
    fn test_tool_registration() {
        let server = IcurveServer::new();
        let info = server.get_info();

        assert!(info.instructions.is_some());
        assert!(info.capabilities.tools.is_some());
    }
}
