//! Rendering of trajectories, sweeps and sliders for the CLI and the MCP tools.

use std::io::Write;

use icurve_core::{ParameterField, SliderSpec, SweepPoint, Trajectory};

/// JSON summary of a trajectory; `points` holds `[t, I]` pairs when requested.
pub fn trajectory_json(trajectory: &Trajectory, include_points: bool) -> serde_json::Value {
    let mut json = serde_json::json!({
        "params": trajectory.params(),
        "len": trajectory.len(),
        "peak": trajectory.peak(),
        "min": trajectory.min(),
        "final": trajectory.last(),
    });
    if include_points {
        let points: Vec<[f64; 2]> = trajectory.points().map(|(t, v)| [t, v]).collect();
        json["points"] = serde_json::json!(points);
    }
    json
}

pub fn sweep_json(field: ParameterField, points: &[SweepPoint]) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = points
        .iter()
        .map(|p| match &p.outcome {
            Ok(t) => serde_json::json!({
                "value": p.value,
                "peak": t.peak(),
                "final": t.last(),
            }),
            Err(e) => serde_json::json!({
                "value": p.value,
                "error": e.to_string(),
            }),
        })
        .collect();
    serde_json::json!({
        "field": field,
        "count": entries.len(),
        "points": entries,
    })
}

pub fn sliders_json() -> serde_json::Value {
    serde_json::json!(SliderSpec::all())
}

pub fn write_csv(out: &mut impl Write, trajectory: &Trajectory) -> std::io::Result<()> {
    writeln!(out, "t,I")?;
    for (t, v) in trajectory.points() {
        writeln!(out, "{t:.3},{v}")?;
    }
    Ok(())
}

pub fn write_summary(out: &mut impl Write, trajectory: &Trajectory) -> std::io::Result<()> {
    let p = trajectory.params();
    let peak = trajectory.peak();
    let min = trajectory.min();
    let last = trajectory.last();
    writeln!(
        out,
        "params:  I0={} N={} tau={} gamma={} lambda={} alpha={}",
        p.i0, p.n, p.tau, p.gamma, p.lambda, p.alpha
    )?;
    writeln!(out, "samples: {}", trajectory.len())?;
    writeln!(out, "start:   {}", p.i0)?;
    writeln!(out, "peak:    {} at t={:.3}", peak.value, peak.time)?;
    writeln!(out, "min:     {} at t={:.3}", min.value, min.time)?;
    writeln!(out, "final:   {} at t={:.3}", last.value, last.time)?;
    Ok(())
}

pub fn write_sweep(
    out: &mut impl Write,
    field: ParameterField,
    points: &[SweepPoint],
) -> std::io::Result<()> {
    writeln!(out, "{field},peak,final")?;
    for p in points {
        match &p.outcome {
            Ok(t) => writeln!(out, "{},{},{}", p.value, t.peak().value, t.last().value)?,
            Err(e) => writeln!(out, "{},error,{e}", p.value)?,
        }
    }
    Ok(())
}

pub fn write_sliders(out: &mut impl Write) -> std::io::Result<()> {
    for s in SliderSpec::all() {
        writeln!(
            out,
            "{:<7} min={} max={} step={}",
            s.field.name(),
            s.min,
            s.max,
            s.step
        )?;
    }
    Ok(())
}
