mod config;
mod report;
mod server;

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use icurve_core::{ParameterField, Parameters, Trajectory, sweep_slider};
use rmcp::{ServiceExt, transport::stdio};

use crate::config::ParamArgs;

#[derive(Parser)]
#[command(
    name = "icurve",
    about = "Saturating growth-minus-decay trajectory engine CLI and MCP server"
)]
struct Cli {
    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(flatten)]
    params: ParamArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the trajectory for the resolved parameters
    Run {
        /// Output format
        #[arg(long, value_enum, default_value = "csv")]
        format: Format,
    },

    /// Print the default parameter set as TOML
    Defaults,

    /// Show the slider bounds for every parameter
    Sliders,

    /// Recompute the trajectory across one parameter's slider positions
    Sweep {
        /// Parameter to sweep (I0, N, tau, gamma, lambda, alpha)
        #[arg(long)]
        field: ParameterField,

        /// Use every K-th of the 101 slider positions
        #[arg(long, default_value_t = 10)]
        every: usize,
    },

    /// Start MCP server on stdio transport
    Serve,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// `t,I` rows
    Csv,
    /// Parameters, summary and `[t, I]` points
    Json,
    /// Human-readable summary
    Table,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Run { format } => cmd_run(&cli, *format),
        Commands::Defaults => cmd_defaults(),
        Commands::Sliders => cmd_sliders(),
        Commands::Sweep { field, every } => cmd_sweep(&cli, *field, *every),
        Commands::Serve => cmd_serve().await,
    }
}

fn cmd_run(cli: &Cli, format: Format) -> Result<()> {
    let params = cli.params.resolve()?;
    let trajectory = Trajectory::compute(params).context("failed to compute trajectory")?;

    let mut out = std::io::BufWriter::new(std::io::stdout().lock());
    match format {
        Format::Csv => report::write_csv(&mut out, &trajectory)?,
        Format::Json => {
            let json = report::trajectory_json(&trajectory, true);
            serde_json::to_writer_pretty(&mut out, &json)?;
            writeln!(out)?;
        }
        Format::Table => report::write_summary(&mut out, &trajectory)?,
    }
    out.flush()?;
    Ok(())
}

fn cmd_defaults() -> Result<()> {
    print!("{}", config::to_toml(&Parameters::default())?);
    Ok(())
}

fn cmd_sliders() -> Result<()> {
    let mut out = std::io::stdout().lock();
    report::write_sliders(&mut out)?;
    Ok(())
}

fn cmd_sweep(cli: &Cli, field: ParameterField, every: usize) -> Result<()> {
    let base = cli.params.resolve()?;
    let points = sweep_slider(base, field, every);
    let failed = points.iter().filter(|p| p.outcome.is_err()).count();
    if failed > 0 {
        tracing::warn!("{failed} of {} sweep positions were invalid", points.len());
    }

    let mut out = std::io::stdout().lock();
    report::write_sweep(&mut out, field, &points)?;
    Ok(())
}

async fn cmd_serve() -> Result<()> {
    tracing::info!("starting MCP server");

    let service = match server::IcurveServer::new().serve(stdio()).await {
        Ok(service) => service,
        Err(e) => {
            // stdin closed before the client finished initializing
            tracing::info!("MCP session ended before initialization: {e}");
            return Ok(());
        }
    };

    tokio::select! {
        reason = service.waiting() => {
            reason.context("MCP server task failed")?;
            tracing::info!("MCP server stopped");
        }
        _ = shutdown_signal() => {
            tracing::info!("received shutdown signal");
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
