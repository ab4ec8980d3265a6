use anyhow::Context;
use clap::Parser;
use generator::profile::build_channel_frame;
use log::info;
use scopecore::math::scalar::format_frequency;
use scopecore::zone::{SharedZoneEditor, ZoneEditor};
use serde::Serialize;
use session::model::{SessionSummary, ZoneScript};
use session::replay::replay;
use std::fs;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use workflow::config::{GridConfig, WorkflowConfig};
use workflow::runner::{Runner, WorkflowResult};

mod generator;
mod session;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline driver for the scope telemetry core")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 512)]
    target_width: usize,
    /// FFT size; frames longer than this are truncated
    #[arg(long, default_value_t = 1024)]
    spectrum_bins: usize,
    #[arg(long, default_value_t = 1280.0)]
    grid_width: f64,
    #[arg(long, default_value_t = 720.0)]
    grid_height: f64,
    #[arg(long, default_value_t = 12)]
    cells: u32,
    /// Seed for the synthetic telemetry noise
    #[arg(long)]
    seed: Option<u64>,
    /// Replay a YAML/JSON pointer script against the zone editor
    #[arg(long)]
    zone_script: Option<PathBuf>,
    /// Write a JSON report of the run
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report<'a> {
    scenario: Option<&'a str>,
    description: Option<&'a str>,
    workflow: &'a WorkflowResult,
    session: Option<&'a SessionSummary>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(
            args.target_width,
            args.spectrum_bins,
            GridConfig {
                width: args.grid_width,
                height: args.grid_height,
                cell_count: args.cells,
            },
        )
    };
    if let Some(seed) = args.seed {
        workflow_config.generator.seed = seed;
    }

    let generator = &workflow_config.generator;
    if let Some(banner) = generator.scenario_banner() {
        println!("{}", banner);
    }
    let frame = build_channel_frame(generator)?;
    let runner = Runner::new(&workflow_config);
    let result = runner.execute(&frame)?;

    let dominant = result
        .spectrum_peaks
        .iter()
        .max_by(|a, b| result.spectrum[**a].total_cmp(&result.spectrum[**b]))
        .map(|&bin| format_frequency(result.frequencies[bin]))
        .unwrap_or_else(|| "none".into());
    println!(
        "Offline run -> echo delay {:?}, correlation peaks {}, display width {}, dominant tone {}",
        result.estimated_delay,
        result.correlation_peaks.len(),
        result.display.len(),
        dominant
    );

    let session = match args.zone_script {
        Some(path) => {
            let script = ZoneScript::load(&path)?;
            let editor = SharedZoneEditor::new(ZoneEditor::new(workflow_config.grid_space()?));
            let runtime = TokioBuilder::new_current_thread()
                .enable_all()
                .build()
                .context("creating runtime for zone replay")?;
            let summary = runtime.block_on(replay(&script, &editor));
            info!(
                "zone {} replayed: {} processed, {} rejected",
                script.name, summary.events.processed, summary.events.rejected
            );
            println!(
                "Zone {} -> {} corners, closed {}",
                summary.record.name,
                summary.record.corners.len(),
                summary.closed
            );
            println!("{}", serde_json::to_string(&summary.record)?);
            Some(summary)
        }
        None => None,
    };

    if let Some(report_path) = args.report {
        let report = Report {
            scenario: workflow_config.generator.scenario.as_deref(),
            description: workflow_config.generator.description.as_deref(),
            workflow: &result,
            session: session.as_ref(),
        };
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory {}", parent.display()))?;
        }
        let body = serde_json::to_string_pretty(&report).context("serializing run report")?;
        fs::write(&report_path, body)
            .with_context(|| format!("writing report {}", report_path.display()))?;
    }

    Ok(())
}
