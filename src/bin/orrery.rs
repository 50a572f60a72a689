use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use solar_orrery::config::{FileSource, OrreryConfig, Viewport, load_config};
use solar_orrery::export::frames::{CsvFrameSink, TextSink};
use solar_orrery::export::snapshots::write_snapshots_json;
use solar_orrery::export::writer_for_path;
use solar_orrery::scheduler::{RenderSink, Scheduler};
use solar_orrery::session::SolarSystemSession;

const DEFAULT_DATA: &str = "data/planets.yaml";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Animate a solar system and print or record body positions"
)]
struct Cli {
    /// Body data: YAML file, TOML file, or directory of TOML files
    #[arg(long)]
    data: Option<PathBuf>,

    /// Settings file (TOML); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many ticks (runs until interrupted when omitted)
    #[arg(long)]
    ticks: Option<u64>,

    /// Record frames as CSV to this path ('-' for stdout) instead of printing them
    #[arg(long)]
    output: Option<PathBuf>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Viewport width
    #[arg(long)]
    width: Option<f64>,

    /// Viewport height
    #[arg(long)]
    height: Option<f64>,

    /// Write every body, orbit, and position as JSON once the run ends
    #[arg(long)]
    snapshot_json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    solar_orrery::init_logging();
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let data = cli
        .data
        .clone()
        .or_else(|| config.data_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA));

    let mut session = SolarSystemSession::from_config(&config);
    let summary = session
        .load_from(&mut FileSource::new(&data))
        .with_context(|| format!("failed to load bodies from {}", data.display()))?;
    info!(
        planets = summary.planets,
        satellites = summary.satellites,
        data = %data.display(),
        "scene ready"
    );

    let session = match &cli.output {
        Some(path) => {
            let writer = writer_for_path(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            let (session, mut sink) =
                animate(session, CsvFrameSink::new(writer), &config, cli.ticks);
            let rows = sink
                .finish()
                .with_context(|| format!("failed to write frames to {}", path.display()))?;
            info!(rows, "frames recorded");
            session
        }
        None => animate(session, TextSink::new(io::stdout()), &config, cli.ticks).0,
    };

    if let Some(path) = &cli.snapshot_json {
        write_snapshots_json(path, &session)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

fn animate<S: RenderSink>(
    session: SolarSystemSession,
    sink: S,
    config: &OrreryConfig,
    ticks: Option<u64>,
) -> (SolarSystemSession, S) {
    let mut scheduler = Scheduler::from_config(session, sink, config);
    scheduler.run(ticks);
    scheduler.into_parts()
}

fn resolve_config(cli: &Cli) -> anyhow::Result<OrreryConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => OrreryConfig::default(),
    };
    if let Some(ms) = cli.tick_ms {
        config.tick_period_ms = ms;
    }
    let Viewport { width, height } = config.viewport;
    config.viewport = Viewport {
        width: cli.width.unwrap_or(width),
        height: cli.height.unwrap_or(height),
    };
    config.validate()?;
    Ok(config)
}
