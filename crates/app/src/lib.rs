//! CLI wiring for the fogpath engine: load the three input files, run the
//! mission, write the event log. Kept as a library entry so integration
//! tests can drive the exact code path the binary uses.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fogpath_core::Journey;
use fogpath_core::log_file::{EventLogWriter, LogFormat};
use fogpath_core::mission_file::load_mission;
use fogpath_core::world_file::{load_edges, load_nodes};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Node file: boundary line, then `x y type` per node
    pub nodes: PathBuf,
    /// Edge file: `x1-y1,x2-y2 cost` per line
    pub edges: PathBuf,
    /// Mission file: radius, start, then one objective per line
    pub mission: PathBuf,
    /// Event log output path
    pub log: PathBuf,
    /// Write the event log as JSONL instead of text lines
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug)]
pub struct RunSummary {
    pub objectives_reached: u32,
    pub events_written: usize,
    pub event_digest: u64,
}

pub fn run(args: &Args) -> Result<RunSummary> {
    let mut world = load_nodes(&args.nodes)
        .with_context(|| format!("failed to load node file {}", args.nodes.display()))?;
    load_edges(&args.edges, &mut world)
        .with_context(|| format!("failed to load edge file {}", args.edges.display()))?;
    let mission = load_mission(&args.mission)
        .with_context(|| format!("failed to load mission file {}", args.mission.display()))?;

    let mut journey = Journey::new(world, mission.start, mission.sight_radius)
        .context("mission start is not a declared node")?;
    journey.run(&mission.objectives);

    let format = if args.json { LogFormat::Jsonl } else { LogFormat::Text };
    let mut writer = EventLogWriter::create(&args.log, format)
        .with_context(|| format!("failed to create log file {}", args.log.display()))?;
    writer.append_all(journey.events()).context("failed to write the event log")?;

    Ok(RunSummary {
        objectives_reached: journey.objectives_reached(),
        events_written: journey.events().len(),
        event_digest: journey.event_digest(),
    })
}
