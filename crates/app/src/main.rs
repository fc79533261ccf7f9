use anyhow::Result;
use clap::Parser;
use fogpath_app::{Args, run};

fn main() -> Result<()> {
    let args = Args::parse();
    let summary = run(&args)?;
    println!(
        "Mission complete: {} objectives reached, {} events written (digest {:016x}).",
        summary.objectives_reached, summary.events_written, summary.event_digest
    );
    Ok(())
}
