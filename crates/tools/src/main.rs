//! Seeded scenario generator: writes a consistent node/edge/mission file
//! triple for manual runs and benchmarking.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 20)]
    width: i32,
    #[arg(long, default_value_t = 20)]
    height: i32,
    /// Rough percentage of cells that are walls
    #[arg(long, default_value_t = 15)]
    wall_pct: u64,
    /// Rough percentage of cells that are veiled obstacles
    #[arg(long, default_value_t = 10)]
    veiled_pct: u64,
    #[arg(long, default_value_t = 5)]
    objectives: usize,
    /// Output directory for nodes.txt, edges.txt and mission.txt
    #[arg(short, long, default_value = "scenario")]
    out: PathBuf,
}

fn roll(rng: &mut ChaCha8Rng, bound: u64) -> u64 {
    rng.next_u64() % bound
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    // Terrain codes per cell. The start cell stays open so every mission is
    // at least well-formed.
    let mut nodes = format!("{} {}\n", args.width, args.height);
    for y in 0..args.height {
        for x in 0..args.width {
            let pct = roll(&mut rng, 100);
            let code = if (x, y) == (0, 0) {
                0
            } else if pct < args.wall_pct {
                1
            } else if pct < args.wall_pct + args.veiled_pct {
                // A small palette of veiled classes so wizard options matter.
                2 + roll(&mut rng, 3)
            } else {
                0
            };
            nodes.push_str(&format!("{x} {y} {code}\n"));
        }
    }

    // 4-connected grid edges with small integer-ish weights at or above the
    // Manhattan step, keeping the heuristic admissible.
    let mut edges = String::new();
    for y in 0..args.height {
        for x in 0..args.width {
            if x + 1 < args.width {
                let w = 1.0 + roll(&mut rng, 4) as f64 * 0.5;
                edges.push_str(&format!("{x}-{y},{}-{y} {w:.1}\n", x + 1));
            }
            if y + 1 < args.height {
                let w = 1.0 + roll(&mut rng, 4) as f64 * 0.5;
                edges.push_str(&format!("{x}-{y},{x}-{} {w:.1}\n", y + 1));
            }
        }
    }

    let radius = 2 + roll(&mut rng, 3);
    let mut mission = format!("{radius}\n0 0\n");
    for _ in 0..args.objectives {
        let gx = roll(&mut rng, args.width as u64);
        let gy = roll(&mut rng, args.height as u64);
        mission.push_str(&format!("{gx} {gy}"));
        // Most lines offer no options; some offer two or three classes.
        if roll(&mut rng, 100) < 30 {
            for _ in 0..(2 + roll(&mut rng, 2)) {
                mission.push_str(&format!(" {}", 2 + roll(&mut rng, 3)));
            }
        }
        mission.push('\n');
    }

    fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create {}", args.out.display()))?;
    fs::write(args.out.join("nodes.txt"), nodes).context("failed to write nodes.txt")?;
    fs::write(args.out.join("edges.txt"), edges).context("failed to write edges.txt")?;
    fs::write(args.out.join("mission.txt"), mission).context("failed to write mission.txt")?;

    println!(
        "Wrote scenario (seed {}, {}x{}) to {}",
        args.seed,
        args.width,
        args.height,
        args.out.display()
    );
    Ok(())
}
