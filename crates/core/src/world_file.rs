//! Loaders for the node and edge input files.
//!
//! Node file: the first line is the map boundary (unused here, skipped);
//! every further line is `x y type` with type 0 = open, 1 = wall, >= 2 a
//! veiled obstacle class.
//!
//! Edge file: one line per undirected edge, `x1-y1,x2-y2 cost`. Lines that
//! reference a coordinate the node file never declared are skipped: that is
//! a data-integrity fault of the collaborator, not a reason to fail the run.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::types::*;
use crate::world::World;

#[derive(Debug)]
pub enum WorldFileError {
    Io(io::Error),
    /// A line could not be parsed; `line` is 1-indexed.
    Parse { line: usize, message: String },
}

impl fmt::Display for WorldFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "world file I/O error: {e}"),
            Self::Parse { line, message } => write!(f, "invalid world file line {line}: {message}"),
        }
    }
}

impl std::error::Error for WorldFileError {}

impl From<io::Error> for WorldFileError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> WorldFileError {
    WorldFileError::Parse { line, message: message.into() }
}

/// Load the node table into a fresh world.
pub fn load_nodes(path: &Path) -> Result<World, WorldFileError> {
    let content = fs::read_to_string(path)?;
    let mut world = World::new();
    // Line 1 is the boundary declaration; the graph does not need it.
    for (index, line) in content.lines().enumerate().skip(1) {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let x = parse_i32(parts.next(), line_number, "x")?;
        let y = parse_i32(parts.next(), line_number, "y")?;
        let code = parts
            .next()
            .ok_or_else(|| parse_error(line_number, "missing terrain type"))?
            .parse::<u32>()
            .map_err(|e| parse_error(line_number, format!("bad terrain type: {e}")))?;
        world.insert(Pos { x, y }, Terrain::from_code(code));
    }
    Ok(world)
}

/// Attach the edge list to an already-loaded world.
pub fn load_edges(path: &Path, world: &mut World) -> Result<(), WorldFileError> {
    let content = fs::read_to_string(path)?;
    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let (pair, cost_text) = line
            .split_once(' ')
            .ok_or_else(|| parse_error(line_number, "expected `x1-y1,x2-y2 cost`"))?;
        let (a_text, b_text) = pair
            .split_once(',')
            .ok_or_else(|| parse_error(line_number, "expected two comma-separated endpoints"))?;
        let a = parse_pos(a_text, line_number)?;
        let b = parse_pos(b_text, line_number)?;
        let cost: Cost = cost_text
            .trim()
            .parse()
            .map_err(|e| parse_error(line_number, format!("bad cost: {e}")))?;
        // Undeclared endpoints: skip the edge, keep loading.
        if world.node_at(a).is_none() || world.node_at(b).is_none() {
            continue;
        }
        world.connect(a, b, cost);
    }
    Ok(())
}

fn parse_pos(text: &str, line: usize) -> Result<Pos, WorldFileError> {
    let (x, y) = text
        .split_once('-')
        .ok_or_else(|| parse_error(line, format!("expected `x-y`, found `{text}`")))?;
    Ok(Pos {
        x: x.parse().map_err(|e| parse_error(line, format!("bad x coordinate: {e}")))?,
        y: y.parse().map_err(|e| parse_error(line, format!("bad y coordinate: {e}")))?,
    })
}

fn parse_i32(part: Option<&str>, line: usize, what: &str) -> Result<i32, WorldFileError> {
    part.ok_or_else(|| parse_error(line, format!("missing {what}")))?
        .parse()
        .map_err(|e| parse_error(line, format!("bad {what}: {e}")))
}
