//! Loader for the mission file.
//!
//! Line 1: sight radius. Line 2: starting coordinate `x y`. Every further
//! line is one objective: goal `x y`, optionally followed by wizard option
//! codes that apply to the objective on the *next* line.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::types::*;

#[derive(Debug)]
pub enum MissionFileError {
    Io(io::Error),
    /// The file ends before the radius and start lines.
    MissingHeader,
    /// A line could not be parsed; `line` is 1-indexed.
    Parse { line: usize, message: String },
}

impl fmt::Display for MissionFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "mission file I/O error: {e}"),
            Self::MissingHeader => {
                write!(f, "mission file must start with a radius line and a start line")
            }
            Self::Parse { line, message } => {
                write!(f, "invalid mission file line {line}: {message}")
            }
        }
    }
}

impl std::error::Error for MissionFileError {}

impl From<io::Error> for MissionFileError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> MissionFileError {
    MissionFileError::Parse { line, message: message.into() }
}

pub fn load_mission(path: &Path) -> Result<Mission, MissionFileError> {
    let content = fs::read_to_string(path)?;
    let mut lines = content.lines().enumerate();

    let (_, radius_line) = lines.next().ok_or(MissionFileError::MissingHeader)?;
    let sight_radius: i32 = radius_line
        .trim()
        .parse()
        .map_err(|e| parse_error(1, format!("bad sight radius: {e}")))?;

    let (_, start_line) = lines.next().ok_or(MissionFileError::MissingHeader)?;
    let (start, rest) = parse_coordinate(start_line, 2)?;
    if !rest.is_empty() {
        return Err(parse_error(2, "start line must hold exactly `x y`"));
    }

    let mut objectives = Vec::new();
    for (index, line) in lines {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let (goal, rest) = parse_coordinate(line, line_number)?;
        let options = rest
            .iter()
            .map(|text| {
                text.parse::<u32>()
                    .map(OptionCode)
                    .map_err(|e| parse_error(line_number, format!("bad option code: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        objectives.push(Objective { goal, options });
    }

    Ok(Mission { sight_radius, start, objectives })
}

/// Parse `x y` off the front of a line, returning the remaining fields.
fn parse_coordinate(line: &str, line_number: usize) -> Result<(Pos, Vec<&str>), MissionFileError> {
    let mut parts = line.split_whitespace();
    let x = parts
        .next()
        .ok_or_else(|| parse_error(line_number, "missing x coordinate"))?
        .parse()
        .map_err(|e| parse_error(line_number, format!("bad x coordinate: {e}")))?;
    let y = parts
        .next()
        .ok_or_else(|| parse_error(line_number, "missing y coordinate"))?
        .parse()
        .map_err(|e| parse_error(line_number, format!("bad y coordinate: {e}")))?;
    Ok((Pos { x, y }, parts.collect()))
}
