use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct NodeId;
}

/// Edge weights and accumulated travel times. The input files carry decimal
/// costs, so this stays a float; orderings go through `f64::total_cmp`.
pub type Cost = f64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for Pos {
    /// The wire form shared by the edge file and the event log: `x-y`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

/// Terrain-class code of a veiled obstacle, as written in the node and
/// mission files. Codes below 2 never name an option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OptionCode(pub u32);

impl fmt::Display for OptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terrain {
    /// Walkable ground.
    Open,
    /// Impassable and known to be so from the start.
    Wall,
    /// Looks open until seen; becomes impassable once revealed. The code
    /// names the obstacle class a wizard option can clear.
    Veiled(OptionCode),
}

impl Terrain {
    /// Decode the integer terrain code used by the node file.
    pub fn from_code(code: u32) -> Terrain {
        match code {
            0 => Terrain::Open,
            1 => Terrain::Wall,
            n => Terrain::Veiled(OptionCode(n)),
        }
    }
}

/// One mission line: a goal to reach, plus the wizard options offered on
/// that line. Offered options apply to the *following* objective's goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Objective {
    pub goal: Pos,
    pub options: Vec<OptionCode>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mission {
    pub sight_radius: i32,
    pub start: Pos,
    pub objectives: Vec<Objective>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectiveOutcome {
    Reached,
    /// No route exists under current knowledge; the traveler stays put and
    /// the mission moves on to the next objective.
    Abandoned,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TravelEvent {
    Moved { to: Pos },
    ObjectiveReached { number: u32 },
    PathBlocked,
    OptionChosen { code: OptionCode },
    /// An option offer where no candidate opened a route. The log line keeps
    /// the historical `-1` sentinel.
    NoOptionViable,
}

impl fmt::Display for TravelEvent {
    /// Human-readable log lines, byte-compatible with the historical format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moved { to } => write!(f, "Moving to {to}"),
            Self::ObjectiveReached { number } => write!(f, "Objective {number} reached!"),
            Self::PathBlocked => write!(f, "Path is impassable!"),
            Self::OptionChosen { code } => write!(f, "Number {code} is chosen!"),
            Self::NoOptionViable => write!(f, "Number -1 is chosen!"),
        }
    }
}
