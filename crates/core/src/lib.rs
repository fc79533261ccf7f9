pub mod journey;
pub mod log_file;
pub mod mission_file;
pub mod types;
pub mod world;
pub mod world_file;

pub use journey::{Journey, JourneyError};
pub use types::*;
pub use world::{Edge, Node, World};
