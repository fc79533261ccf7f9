//! Shared test fixtures for the `journey` submodule test suites.
//! This module exists to avoid repeating world construction across many
//! tests. It does not own production traversal logic.

use crate::types::*;
use crate::world::World;

/// Open width x height grid with 4-connected unit-cost edges.
pub(crate) fn grid_world(width: i32, height: i32, cost: Cost) -> World {
    let mut world = World::new();
    for y in 0..height {
        for x in 0..width {
            world.insert(Pos { x, y }, Terrain::Open);
        }
    }
    for y in 0..height {
        for x in 0..width {
            if x + 1 < width {
                world.connect(Pos { x, y }, Pos { x: x + 1, y }, cost);
            }
            if y + 1 < height {
                world.connect(Pos { x, y }, Pos { x, y: y + 1 }, cost);
            }
        }
    }
    world
}

/// Straight unit-cost corridor along y = 0.
pub(crate) fn corridor_world(length: i32) -> World {
    grid_world(length, 1, 1.0)
}

pub(crate) fn corridor_ids(world: &World, length: i32) -> Vec<NodeId> {
    (0..length)
        .map(|x| world.node_at(Pos { x, y: 0 }).expect("corridor node must exist"))
        .collect()
}
