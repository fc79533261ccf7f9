//! Shortest-path search over the world graph.
//! This module exists so route computation stays reusable across the
//! replanning loop and the option evaluator. It does not own the impassable
//! set or decide what happens when no route exists.

use std::collections::BTreeSet;

use slotmap::SecondaryMap;

use super::heap::FrontierHeap;
use crate::types::*;
use crate::world::World;

#[derive(Clone, Copy)]
struct Scratch {
    g: Cost,
    came_from: Option<NodeId>,
}

/// A* from `start` to `goal`, treating `blocked` nodes as impassable.
///
/// Returns the path start..=goal, or `None` when no route exists. The
/// heuristic is Manhattan distance, admissible as long as edge costs
/// dominate the Manhattan distance between their endpoints; input data that
/// violates this loses the optimality guarantee, not correctness.
///
/// Search state lives in a scratch map allocated per call, so back-to-back
/// searches are independent by construction. The blocked predicate applies
/// to neighbor expansion only: a blocked goal is simply never reached.
pub(crate) fn astar(
    world: &World,
    start: NodeId,
    goal: NodeId,
    blocked: &BTreeSet<NodeId>,
) -> Option<Vec<NodeId>> {
    let goal_pos = world.node(goal).pos;
    let mut scratch: SecondaryMap<NodeId, Scratch> = SecondaryMap::new();
    let mut closed: BTreeSet<NodeId> = BTreeSet::new();
    let mut open = FrontierHeap::new();

    scratch.insert(start, Scratch { g: 0.0, came_from: None });
    open.push(start, manhattan(world.node(start).pos, goal_pos));

    while let Some((current, _)) = open.pop() {
        if current == goal {
            return Some(reconstruct(&scratch, goal));
        }
        closed.insert(current);

        let current_g = scratch[current].g;
        for edge in world.neighbors(current) {
            let neighbor = edge.to;
            if blocked.contains(&neighbor) || closed.contains(&neighbor) {
                continue;
            }

            let tentative = current_g + edge.cost;
            let known = scratch.get(neighbor).map_or(Cost::INFINITY, |s| s.g);
            if tentative < known {
                scratch.insert(neighbor, Scratch { g: tentative, came_from: Some(current) });
                let f = tentative + manhattan(world.node(neighbor).pos, goal_pos);
                if open.contains(neighbor) {
                    open.update(neighbor, f);
                } else {
                    open.push(neighbor, f);
                }
            }
        }
    }

    None
}

fn reconstruct(scratch: &SecondaryMap<NodeId, Scratch>, goal: NodeId) -> Vec<NodeId> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(prev) = scratch[current].came_from {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Total travel time of a path: the sum of direct edge weights along it.
/// `None` if some consecutive pair has no direct edge, which only happens on
/// inconsistent collaborator data; callers treat that as unroutable.
pub(crate) fn travel_time(world: &World, path: &[NodeId]) -> Option<Cost> {
    let mut total = 0.0;
    for pair in path.windows(2) {
        total += world.travel_cost(pair[0], pair[1])?;
    }
    Some(total)
}

pub(crate) fn manhattan(a: Pos, b: Pos) -> Cost {
    Cost::from(a.x.abs_diff(b.x) + a.y.abs_diff(b.y))
}
