//! Wizard-option evaluation: pick which veiled terrain class to clear.
//! This module exists to keep what-if simulation pure; it never mutates the
//! world or the live impassable set. Committing the winning option is the
//! journey loop's job.

use std::collections::BTreeSet;

use super::search;
use crate::types::*;
use crate::world::World;

/// Simulate clearing each candidate class and return the one whose route
/// from `start` to `goal` has the smallest finite travel time.
///
/// Already-committed codes can never win. A candidate with no route (or an
/// unpriceable one) is excluded. Ties resolve to the first minimum in scan
/// order. `None` means no candidate opens a route at all.
pub(crate) fn choose_option(
    world: &World,
    start: NodeId,
    goal: NodeId,
    impassable: &BTreeSet<NodeId>,
    committed: &BTreeSet<OptionCode>,
    candidates: &[OptionCode],
) -> Option<OptionCode> {
    let mut best: Option<(Cost, OptionCode)> = None;

    for &candidate in candidates {
        if committed.contains(&candidate) {
            continue;
        }

        // The simulation overlay: a snapshot of the impassable set with
        // every node of the candidate's class lifted out. The world itself
        // stays untouched, so nothing needs restoring afterwards.
        let mut blocked = impassable.clone();
        for (id, node) in world.iter() {
            if node.terrain == Terrain::Veiled(candidate) {
                blocked.remove(&id);
            }
        }

        let Some(path) = search::astar(world, start, goal, &blocked) else {
            continue;
        };
        let Some(time) = search::travel_time(world, &path) else {
            continue;
        };

        let better = match best {
            None => true,
            Some((best_time, _)) => time < best_time,
        };
        if better {
            best = Some((time, candidate));
        }
    }

    best.map(|(_, code)| code)
}
