//! Fog-of-war discovery around the traveler.
//! This module exists to keep sight rules isolated from route planning; it is
//! the only place unknown terrain becomes known. It does not touch any search
//! state and never removes anything from the impassable set.

use std::collections::{BTreeSet, VecDeque};

use crate::types::*;
use crate::world::World;

/// Breadth-first reveal outward from `center`, bounded by edge reachability
/// and by straight-line distance to the center. Every veiled node inside the
/// radius joins the impassable set. Sight passes through blocked nodes, and
/// the center itself is never classified: it is the traveler's own footing.
pub(crate) fn reveal_surroundings(
    world: &World,
    center: NodeId,
    radius: i32,
    impassable: &mut BTreeSet<NodeId>,
) {
    let center_pos = world.node(center).pos;
    let mut visited = BTreeSet::from([center]);
    let mut queue = VecDeque::from([center]);

    while let Some(current) = queue.pop_front() {
        for edge in world.neighbors(current) {
            let neighbor = edge.to;
            if visited.contains(&neighbor) {
                continue;
            }
            let pos = world.node(neighbor).pos;
            if !within_radius(center_pos, pos, radius) {
                continue;
            }
            visited.insert(neighbor);
            queue.push_back(neighbor);

            if let Terrain::Veiled(_) = world.node(neighbor).terrain {
                impassable.insert(neighbor);
            }
        }
    }
}

/// Euclidean radius check in squared integer form; no float rounding.
/// A negative radius sees nothing, same as comparing a real distance
/// against it would.
fn within_radius(center: Pos, pos: Pos, radius: i32) -> bool {
    if radius < 0 {
        return false;
    }
    let dx = i64::from(pos.x - center.x);
    let dy = i64::from(pos.y - center.y);
    let r = i64::from(radius);
    dx * dx + dy * dy <= r * r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::test_support::*;

    #[test]
    fn veiled_nodes_inside_the_radius_become_impassable() {
        let mut world = grid_world(5, 1, 1.0);
        let veiled = world.insert(Pos { x: 2, y: 0 }, Terrain::Veiled(OptionCode(2)));
        let center = world.node_at(Pos { x: 0, y: 0 }).unwrap();
        let mut impassable = BTreeSet::new();
        reveal_surroundings(&world, center, 3, &mut impassable);
        assert!(impassable.contains(&veiled));
    }

    #[test]
    fn nodes_beyond_the_euclidean_radius_stay_unknown() {
        let mut world = grid_world(6, 1, 1.0);
        let far = world.insert(Pos { x: 4, y: 0 }, Terrain::Veiled(OptionCode(2)));
        let center = world.node_at(Pos { x: 0, y: 0 }).unwrap();
        let mut impassable = BTreeSet::new();
        reveal_surroundings(&world, center, 3, &mut impassable);
        assert!(!impassable.contains(&far));
    }

    #[test]
    fn radius_is_euclidean_not_manhattan() {
        // (2,2) is Manhattan 4 but Euclidean sqrt(8) < 3 from the origin.
        let mut world = grid_world(3, 3, 1.0);
        let corner = world.insert(Pos { x: 2, y: 2 }, Terrain::Veiled(OptionCode(2)));
        let center = world.node_at(Pos { x: 0, y: 0 }).unwrap();
        let mut impassable = BTreeSet::new();
        reveal_surroundings(&world, center, 3, &mut impassable);
        assert!(impassable.contains(&corner));
    }

    #[test]
    fn discovery_is_bounded_by_edge_reachability() {
        // Two disconnected islands: the second is inside the radius but has
        // no edge path from the center, so it is never visited.
        let mut world = grid_world(2, 1, 1.0);
        let island = world.insert(Pos { x: 0, y: 1 }, Terrain::Veiled(OptionCode(2)));
        let center = world.node_at(Pos { x: 0, y: 0 }).unwrap();
        let mut impassable = BTreeSet::new();
        reveal_surroundings(&world, center, 5, &mut impassable);
        assert!(!impassable.contains(&island));
    }

    #[test]
    fn sight_passes_through_blocked_nodes() {
        let mut world = grid_world(3, 1, 1.0);
        let wall = world.insert(Pos { x: 1, y: 0 }, Terrain::Wall);
        let behind = world.insert(Pos { x: 2, y: 0 }, Terrain::Veiled(OptionCode(4)));
        let center = world.node_at(Pos { x: 0, y: 0 }).unwrap();
        let mut impassable = BTreeSet::from([wall]);
        reveal_surroundings(&world, center, 2, &mut impassable);
        assert!(impassable.contains(&behind), "walls do not block line of sight");
    }

    #[test]
    fn the_center_itself_is_never_classified() {
        let mut world = grid_world(2, 1, 1.0);
        let center = world.insert(Pos { x: 0, y: 0 }, Terrain::Veiled(OptionCode(3)));
        let mut impassable = BTreeSet::new();
        reveal_surroundings(&world, center, 2, &mut impassable);
        assert!(!impassable.contains(&center));
    }

    #[test]
    fn a_negative_radius_reveals_nothing() {
        let mut world = grid_world(3, 1, 1.0);
        let veiled = world.insert(Pos { x: 1, y: 0 }, Terrain::Veiled(OptionCode(2)));
        let center = world.node_at(Pos { x: 0, y: 0 }).unwrap();
        let mut impassable = BTreeSet::new();
        reveal_surroundings(&world, center, -1, &mut impassable);
        assert!(!impassable.contains(&veiled));
        assert!(impassable.is_empty());
    }

    #[test]
    fn repeated_reveals_never_shrink_the_impassable_set() {
        let mut world = grid_world(4, 1, 1.0);
        let veiled = world.insert(Pos { x: 1, y: 0 }, Terrain::Veiled(OptionCode(2)));
        let near = world.node_at(Pos { x: 0, y: 0 }).unwrap();
        let far = world.node_at(Pos { x: 3, y: 0 }).unwrap();
        let mut impassable = BTreeSet::new();
        reveal_surroundings(&world, near, 2, &mut impassable);
        assert!(impassable.contains(&veiled));
        // A later reveal from a position that cannot see the node must not
        // revert the discovery.
        reveal_surroundings(&world, far, 1, &mut impassable);
        assert!(impassable.contains(&veiled));
    }
}
