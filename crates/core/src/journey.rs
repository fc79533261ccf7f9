//! Mission execution: replanning traversal over a partially known world.
//! This module exists to drive repeated searches as discovery invalidates
//! plans, and to commit wizard options between objectives. It does not parse
//! mission files or write the event log to disk.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use crate::types::*;
use crate::world::World;

mod heap;
mod options;
mod search;
mod visibility;

#[cfg(test)]
pub(crate) mod test_support;

#[derive(Debug, PartialEq, Eq)]
pub enum JourneyError {
    /// The mission names a starting coordinate the world never declared.
    UnknownStart(Pos),
}

impl fmt::Display for JourneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownStart(pos) => write!(f, "unknown starting coordinate {pos}"),
        }
    }
}

impl std::error::Error for JourneyError {}

enum TraverseOutcome {
    Completed,
    /// Discovery blocked a node on the remaining path; the traveler holds at
    /// the last confirmed step.
    Invalidated,
}

/// The traveler's engine. Owns the world, the set of currently-known-blocked
/// nodes, the traveler position, and the chronological event log.
pub struct Journey {
    world: World,
    impassable: BTreeSet<NodeId>,
    position: NodeId,
    sight_radius: i32,
    committed: BTreeSet<OptionCode>,
    events: Vec<TravelEvent>,
    objectives_reached: u32,
}

impl Journey {
    /// Set up at the starting coordinate and take the initial look around.
    pub fn new(world: World, start: Pos, sight_radius: i32) -> Result<Self, JourneyError> {
        let position = world.node_at(start).ok_or(JourneyError::UnknownStart(start))?;
        let mut impassable = world.initial_impassable();
        visibility::reveal_surroundings(&world, position, sight_radius, &mut impassable);
        Ok(Self {
            world,
            impassable,
            position,
            sight_radius,
            committed: BTreeSet::new(),
            events: Vec::new(),
            objectives_reached: 0,
        })
    }

    /// Run the whole mission. Options offered on one line are evaluated and
    /// committed just before the next line's goal is pursued.
    pub fn run(&mut self, objectives: &[Objective]) {
        let mut pending: Vec<OptionCode> = Vec::new();
        for objective in objectives {
            if !pending.is_empty() {
                self.commit_best_option(objective.goal, &pending);
            }
            pending.clone_from(&objective.options);
            self.pursue(objective.goal);
        }
    }

    /// Chase one goal through the replanning loop until it is reached or no
    /// route exists under current knowledge. An abandoned objective leaves
    /// the traveler where it stands; the mission then moves on.
    pub fn pursue(&mut self, goal: Pos) -> ObjectiveOutcome {
        // An undeclared goal coordinate is collaborator data rot; it degrades
        // to "no path" rather than a panic.
        let Some(goal_id) = self.world.node_at(goal) else {
            self.events.push(TravelEvent::PathBlocked);
            return ObjectiveOutcome::Abandoned;
        };

        loop {
            let Some(path) = search::astar(&self.world, self.position, goal_id, &self.impassable)
            else {
                self.events.push(TravelEvent::PathBlocked);
                return ObjectiveOutcome::Abandoned;
            };

            match self.traverse(path) {
                TraverseOutcome::Completed => {
                    self.objectives_reached += 1;
                    self.events
                        .push(TravelEvent::ObjectiveReached { number: self.objectives_reached });
                    return ObjectiveOutcome::Reached;
                }
                TraverseOutcome::Invalidated => {}
            }
        }
    }

    /// Walk a planned path step by step, revealing surroundings after every
    /// advance and checking the remaining suffix for freshly blocked nodes.
    /// The path is an owned snapshot: discovery mutates the impassable set
    /// while we iterate, never the sequence being walked.
    fn traverse(&mut self, path: Vec<NodeId>) -> TraverseOutcome {
        for (index, &step) in path.iter().enumerate() {
            if index > 0 {
                self.position = step;
                self.events.push(TravelEvent::Moved { to: self.world.node(step).pos });
            }
            visibility::reveal_surroundings(
                &self.world,
                step,
                self.sight_radius,
                &mut self.impassable,
            );
            if path[index + 1..].iter().any(|node| self.impassable.contains(node)) {
                self.events.push(TravelEvent::PathBlocked);
                return TraverseOutcome::Invalidated;
            }
        }
        TraverseOutcome::Completed
    }

    /// Evaluate the pending options against the upcoming goal and commit the
    /// winner for good. When nothing opens a route, the log gets the `-1`
    /// sentinel line and nothing is committed.
    fn commit_best_option(&mut self, goal: Pos, candidates: &[OptionCode]) {
        let Some(goal_id) = self.world.node_at(goal) else {
            return;
        };
        let Some(code) = options::choose_option(
            &self.world,
            self.position,
            goal_id,
            &self.impassable,
            &self.committed,
            candidates,
        ) else {
            self.events.push(TravelEvent::NoOptionViable);
            return;
        };

        self.committed.insert(code);
        self.events.push(TravelEvent::OptionChosen { code });
        for id in self.world.clear_terrain_class(code) {
            self.impassable.remove(&id);
        }
    }

    pub fn position(&self) -> Pos {
        self.world.node(self.position).pos
    }

    pub fn events(&self) -> &[TravelEvent] {
        &self.events
    }

    pub fn objectives_reached(&self) -> u32 {
        self.objectives_reached
    }

    pub fn is_known_impassable(&self, pos: Pos) -> bool {
        self.world.node_at(pos).is_some_and(|id| self.impassable.contains(&id))
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Stable digest of the event stream plus the final position, for
    /// determinism harnesses comparing repeated runs.
    pub fn event_digest(&self) -> u64 {
        let mut hasher = Xxh3::new();
        for event in &self.events {
            let line = event.to_string();
            hasher.write_usize(line.len());
            hasher.write(line.as_bytes());
        }
        let end = self.position();
        hasher.write_i32(end.x);
        hasher.write_i32(end.y);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    fn pos(x: i32, y: i32) -> Pos {
        Pos { x, y }
    }

    fn objective(goal: Pos, options: &[u32]) -> Objective {
        Objective { goal, options: options.iter().map(|&c| OptionCode(c)).collect() }
    }

    #[test]
    fn unknown_start_is_a_constructor_error() {
        let world = grid_world(2, 2, 1.0);
        let err = Journey::new(world, pos(9, 9), 2).err();
        assert_eq!(err, Some(JourneyError::UnknownStart(pos(9, 9))));
    }

    #[test]
    fn open_corridor_objective_is_reached_with_move_events() {
        let world = corridor_world(4);
        let mut journey = Journey::new(world, pos(0, 0), 2).expect("start exists");
        assert_eq!(journey.pursue(pos(3, 0)), ObjectiveOutcome::Reached);
        assert_eq!(
            journey.events(),
            &[
                TravelEvent::Moved { to: pos(1, 0) },
                TravelEvent::Moved { to: pos(2, 0) },
                TravelEvent::Moved { to: pos(3, 0) },
                TravelEvent::ObjectiveReached { number: 1 },
            ]
        );
        assert_eq!(journey.position(), pos(3, 0));
    }

    #[test]
    fn veiled_cell_discovered_at_start_forces_a_detour() {
        // The 3x3 scenario: (1,1) is a hidden obstacle on the initially
        // planned diagonal-free route; the initial look-around with radius 2
        // reveals it, and the plan routes around it in four unit steps.
        let mut world = grid_world(3, 3, 1.0);
        let trap = world.insert(pos(1, 1), Terrain::Veiled(OptionCode(2)));
        let mut journey = Journey::new(world, pos(0, 0), 2).expect("start exists");
        assert!(journey.is_known_impassable(pos(1, 1)));

        assert_eq!(journey.pursue(pos(2, 2)), ObjectiveOutcome::Reached);
        let moves: Vec<Pos> = journey
            .events()
            .iter()
            .filter_map(|e| match e {
                TravelEvent::Moved { to } => Some(*to),
                _ => None,
            })
            .collect();
        assert_eq!(moves.len(), 4, "detour still takes four unit steps");
        assert!(!moves.contains(&pos(1, 1)));
        let _ = trap;
    }

    #[test]
    fn invalidation_mid_path_replans_from_the_last_safe_step() {
        // Sight radius 1 on a 5-long corridor with a hidden obstacle at
        // x=3: the traveler discovers it only on reaching x=2, must emit a
        // blocked event there, and then has no other route.
        let mut world = grid_world(5, 1, 1.0);
        world.insert(pos(3, 0), Terrain::Veiled(OptionCode(2)));
        let mut journey = Journey::new(world, pos(0, 0), 1).expect("start exists");
        assert!(!journey.is_known_impassable(pos(3, 0)), "not visible from the start");

        assert_eq!(journey.pursue(pos(4, 0)), ObjectiveOutcome::Abandoned);
        assert_eq!(
            journey.events(),
            &[
                TravelEvent::Moved { to: pos(1, 0) },
                TravelEvent::Moved { to: pos(2, 0) },
                TravelEvent::PathBlocked,
                TravelEvent::PathBlocked,
            ],
            "one blocked event for the invalidation, one for the failed replan"
        );
        assert_eq!(journey.position(), pos(2, 0), "the traveler holds at the last safe step");
    }

    #[test]
    fn invalidation_with_an_alternative_route_reaches_the_goal() {
        // 4x2 grid, hidden obstacle at (2,0) discovered after the first
        // step; the replan detours through y=1 and still arrives.
        let mut world = grid_world(4, 2, 1.0);
        let trap = world.insert(pos(2, 0), Terrain::Veiled(OptionCode(2)));
        let mut journey = Journey::new(world, pos(0, 0), 1).expect("start exists");

        assert_eq!(journey.pursue(pos(3, 0)), ObjectiveOutcome::Reached);
        let reached_at = journey
            .events()
            .iter()
            .position(|e| matches!(e, TravelEvent::ObjectiveReached { .. }))
            .expect("objective reached");
        let blocked_at = journey
            .events()
            .iter()
            .position(|e| matches!(e, TravelEvent::PathBlocked))
            .expect("plan was invalidated once");
        assert!(blocked_at < reached_at, "reached must come after the replan");
        let moves: Vec<Pos> = journey
            .events()
            .iter()
            .filter_map(|e| match e {
                TravelEvent::Moved { to } => Some(*to),
                _ => None,
            })
            .collect();
        assert!(!moves.contains(&pos(2, 0)), "the blocked node is never stepped on");
        assert_eq!(journey.position(), pos(3, 0));
        let _ = trap;
    }

    #[test]
    fn unreachable_objective_is_abandoned_and_the_mission_continues() {
        // A wall splits the corridor; the far goal is hopeless but the near
        // goal afterwards still succeeds from the unchanged position.
        let mut world = grid_world(5, 1, 1.0);
        world.insert(pos(2, 0), Terrain::Wall);
        let mut journey = Journey::new(world, pos(0, 0), 1).expect("start exists");

        journey.run(&[objective(pos(4, 0), &[]), objective(pos(1, 0), &[])]);
        assert_eq!(
            journey.events(),
            &[
                TravelEvent::PathBlocked,
                TravelEvent::Moved { to: pos(1, 0) },
                TravelEvent::ObjectiveReached { number: 1 },
            ],
            "the counter only advances on success"
        );
        assert_eq!(journey.objectives_reached(), 1);
    }

    #[test]
    fn unknown_goal_degrades_to_an_abandoned_objective() {
        let world = corridor_world(3);
        let mut journey = Journey::new(world, pos(0, 0), 1).expect("start exists");
        assert_eq!(journey.pursue(pos(40, 40)), ObjectiveOutcome::Abandoned);
        assert_eq!(journey.events(), &[TravelEvent::PathBlocked]);
        assert_eq!(journey.position(), pos(0, 0));
    }

    #[test]
    fn options_offered_on_one_line_are_committed_before_the_next_goal() {
        // Corridor sealed by a veiled cell of class 5. The first objective
        // (in place) offers option 5; pursuing the second goal must first
        // commit it and then walk straight through.
        let mut world = grid_world(4, 1, 1.0);
        world.insert(pos(2, 0), Terrain::Veiled(OptionCode(5)));
        let mut journey = Journey::new(world, pos(0, 0), 3).expect("start exists");
        assert!(journey.is_known_impassable(pos(2, 0)));

        journey.run(&[objective(pos(0, 0), &[5]), objective(pos(3, 0), &[])]);
        assert_eq!(
            journey.events(),
            &[
                TravelEvent::ObjectiveReached { number: 1 },
                TravelEvent::OptionChosen { code: OptionCode(5) },
                TravelEvent::Moved { to: pos(1, 0) },
                TravelEvent::Moved { to: pos(2, 0) },
                TravelEvent::Moved { to: pos(3, 0) },
                TravelEvent::ObjectiveReached { number: 2 },
            ]
        );
        assert!(!journey.is_known_impassable(pos(2, 0)));
    }

    #[test]
    fn exhausted_option_offer_logs_the_sentinel_and_commits_nothing() {
        // Corridor sealed by class 5; the offer only holds class 9, which
        // exists nowhere. The offer line gets the -1 sentinel and the seal
        // stays in place, so the second goal is abandoned.
        let mut world = grid_world(4, 1, 1.0);
        world.insert(pos(2, 0), Terrain::Veiled(OptionCode(5)));
        let mut journey = Journey::new(world, pos(0, 0), 3).expect("start exists");

        journey.run(&[objective(pos(0, 0), &[9]), objective(pos(3, 0), &[])]);
        assert_eq!(
            journey.events(),
            &[
                TravelEvent::ObjectiveReached { number: 1 },
                TravelEvent::NoOptionViable,
                TravelEvent::PathBlocked,
            ]
        );
        assert!(journey.is_known_impassable(pos(2, 0)), "nothing was cleared");
        assert_eq!(journey.objectives_reached(), 1);
    }

    #[test]
    fn losing_candidate_stays_impassable_after_the_winner_commits() {
        // Two sealed lanes to the goal; class 7 is cheaper than class 5.
        // After choosing 7, class-5 nodes must remain blocked.
        let mut world = World::new();
        let at = pos;
        world.insert(at(0, 0), Terrain::Open);
        world.insert(at(3, 0), Terrain::Open);
        world.insert(at(1, 1), Terrain::Veiled(OptionCode(5)));
        world.insert(at(2, 1), Terrain::Open);
        world.connect(at(0, 0), at(1, 1), 4.0);
        world.connect(at(1, 1), at(2, 1), 3.0);
        world.connect(at(2, 1), at(3, 0), 3.0);
        world.insert(at(1, -1), Terrain::Veiled(OptionCode(7)));
        world.insert(at(2, -1), Terrain::Open);
        world.connect(at(0, 0), at(1, -1), 2.0);
        world.connect(at(1, -1), at(2, -1), 2.0);
        world.connect(at(2, -1), at(3, 0), 3.0);

        let mut journey = Journey::new(world, pos(0, 0), 5).expect("start exists");
        assert!(journey.is_known_impassable(pos(1, 1)));
        assert!(journey.is_known_impassable(pos(1, -1)));

        journey.run(&[objective(pos(0, 0), &[5, 7]), objective(pos(3, 0), &[])]);
        assert!(
            journey.events().contains(&TravelEvent::OptionChosen { code: OptionCode(7) }),
            "the cheaper lane must win: {:?}",
            journey.events()
        );
        assert!(journey.is_known_impassable(pos(1, 1)), "losing class stays blocked");
        assert!(!journey.is_known_impassable(pos(1, -1)));
        assert_eq!(journey.position(), pos(3, 0));
    }

    #[test]
    fn event_digest_is_stable_across_identical_runs() {
        let build = || {
            let mut world = grid_world(4, 2, 1.0);
            world.insert(pos(2, 0), Terrain::Veiled(OptionCode(2)));
            let mut journey = Journey::new(world, pos(0, 0), 1).expect("start exists");
            journey.run(&[objective(pos(3, 0), &[])]);
            journey.event_digest()
        };
        assert_eq!(build(), build());
    }
}
