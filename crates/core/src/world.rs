//! Arena-backed undirected weighted graph over coordinate-identified nodes.
//! This module exists so graph structure stays separate from search state and
//! traversal policy. It does not own the impassable set or any per-search data.

use std::collections::{BTreeMap, BTreeSet};

use slotmap::SlotMap;

use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub to: NodeId,
    pub cost: Cost,
}

#[derive(Clone, Debug)]
pub struct Node {
    pub pos: Pos,
    pub terrain: Terrain,
    edges: Vec<Edge>,
    // Direct neighbor -> weight lookup for cost accounting. First weight wins
    // when the edge file repeats a pair.
    weights: BTreeMap<NodeId, Cost>,
}

impl Node {
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Nodes and edges are created at build time and never removed; after that
/// only terrain mutates, and only through [`World::clear_terrain_class`].
#[derive(Clone, Debug, Default)]
pub struct World {
    nodes: SlotMap<NodeId, Node>,
    by_pos: BTreeMap<Pos, NodeId>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node, or re-type it if the coordinate already exists.
    /// Re-insertion keeps the node's identity and edges (last write wins for
    /// terrain, matching the node-table semantics of the input format).
    pub fn insert(&mut self, pos: Pos, terrain: Terrain) -> NodeId {
        if let Some(&id) = self.by_pos.get(&pos) {
            self.nodes[id].terrain = terrain;
            return id;
        }
        let id = self.nodes.insert(Node { pos, terrain, edges: Vec::new(), weights: BTreeMap::new() });
        self.by_pos.insert(pos, id);
        id
    }

    pub fn node_at(&self, pos: Pos) -> Option<NodeId> {
        self.by_pos.get(&pos).copied()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append an undirected edge, lazily creating absent endpoints as open
    /// vertices. Duplicate edges are tolerated: search takes the better route
    /// implicitly, and the weight cache keeps the first weight seen.
    pub fn connect(&mut self, a: Pos, b: Pos, cost: Cost) {
        let a_id = self.node_at(a).unwrap_or_else(|| self.insert(a, Terrain::Open));
        let b_id = self.node_at(b).unwrap_or_else(|| self.insert(b, Terrain::Open));
        self.nodes[a_id].edges.push(Edge { to: b_id, cost });
        self.nodes[b_id].edges.push(Edge { to: a_id, cost });
        self.nodes[a_id].weights.entry(b_id).or_insert(cost);
        self.nodes[b_id].weights.entry(a_id).or_insert(cost);
    }

    pub fn neighbors(&self, id: NodeId) -> &[Edge] {
        &self.nodes[id].edges
    }

    /// Cached weight of the direct edge `a`-`b`, if one was ever added.
    pub fn travel_cost(&self, a: NodeId, b: NodeId) -> Option<Cost> {
        self.nodes[a].weights.get(&b).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }

    /// Every node that is impassable before any discovery happens.
    pub fn initial_impassable(&self) -> BTreeSet<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.terrain == Terrain::Wall)
            .map(|(id, _)| id)
            .collect()
    }

    /// Permanently clear every node of the given veiled class, returning the
    /// flipped ids so the caller can drop them from its impassable set.
    pub fn clear_terrain_class(&mut self, code: OptionCode) -> Vec<NodeId> {
        let mut cleared = Vec::new();
        for (id, node) in self.nodes.iter_mut() {
            if node.terrain == Terrain::Veiled(code) {
                node.terrain = Terrain::Open;
                cleared.push(id);
            }
        }
        cleared
    }
}
