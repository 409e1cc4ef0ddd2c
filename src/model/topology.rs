use std::collections::{BTreeMap, BTreeSet};

use crate::error::TopologyError;

pub type NodeId = u32;
pub type EdgeId = u32;

/// Undirected graph with arbitrary node labels, indexed by dense ids.
///
/// Ids are assigned in insertion order and never change afterwards; the
/// structure is built once and treated as immutable by everything that
/// simulates on top of it.
#[derive(Debug, Default, Clone)]
pub struct Topology {
    labels: Vec<String>,
    node_ids: BTreeMap<String, NodeId>,
    edge_pairs: Vec<(NodeId, NodeId)>,
    edge_ids: BTreeMap<(NodeId, NodeId), EdgeId>,
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node label, returning its dense id. Idempotent.
    pub fn add_node(&mut self, label: &str) -> NodeId {
        if let Some(id) = self.node_ids.get(label) {
            return *id;
        }
        let id = self.labels.len() as NodeId;
        self.labels.push(label.to_string());
        self.node_ids.insert(label.to_string(), id);
        self.adjacency.entry(id).or_default();
        id
    }

    /// Registers an undirected edge, creating unknown endpoints on the fly.
    /// Re-adding an edge in either orientation returns the existing id.
    pub fn add_edge(&mut self, a: &str, b: &str) -> Result<EdgeId, TopologyError> {
        if a == b {
            return Err(TopologyError::SelfLoop(a.to_string()));
        }
        let a_id = self.add_node(a);
        let b_id = self.add_node(b);
        if let Some(id) = self.edge_between(a_id, b_id) {
            return Ok(id);
        }
        let id = self.edge_pairs.len() as EdgeId;
        self.edge_pairs.push((a_id, b_id));
        self.edge_ids.insert((a_id, b_id), id);
        self.adjacency.entry(a_id).or_default().insert(b_id);
        self.adjacency.entry(b_id).or_default().insert(a_id);
        Ok(id)
    }

    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.node_ids.get(label).copied()
    }

    pub fn label(&self, node: NodeId) -> Option<&str> {
        self.labels.get(node as usize).map(String::as_str)
    }

    /// Resolves the edge id for a node pair in either orientation.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.edge_ids
            .get(&(a, b))
            .or_else(|| self.edge_ids.get(&(b, a)))
            .copied()
    }

    pub fn endpoints(&self, edge: EdgeId) -> Option<(NodeId, NodeId)> {
        self.edge_pairs.get(edge as usize).copied()
    }

    /// Neighbors in ascending id order.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.get(&node).into_iter().flatten().copied()
    }

    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edge_pairs.len()
    }

    pub fn validate(&self) -> Result<(), TopologyError> {
        if self.labels.is_empty() {
            return Err(TopologyError::EmptyNodes);
        }
        if self.edge_pairs.is_empty() {
            return Err(TopologyError::EmptyEdges);
        }
        Ok(())
    }
}
