use std::collections::BTreeMap;

use crate::error::TopologyError;
use crate::model::topology::{EdgeId, NodeId, Topology};
use crate::routing::disjoint::edge_disjoint_paths;

/// Candidate paths offered per node pair; action indices 0..2 select one.
pub const CANDIDATE_PATHS: usize = 3;

/// The candidate set for one node pair, in the catalog's stored orientation.
/// When the graph offers fewer than three disjoint routes the tail entries
/// repeat the first path; `genuine` records how many are real. Duplicates are
/// kept as-is so that every action index stays addressable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRoutes {
    pub paths: [Vec<EdgeId>; CANDIDATE_PATHS],
    pub genuine: usize,
}

/// Precomputed edge-disjoint candidate paths for every unordered node pair.
/// Built once per topology; read-only afterwards and safe to share across
/// engine instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathCatalog {
    routes: BTreeMap<(NodeId, NodeId), CandidateRoutes>,
}

impl PathCatalog {
    pub fn build(topology: &Topology) -> Result<Self, TopologyError> {
        topology.validate()?;

        let mut routes: BTreeMap<(NodeId, NodeId), CandidateRoutes> = BTreeMap::new();
        let num_nodes = topology.num_nodes() as NodeId;
        for s in 0..num_nodes {
            for t in 0..num_nodes {
                // The reverse orientation already carries this pair.
                if s == t || routes.contains_key(&(t, s)) {
                    continue;
                }

                let node_paths = edge_disjoint_paths(topology, s, t, CANDIDATE_PATHS);
                if node_paths.is_empty() {
                    return Err(TopologyError::NoRoute {
                        from: topology.label(s).unwrap_or_default().to_string(),
                        to: topology.label(t).unwrap_or_default().to_string(),
                    });
                }

                let genuine = node_paths.len().min(CANDIDATE_PATHS);
                let first = to_edge_ids(topology, &node_paths[0])?;
                let second = match node_paths.get(1) {
                    Some(nodes) => to_edge_ids(topology, nodes)?,
                    None => first.clone(),
                };
                let third = match node_paths.get(2) {
                    Some(nodes) => to_edge_ids(topology, nodes)?,
                    None => first.clone(),
                };

                routes.insert(
                    (s, t),
                    CandidateRoutes {
                        paths: [first, second, third],
                        genuine,
                    },
                );
            }
        }

        Ok(Self { routes })
    }

    /// The orientation under which a pair is filed, if any.
    pub fn normalize(&self, s: NodeId, t: NodeId) -> Option<(NodeId, NodeId)> {
        if self.routes.contains_key(&(s, t)) {
            Some((s, t))
        } else if self.routes.contains_key(&(t, s)) {
            Some((t, s))
        } else {
            None
        }
    }

    pub fn candidates(&self, s: NodeId, t: NodeId) -> Option<&CandidateRoutes> {
        self.routes.get(&self.normalize(s, t)?)
    }

    /// Edge sequence for an action index in {0, 1, 2}. Index 3 means "block"
    /// and is never looked up.
    pub fn route(&self, s: NodeId, t: NodeId, action: usize) -> Option<&[EdgeId]> {
        self.candidates(s, t)?.paths.get(action).map(Vec::as_slice)
    }

    pub fn num_pairs(&self) -> usize {
        self.routes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(NodeId, NodeId), &CandidateRoutes)> {
        self.routes.iter()
    }
}

fn to_edge_ids(topology: &Topology, nodes: &[NodeId]) -> Result<Vec<EdgeId>, TopologyError> {
    nodes
        .windows(2)
        .map(|pair| {
            topology
                .edge_between(pair[0], pair[1])
                .ok_or(TopologyError::MissingEdge(pair[0], pair[1]))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond_with_chord() -> Topology {
        // a-b-d and a-c-d plus the direct a-d edge: three disjoint routes.
        let mut topology = Topology::new();
        topology.add_edge("a", "b").expect("edge");
        topology.add_edge("b", "d").expect("edge");
        topology.add_edge("a", "c").expect("edge");
        topology.add_edge("c", "d").expect("edge");
        topology.add_edge("a", "d").expect("edge");
        topology
    }

    #[test]
    fn every_pair_has_exactly_three_candidates() {
        let topology = diamond_with_chord();
        let catalog = PathCatalog::build(&topology).expect("catalog");
        assert_eq!(catalog.num_pairs(), 6);
        for (_, candidates) in catalog.iter() {
            assert!(candidates.genuine >= 1);
            for path in &candidates.paths {
                assert!(!path.is_empty());
            }
        }
    }

    #[test]
    fn rich_pair_gets_three_distinct_paths() {
        let topology = diamond_with_chord();
        let catalog = PathCatalog::build(&topology).expect("catalog");
        // a=0, d=2
        let candidates = catalog.candidates(0, 2).expect("pair");
        assert_eq!(candidates.genuine, 3);
        assert_ne!(candidates.paths[0], candidates.paths[1]);
        assert_ne!(candidates.paths[1], candidates.paths[2]);
        assert_ne!(candidates.paths[0], candidates.paths[2]);
        // Direct edge is the shortest candidate.
        assert_eq!(candidates.paths[0], vec![4]);
    }

    #[test]
    fn sparse_pair_is_padded_with_the_first_path() {
        let mut topology = Topology::new();
        topology.add_edge("a", "b").expect("edge");
        topology.add_edge("b", "c").expect("edge");
        let catalog = PathCatalog::build(&topology).expect("catalog");

        let candidates = catalog.candidates(0, 2).expect("pair");
        assert_eq!(candidates.genuine, 1);
        assert_eq!(candidates.paths[0], vec![0, 1]);
        assert_eq!(candidates.paths[1], candidates.paths[0]);
        assert_eq!(candidates.paths[2], candidates.paths[0]);
    }

    #[test]
    fn lookup_normalizes_orientation() {
        let topology = diamond_with_chord();
        let catalog = PathCatalog::build(&topology).expect("catalog");
        assert_eq!(catalog.normalize(2, 0), Some((0, 2)));
        assert_eq!(catalog.candidates(2, 0), catalog.candidates(0, 2));
        assert_eq!(catalog.route(2, 0, 0), catalog.route(0, 2, 0));
    }

    #[test]
    fn disconnected_topology_fails_fast() {
        let mut topology = Topology::new();
        topology.add_edge("a", "b").expect("edge");
        topology.add_edge("c", "d").expect("edge");
        let err = PathCatalog::build(&topology).expect_err("no route");
        assert!(matches!(err, TopologyError::NoRoute { .. }));
    }

    #[test]
    fn build_is_deterministic() {
        let topology = diamond_with_chord();
        let first = PathCatalog::build(&topology).expect("catalog");
        let second = PathCatalog::build(&topology).expect("catalog");
        assert_eq!(first, second);
    }

    #[test]
    fn empty_topology_is_rejected() {
        let topology = Topology::new();
        assert_eq!(
            PathCatalog::build(&topology).expect_err("empty"),
            TopologyError::EmptyNodes
        );
    }
}
