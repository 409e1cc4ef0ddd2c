use std::collections::{BTreeMap, VecDeque};

use crate::model::topology::{NodeId, Topology};

/// Up to `cutoff` edge-disjoint simple paths between `src` and `dst`,
/// as node sequences, shortest first (ties broken lexicographically).
///
/// Unit-capacity max-flow over the undirected graph: BFS augmenting paths,
/// bounded at `cutoff` augmentations, then flow decomposition. Neighbors are
/// visited in ascending id order, so the result is deterministic for a given
/// topology.
pub fn edge_disjoint_paths(
    topology: &Topology,
    src: NodeId,
    dst: NodeId,
    cutoff: usize,
) -> Vec<Vec<NodeId>> {
    if src == dst || cutoff == 0 {
        return Vec::new();
    }

    // Each undirected edge contributes one unit of capacity per direction.
    let mut residual: BTreeMap<(NodeId, NodeId), i32> = BTreeMap::new();
    for edge in 0..topology.num_edges() {
        if let Some((a, b)) = topology.endpoints(edge as u32) {
            residual.insert((a, b), 1);
            residual.insert((b, a), 1);
        }
    }

    let mut flow: BTreeMap<(NodeId, NodeId), i32> = BTreeMap::new();
    let mut found = 0;
    while found < cutoff {
        let Some(path) = augmenting_path(topology, src, dst, &residual) else {
            break;
        };
        for pair in path.windows(2) {
            let (u, v) = (pair[0], pair[1]);
            *residual.entry((u, v)).or_insert(0) -= 1;
            *residual.entry((v, u)).or_insert(0) += 1;
            *flow.entry((u, v)).or_insert(0) += 1;
            *flow.entry((v, u)).or_insert(0) -= 1;
        }
        found += 1;
    }

    let mut paths = decompose_flow(topology, src, dst, flow, found);
    paths.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    paths
}

fn augmenting_path(
    topology: &Topology,
    src: NodeId,
    dst: NodeId,
    residual: &BTreeMap<(NodeId, NodeId), i32>,
) -> Option<Vec<NodeId>> {
    let mut parent: BTreeMap<NodeId, NodeId> = BTreeMap::new();
    let mut queue = VecDeque::from([src]);
    parent.insert(src, src);

    while let Some(u) = queue.pop_front() {
        if u == dst {
            break;
        }
        for v in topology.neighbors(u) {
            if parent.contains_key(&v) {
                continue;
            }
            if residual.get(&(u, v)).copied().unwrap_or(0) <= 0 {
                continue;
            }
            parent.insert(v, u);
            queue.push_back(v);
        }
    }

    if !parent.contains_key(&dst) {
        return None;
    }

    let mut reversed = vec![dst];
    let mut current = dst;
    while current != src {
        current = parent.get(&current).copied()?;
        reversed.push(current);
    }
    reversed.reverse();
    Some(reversed)
}

/// Walks the net flow from `src` to `dst` once per augmentation, consuming
/// arcs as it goes. Flow conservation guarantees every walk reaches `dst`;
/// any cycle a walk wanders through is spliced out.
fn decompose_flow(
    topology: &Topology,
    src: NodeId,
    dst: NodeId,
    mut flow: BTreeMap<(NodeId, NodeId), i32>,
    count: usize,
) -> Vec<Vec<NodeId>> {
    let mut paths = Vec::with_capacity(count);
    for _ in 0..count {
        let mut walk = vec![src];
        let mut current = src;
        while current != dst {
            let Some(next) = topology
                .neighbors(current)
                .find(|v| flow.get(&(current, *v)).copied().unwrap_or(0) > 0)
            else {
                break;
            };
            *flow.entry((current, next)).or_insert(0) -= 1;
            walk.push(next);
            current = next;
        }
        if current != dst {
            break;
        }
        paths.push(splice_loops(walk));
    }
    paths
}

fn splice_loops(walk: Vec<NodeId>) -> Vec<NodeId> {
    let mut out: Vec<NodeId> = Vec::with_capacity(walk.len());
    for node in walk {
        if let Some(pos) = out.iter().position(|seen| *seen == node) {
            out.truncate(pos);
        }
        out.push(node);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> Topology {
        let mut topology = Topology::new();
        topology.add_edge("a", "b").expect("edge");
        topology.add_edge("b", "c").expect("edge");
        topology
    }

    fn diamond() -> Topology {
        let mut topology = Topology::new();
        topology.add_edge("a", "b").expect("edge");
        topology.add_edge("b", "d").expect("edge");
        topology.add_edge("a", "c").expect("edge");
        topology.add_edge("c", "d").expect("edge");
        topology
    }

    fn complete4() -> Topology {
        let mut topology = Topology::new();
        let labels = ["a", "b", "c", "d"];
        for i in 0..labels.len() {
            for j in (i + 1)..labels.len() {
                topology.add_edge(labels[i], labels[j]).expect("edge");
            }
        }
        topology
    }

    #[test]
    fn line_yields_single_path() {
        let topology = line();
        let paths = edge_disjoint_paths(&topology, 0, 2, 3);
        assert_eq!(paths, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn diamond_yields_two_disjoint_paths() {
        let topology = diamond();
        // a=0 b=1 d=2 c=3
        let paths = edge_disjoint_paths(&topology, 0, 2, 3);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], vec![0, 1, 2]);
        assert_eq!(paths[1], vec![0, 3, 2]);

        let mut used = std::collections::BTreeSet::new();
        for path in &paths {
            for pair in path.windows(2) {
                let edge = topology.edge_between(pair[0], pair[1]).expect("edge id");
                assert!(used.insert(edge), "paths share edge {edge}");
            }
        }
    }

    #[test]
    fn complete_graph_yields_three_paths() {
        let topology = complete4();
        let paths = edge_disjoint_paths(&topology, 0, 3, 3);
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[0], vec![0, 3], "direct edge comes first");

        let mut used = std::collections::BTreeSet::new();
        for path in &paths {
            for pair in path.windows(2) {
                let edge = topology.edge_between(pair[0], pair[1]).expect("edge id");
                assert!(used.insert(edge), "paths share edge {edge}");
            }
        }
    }

    #[test]
    fn cutoff_bounds_the_search() {
        let topology = complete4();
        let paths = edge_disjoint_paths(&topology, 0, 3, 2);
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn disconnected_nodes_yield_nothing() {
        let mut topology = Topology::new();
        topology.add_edge("a", "b").expect("edge");
        topology.add_edge("c", "d").expect("edge");
        assert!(edge_disjoint_paths(&topology, 0, 3, 3).is_empty());
    }

    #[test]
    fn search_is_deterministic() {
        let topology = complete4();
        let first = edge_disjoint_paths(&topology, 1, 2, 3);
        let second = edge_disjoint_paths(&topology, 1, 2, 3);
        assert_eq!(first, second);
    }
}
