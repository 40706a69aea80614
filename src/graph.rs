//! Directed-graph substrate for reachability and finiteness analysis.

use crate::state::{StateId, StateSet};

/// A directed graph over dense state ids.
///
/// Nodes are `0..node_count`; parallel transitions on different symbols
/// collapse to a single edge, which is all reachability and cycle
/// detection need.
#[derive(Debug, Clone)]
pub(crate) struct StateGraph {
    succ: Vec<StateSet>,
}

impl StateGraph {
    pub fn with_nodes(nodes: usize) -> Self {
        Self {
            succ: vec![StateSet::empty(nodes); nodes],
        }
    }

    pub fn node_count(&self) -> usize {
        self.succ.len()
    }

    pub fn add_edge(&mut self, from: StateId, to: StateId) {
        self.succ[from as usize].insert(to);
    }

    fn successors_of(&self, node: StateId) -> std::vec::IntoIter<StateId> {
        self.succ[node as usize].iter().collect::<Vec<_>>().into_iter()
    }

    /// The graph with every edge reversed.
    pub fn reverse(&self) -> StateGraph {
        let mut reversed = StateGraph::with_nodes(self.node_count());
        for (from, successors) in self.succ.iter().enumerate() {
            for to in successors.iter() {
                reversed.add_edge(to, from as StateId);
            }
        }
        reversed
    }

    /// Nodes reachable from `start`, including `start` itself.
    pub fn reachable_from(&self, start: StateId) -> StateSet {
        let mut visited = StateSet::empty(self.node_count());
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if visited.contains(node) {
                continue;
            }
            visited.insert(node);
            for next in self.succ[node as usize].iter() {
                if !visited.contains(next) {
                    stack.push(next);
                }
            }
        }
        visited
    }

    /// Union of `reachable_from` over every node in `starts`.
    pub fn reachable_from_all(&self, starts: &StateSet) -> StateSet {
        let mut visited = StateSet::empty(self.node_count());
        let mut stack: Vec<StateId> = starts.iter().collect();
        while let Some(node) = stack.pop() {
            if visited.contains(node) {
                continue;
            }
            visited.insert(node);
            for next in self.succ[node as usize].iter() {
                if !visited.contains(next) {
                    stack.push(next);
                }
            }
        }
        visited
    }

    /// The induced subgraph over `keep`: nodes outside it lose all
    /// incident edges and become isolated.
    pub fn induced_subgraph(&self, keep: &StateSet) -> StateGraph {
        let mut induced = StateGraph::with_nodes(self.node_count());
        for (from, successors) in self.succ.iter().enumerate() {
            if !keep.contains(from as StateId) {
                continue;
            }
            for to in successors.iter() {
                if keep.contains(to) {
                    induced.add_edge(from as StateId, to);
                }
            }
        }
        induced
    }

    /// DFS back-edge test with a visited set and an on-stack set,
    /// using an explicit stack.
    pub fn has_cycle(&self) -> bool {
        let nodes = self.node_count();
        let mut visited = StateSet::empty(nodes);
        let mut on_stack = StateSet::empty(nodes);
        let mut stack: Vec<(StateId, std::vec::IntoIter<StateId>)> = Vec::new();

        for root in 0..nodes as StateId {
            if visited.contains(root) {
                continue;
            }
            visited.insert(root);
            on_stack.insert(root);
            stack.push((root, self.successors_of(root)));

            while let Some((node, mut successors)) = stack.pop() {
                if let Some(next) = successors.next() {
                    stack.push((node, successors));
                    if on_stack.contains(next) {
                        return true;
                    }
                    if !visited.contains(next) {
                        visited.insert(next);
                        on_stack.insert(next);
                        stack.push((next, self.successors_of(next)));
                    }
                } else {
                    on_stack.remove(node);
                }
            }
        }
        false
    }
}
