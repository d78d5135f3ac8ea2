//! Directed graphs with optional node and edge weights.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use log::info;

use crate::errors::{Result, SearchError};

mod edge;
mod path;
mod traits;

pub use edge::Edge;
use edge::check_weight;
pub use path::{Inadmissible, Solution};
pub use traits::{Adjacency, Node};

type Nodes<N> = BTreeMap<N, BTreeSet<N>>;

/// An unweighted directed graph.
///
/// Each node maps to the set of its children. Adding an edge
/// adds any endpoints which are missing.
#[derive(Debug, Clone)]
pub struct DiGraph<N>
where
    N: Node,
{
    name: String,
    nodes: Nodes<N>,
}

impl<N> DiGraph<N>
where
    N: Node,
{
    /// Create an empty graph
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            nodes: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a node, returning false if it was already present.
    pub fn add_node(&mut self, node: N) -> bool {
        if self.nodes.contains_key(&node) {
            info!("node {} was already in graph {:?}", node, self.name);
            return false;
        }
        self.nodes.insert(node, BTreeSet::new());
        true
    }

    /// Add a directed edge, creating either endpoint if needed.
    ///
    /// Returns `Ok(false)` when the edge already exists.
    pub fn add_edge(&mut self, parent: N, child: N) -> Result<bool> {
        let edge = Edge::new(parent, child)?;
        self.nodes.entry(edge.child.clone()).or_default();
        self.nodes.entry(edge.parent.clone()).or_default();
        Ok(self.link(&edge))
    }

    // Both endpoints must already be nodes.
    pub(crate) fn link(&mut self, edge: &Edge<N>) -> bool {
        let children = self
            .nodes
            .get_mut(&edge.parent)
            .expect("edge parent is a node");
        if !children.insert(edge.child.clone()) {
            info!("edge {} was already in graph {:?}", edge, self.name);
            return false;
        }
        true
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn contains_edge(&self, parent: &N, child: &N) -> bool {
        self.nodes
            .get(parent)
            .map(|c| c.contains(child))
            .unwrap_or(false)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn list_all_nodes(&self) -> BTreeSet<N> {
        self.nodes.keys().cloned().collect()
    }

    /// Nodes without any outgoing edges.
    pub fn list_leaf_nodes(&self) -> BTreeSet<N> {
        self.nodes
            .iter()
            .filter(|(_, children)| children.is_empty())
            .map(|(node, _)| node.clone())
            .collect()
    }

    /// A copy of the adjacency table.
    ///
    /// With `exclude_leaves`, nodes without children are left out, so
    /// use [DiGraph::list_all_nodes] to decide whether a node exists.
    pub fn get_adjacency(&self, exclude_leaves: bool) -> Nodes<N> {
        self.nodes
            .iter()
            .filter(|(_, children)| !(exclude_leaves && children.is_empty()))
            .map(|(node, children)| (node.clone(), children.clone()))
            .collect()
    }
}

impl<N> Adjacency for DiGraph<N>
where
    N: Node,
{
    type Node = N;

    fn contains_node(&self, node: &N) -> bool {
        DiGraph::contains_node(self, node)
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = &N> + '_> {
        Box::new(self.nodes.keys())
    }

    fn children(&self, node: &N) -> Box<dyn Iterator<Item = &N> + '_> {
        match self.nodes.get(node) {
            Some(children) => Box::new(children.iter()),
            None => Box::new(std::iter::empty()),
        }
    }
}

impl<N> fmt::Display for DiGraph<N>
where
    N: Node,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Graph: {}", self.name)?;
        for (node, children) in &self.nodes {
            if children.is_empty() {
                writeln!(f, "  {} (leaf)", node)?;
            } else {
                let names: Vec<String> = children.iter().map(|c| c.to_string()).collect();
                writeln!(f, "  {} --> {}", node, names.join(", "))?;
            }
        }
        Ok(())
    }
}

/// A directed graph with a heuristic weight on every node
/// and a cost on every edge.
///
/// Unlike [DiGraph], both endpoints of an edge must be added
/// before the edge, since each carries its own weight.
#[derive(Debug, Clone)]
pub struct WeightedDiGraph<N>
where
    N: Node,
{
    topology: DiGraph<N>,
    node_weights: BTreeMap<N, f64>,
    edge_weights: BTreeMap<N, BTreeMap<N, f64>>,
}

impl<N> WeightedDiGraph<N>
where
    N: Node,
{
    /// Create an empty graph
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            topology: DiGraph::new(name),
            node_weights: BTreeMap::new(),
            edge_weights: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.topology.name()
    }

    /// The unweighted structure of this graph.
    pub fn topology(&self) -> &DiGraph<N> {
        &self.topology
    }

    /// Add a node with a heuristic weight (an optimistic
    /// estimate of the cost to reach the goal from this node).
    ///
    /// Re-adding a node keeps the original weight.
    pub fn add_node(&mut self, node: N, weight: f64) -> Result<bool> {
        let weight = check_weight(weight)?;
        if !self.topology.add_node(node.clone()) {
            return Ok(false);
        }
        self.node_weights.insert(node, weight);
        Ok(true)
    }

    /// Add a weighted edge between two existing nodes.
    ///
    /// Re-adding an edge keeps the original weight.
    pub fn add_edge(&mut self, parent: N, child: N, weight: f64) -> Result<bool> {
        let weight = check_weight(weight)?;
        let edge = Edge::new(parent, child)?;
        for endpoint in &[&edge.parent, &edge.child] {
            if !self.topology.contains_node(endpoint) {
                return Err(SearchError::NodeNotFound(endpoint.to_string()));
            }
        }

        if !self.topology.link(&edge) {
            return Ok(false);
        }
        self.edge_weights
            .entry(edge.parent)
            .or_default()
            .insert(edge.child, weight);
        Ok(true)
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.topology.contains_node(node)
    }

    pub fn contains_edge(&self, parent: &N, child: &N) -> bool {
        self.topology.contains_edge(parent, child)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.topology.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topology.is_empty()
    }

    pub fn list_all_nodes(&self) -> BTreeSet<N> {
        self.topology.list_all_nodes()
    }

    pub fn list_leaf_nodes(&self) -> BTreeSet<N> {
        self.topology.list_leaf_nodes()
    }

    pub fn get_adjacency(&self, exclude_leaves: bool) -> Nodes<N> {
        self.topology.get_adjacency(exclude_leaves)
    }

    pub fn get_node_weight(&self, node: &N) -> Result<f64> {
        self.node_weights
            .get(node)
            .copied()
            .ok_or_else(|| SearchError::NodeNotFound(node.to_string()))
    }

    pub fn get_edge_weight(&self, parent: &N, child: &N) -> Result<f64> {
        self.edge_weights
            .get(parent)
            .and_then(|children| children.get(child))
            .copied()
            .ok_or_else(|| SearchError::EdgeNotFound(parent.to_string(), child.to_string()))
    }
}

impl<N> Adjacency for WeightedDiGraph<N>
where
    N: Node,
{
    type Node = N;

    fn contains_node(&self, node: &N) -> bool {
        self.topology.contains_node(node)
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = &N> + '_> {
        self.topology.nodes()
    }

    fn children(&self, node: &N) -> Box<dyn Iterator<Item = &N> + '_> {
        self.topology.children(node)
    }
}

impl<N> fmt::Display for WeightedDiGraph<N>
where
    N: Node,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Graph: {}", self.name())?;
        for (node, children) in &self.topology.nodes {
            let h = self.node_weights.get(node).copied().unwrap_or_default();
            if children.is_empty() {
                writeln!(f, "  {} [h={}] (leaf)", node, h)?;
                continue;
            }
            let edges: Vec<String> = children
                .iter()
                .map(|c| match self.get_edge_weight(node, c) {
                    Ok(w) => format!("{} ({})", c, w),
                    Err(_) => c.to_string(),
                })
                .collect();
            writeln!(f, "  {} [h={}] --> {}", node, h, edges.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample() -> DiGraph<&'static str> {
        let mut g = DiGraph::new("sample");
        g.add_edge("E", "C").unwrap();
        g.add_edge("E", "B").unwrap();
        g.add_edge("H", "A").unwrap();
        g
    }

    #[test]
    fn unweighted_edges_create_nodes() {
        let g = sample();
        assert_eq!(g.len(), 5);
        assert_eq!(
            g.list_all_nodes().into_iter().collect::<Vec<_>>(),
            vec!["A", "B", "C", "E", "H"]
        );
        assert_eq!(
            g.list_leaf_nodes().into_iter().collect::<Vec<_>>(),
            vec!["A", "B", "C"]
        );
        assert!(g.contains_edge(&"E", &"C"));
        assert!(!g.contains_edge(&"C", &"E"));
    }

    #[test]
    fn adjacency_copy() {
        let g = sample();
        let trimmed = g.get_adjacency(true);
        assert_eq!(trimmed.keys().copied().collect::<Vec<_>>(), vec!["E", "H"]);
        assert_eq!(
            trimmed[&"E"].iter().copied().collect::<Vec<_>>(),
            vec!["B", "C"]
        );

        let mut full = g.get_adjacency(false);
        assert_eq!(full.len(), 5);
        full.clear();

        // The copies must not alias the graph
        assert_eq!(g.len(), 5);
        assert!(g.contains_node(&"A"));
    }

    #[test]
    fn duplicates_are_ignored() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut g = sample();
        let before = g.get_adjacency(false);
        assert!(!g.add_node("E"));
        assert!(!g.add_edge("E", "C").unwrap());
        assert_eq!(g.get_adjacency(false), before);
    }

    #[test]
    fn self_loop_rejected() {
        let mut g = sample();
        let before = g.get_adjacency(false);
        assert!(matches!(g.add_edge("E", "E"), Err(SearchError::SelfLoop(_))));
        assert!(matches!(g.add_edge("Z", "Z"), Err(SearchError::SelfLoop(_))));
        assert_eq!(g.get_adjacency(false), before);
        assert!(!g.contains_node(&"Z"));
    }

    #[test]
    fn adjacency_trait() {
        let g = sample();
        let children: Vec<_> = Adjacency::children(&g, &"E").copied().collect();
        assert_eq!(children, vec!["B", "C"]);
        assert_eq!(Adjacency::children(&g, &"missing").count(), 0);
        assert_eq!(Adjacency::nodes(&g).count(), 5);
    }

    #[test]
    fn display() {
        let g = sample();
        let text = g.to_string();
        assert!(text.starts_with("Graph: sample\n"));
        assert!(text.contains("  E --> B, C\n"));
        assert!(text.contains("  A (leaf)\n"));
    }

    fn weighted() -> WeightedDiGraph<&'static str> {
        let mut g = WeightedDiGraph::new("weighted");
        for (node, h) in &[("E", 10.0), ("C", 5.0), ("A", 20.0), ("B", 3.0), ("H", 1.0)] {
            assert!(g.add_node(*node, *h).unwrap());
        }
        assert!(g.add_edge("E", "C", 23.0).unwrap());
        assert!(g.add_edge("E", "B", 10.0).unwrap());
        assert!(g.add_edge("H", "A", 2.0).unwrap());
        g
    }

    #[test]
    fn weighted_lookups() {
        let g = weighted();
        assert_eq!(g.get_node_weight(&"B").unwrap(), 3.0);
        assert_eq!(g.get_edge_weight(&"H", &"A").unwrap(), 2.0);
        assert!(matches!(
            g.get_node_weight(&"Q"),
            Err(SearchError::NodeNotFound(n)) if n == "Q"
        ));
        assert!(matches!(
            g.get_edge_weight(&"A", &"H"),
            Err(SearchError::EdgeNotFound(p, c)) if p == "A" && c == "H"
        ));
    }

    #[test]
    fn weighted_requires_endpoints() {
        let mut g = weighted();
        assert!(matches!(
            g.add_edge("E", "Q", 1.0),
            Err(SearchError::NodeNotFound(n)) if n == "Q"
        ));
        assert!(matches!(
            g.add_edge("Q", "E", 1.0),
            Err(SearchError::NodeNotFound(n)) if n == "Q"
        ));
        assert!(!g.contains_node(&"Q"));
    }

    #[test]
    fn weighted_rejects_bad_input() {
        let mut g = weighted();
        let before = g.get_adjacency(false);
        assert!(matches!(
            g.add_edge("C", "C", 1.0),
            Err(SearchError::SelfLoop(_))
        ));
        assert!(matches!(
            g.add_node("Z", f64::NAN),
            Err(SearchError::InvalidWeight(_))
        ));
        assert!(matches!(
            g.add_edge("C", "A", f64::INFINITY),
            Err(SearchError::InvalidWeight(_))
        ));
        assert_eq!(g.get_adjacency(false), before);
        assert!(!g.contains_node(&"Z"));
    }

    #[test]
    fn weighted_duplicates_keep_weights() {
        let mut g = weighted();
        let before = g.get_adjacency(false);
        assert!(!g.add_node("B", 99.0).unwrap());
        assert!(!g.add_edge("E", "B", 99.0).unwrap());
        assert_eq!(g.get_node_weight(&"B").unwrap(), 3.0);
        assert_eq!(g.get_edge_weight(&"E", &"B").unwrap(), 10.0);
        assert_eq!(g.get_adjacency(false), before);
    }

    #[test]
    fn weighted_display() {
        let g = weighted();
        let text = g.to_string();
        assert!(text.contains("  E [h=10] --> B (10), C (23)\n"));
        assert!(text.contains("  B [h=3] (leaf)\n"));
    }
}
