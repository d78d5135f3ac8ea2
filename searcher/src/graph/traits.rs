use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Keys which can name a node in a graph.
///
/// Anything string-like works, as do integers.
pub trait Node: Debug + Display + Clone + Eq + Hash + Ord {}

impl<T> Node for T where T: Debug + Display + Clone + Eq + Hash + Ord {}

/// The topology of a directed graph, as seen by a search.
///
/// This is the only view of the graph the uninformed searches need,
/// so both the weighted and unweighted graphs provide it.
pub trait Adjacency {
    type Node: Node;

    fn contains_node(&self, node: &Self::Node) -> bool;

    /// Every node in the graph, leaves included.
    fn nodes(&self) -> Box<dyn Iterator<Item = &Self::Node> + '_>;

    /// Children reachable through one outgoing edge.
    ///
    /// Unknown nodes have no children.
    fn children(&self, node: &Self::Node) -> Box<dyn Iterator<Item = &Self::Node> + '_>;
}
