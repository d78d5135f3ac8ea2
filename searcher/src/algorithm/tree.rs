//! The search tree built up during a single search.

use std::collections::HashMap;

use log::debug;

use super::score::Cost;
use crate::graph::Node;

/// Parent links and path costs for every node a search has reached.
///
/// A node is reached exactly when it has an entry in the parent
/// table; there is no separate visited flag to fall out of date.
#[derive(Debug)]
pub struct SearchTree<N>
where
    N: Node,
{
    root: N,
    parents: HashMap<N, Option<N>>,
    costs: HashMap<N, Cost>,
}

impl<N> SearchTree<N>
where
    N: Node,
{
    pub fn new(root: N) -> Self {
        let mut parents = HashMap::new();
        let mut costs = HashMap::new();
        parents.insert(root.clone(), None);
        costs.insert(root.clone(), Cost::zero());
        Self {
            root,
            parents,
            costs,
        }
    }

    pub fn root(&self) -> &N {
        &self.root
    }

    pub fn is_reached(&self, node: &N) -> bool {
        self.parents.contains_key(node)
    }

    pub fn parent(&self, node: &N) -> Option<&N> {
        self.parents.get(node).and_then(|p| p.as_ref())
    }

    /// Cumulative cost from the root, for weighted searches.
    pub fn cost(&self, node: &N) -> Option<Cost> {
        self.costs.get(node).copied()
    }

    /// Number of reached nodes.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Record a parent for a node reached without regard to cost.
    ///
    /// Returns false if the node was already reached.
    pub fn attach(&mut self, node: N, parent: N) -> bool {
        if self.is_reached(&node) {
            return false;
        }
        self.parents.insert(node, Some(parent));
        true
    }

    /// Offer a path to `node` through `parent` costing `cost`.
    ///
    /// The offer is taken if the node was never reached or if it is
    /// strictly cheaper than the best known path. Returns whether the
    /// tree changed.
    pub fn relax(&mut self, node: &N, parent: &N, cost: Cost) -> bool {
        match self.costs.get(node) {
            Some(known) if *known <= cost => false,
            Some(known) => {
                debug!(
                    "re-parenting {} from {:?} to {} ({} -> {})",
                    node,
                    self.parent(node),
                    parent,
                    known,
                    cost
                );
                self.set(node, parent, cost);
                true
            }
            None => {
                self.set(node, parent, cost);
                true
            }
        }
    }

    fn set(&mut self, node: &N, parent: &N, cost: Cost) {
        self.parents.insert(node.clone(), Some(parent.clone()));
        self.costs.insert(node.clone(), cost);
    }

    /// Walk parent links from `node` back to the root.
    ///
    /// The returned path runs forward, from the root to `node`.
    /// Returns None if `node` was never reached.
    pub fn backtrack(&self, node: &N) -> Option<Vec<N>> {
        if !self.is_reached(node) {
            return None;
        }

        let mut path = vec![node.clone()];
        let mut current = node;
        while current != &self.root {
            // A parent cycle can only come from negative weights
            // re-parenting the root, so cap the walk.
            if path.len() > self.parents.len() {
                return None;
            }
            current = self.parent(current)?;
            path.push(current.clone());
        }
        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn root_only() {
        let tree = SearchTree::new("S");
        assert!(tree.is_reached(&"S"));
        assert!(!tree.is_reached(&"A"));
        assert_eq!(tree.parent(&"S"), None);
        assert_eq!(tree.cost(&"S"), Some(Cost::zero()));
        assert_eq!(tree.backtrack(&"S"), Some(vec!["S"]));
        assert_eq!(tree.backtrack(&"A"), None);
    }

    #[test]
    fn attach_once() {
        let mut tree = SearchTree::new("S");
        assert!(tree.attach("A", "S"));
        assert!(tree.attach("B", "A"));
        assert!(!tree.attach("B", "S"));
        assert_eq!(tree.parent(&"B"), Some(&"A"));
        assert_eq!(tree.backtrack(&"B"), Some(vec!["S", "A", "B"]));
    }

    #[test]
    fn relax_only_improves() {
        let mut tree = SearchTree::new("Start");
        assert!(tree.relax(&"C", &"Start", Cost::from(16.0)));
        assert!(tree.relax(&"E", &"Start", Cost::from(90.0)));
        assert!(tree.relax(&"D", &"C", Cost::from(46.0)));

        assert!(!tree.relax(&"E", &"D", Cost::from(90.0)));
        assert_eq!(tree.parent(&"E"), Some(&"Start"));

        assert!(tree.relax(&"E", &"D", Cost::from(86.0)));
        assert_eq!(tree.parent(&"E"), Some(&"D"));
        assert_eq!(tree.cost(&"E"), Some(Cost::from(86.0)));
        assert_eq!(
            tree.backtrack(&"E"),
            Some(vec!["Start", "C", "D", "E"])
        );
    }
}
