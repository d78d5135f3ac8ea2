//! Uninformed searches: breadth-first and depth-first.
//!
//! Both searches pop from the front of a double-ended queue and differ
//! only in which end receives newly discovered nodes, so they share one
//! implementation, [Traversal], parameterized by the queue.

use std::collections::{HashMap, VecDeque};
use std::default::Default;

use log::debug;

use super::tree::SearchTree;
use super::{check_endpoints, SearchOptions, SearchQueue, Solver};
use crate::errors::Result;
use crate::graph::{Adjacency, Solution};

/// Progress of a single node through a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Unvisited,
    /// Discovered and waiting in the queue.
    Open,
    Visited,
}

/// First-in-first-out queue, for breadth-first search.
#[derive(Debug)]
pub struct BreadthQueue<S> {
    queue: VecDeque<S>,
}

impl<S> SearchQueue for BreadthQueue<S> {
    type Candidate = S;

    fn pop(&mut self) -> Option<Self::Candidate> {
        self.queue.pop_front()
    }

    fn push(&mut self, item: Self::Candidate) {
        self.queue.push_back(item);
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

impl<S> Default for BreadthQueue<S> {
    fn default() -> Self {
        BreadthQueue {
            queue: VecDeque::new(),
        }
    }
}

/// Last-in-first-out queue, for depth-first search.
#[derive(Debug)]
pub struct DepthQueue<S> {
    queue: VecDeque<S>,
}

impl<S> Default for DepthQueue<S> {
    fn default() -> Self {
        DepthQueue {
            queue: VecDeque::new(),
        }
    }
}

impl<S> SearchQueue for DepthQueue<S> {
    type Candidate = S;

    fn pop(&mut self) -> Option<Self::Candidate> {
        self.queue.pop_front()
    }

    fn push(&mut self, item: Self::Candidate) {
        self.queue.push_front(item);
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Finds a path between two nodes, ignoring any weights.
///
/// The order nodes are explored in is set by the queue `Q`.
#[derive(Debug)]
pub struct Traversal<'g, G, Q>
where
    G: Adjacency,
    Q: SearchQueue<Candidate = G::Node> + Default,
{
    start: G::Node,
    goal: G::Node,
    graph: &'g G,
    states: HashMap<G::Node, NodeState>,
    tree: SearchTree<G::Node>,
    queue: Q,
    options: SearchOptions,
    iterations: usize,
}

pub type BreadthFirstSearcher<'g, G> =
    Traversal<'g, G, BreadthQueue<<G as Adjacency>::Node>>;

pub type DepthFirstSearcher<'g, G> = Traversal<'g, G, DepthQueue<<G as Adjacency>::Node>>;

impl<'g, G, Q> Traversal<'g, G, Q>
where
    G: Adjacency,
    Q: SearchQueue<Candidate = G::Node> + Default,
{
    /// Set up a search from `start` to `goal`.
    ///
    /// Fails if either node is not in the graph.
    pub fn new(start: G::Node, goal: G::Node, graph: &'g G) -> Result<Self> {
        check_endpoints(graph, &start, &goal)?;
        let tree = SearchTree::new(start.clone());
        Ok(Self {
            start,
            goal,
            graph,
            states: HashMap::new(),
            tree,
            queue: Q::default(),
            options: SearchOptions::default(),
            iterations: 0,
        })
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self, node: &G::Node) -> NodeState {
        self.states
            .get(node)
            .copied()
            .unwrap_or(NodeState::Unvisited)
    }

    pub fn tree(&self) -> &SearchTree<G::Node> {
        &self.tree
    }

    fn reset(&mut self) {
        self.states = self
            .graph
            .nodes()
            .map(|n| (n.clone(), NodeState::Unvisited))
            .collect();
        self.tree = SearchTree::new(self.start.clone());
        self.queue = Q::default();
        self.queue.push(self.start.clone());
        self.iterations = 0;
    }
}

impl<'g, G, Q> Solver for Traversal<'g, G, Q>
where
    G: Adjacency,
    Q: SearchQueue<Candidate = G::Node> + Default,
{
    type Node = G::Node;

    fn solve(&mut self) -> Result<Option<Solution<G::Node>>> {
        self.reset();
        let graph = self.graph;
        let mut counter = self.options.counter();
        let mut current: Option<G::Node> = None;

        while current.as_ref() != Some(&self.goal) {
            let node = match self.queue.pop() {
                Some(node) => node,
                None => {
                    self.iterations = counter.current();
                    debug!(
                        "no path from {} to {} after {} iterations",
                        self.start, self.goal, self.iterations
                    );
                    return Ok(None);
                }
            };

            let discovered: Vec<G::Node> = graph
                .children(&node)
                .filter(|child| self.state(child) == NodeState::Unvisited)
                .cloned()
                .collect();

            for child in discovered {
                self.queue.push(child.clone());
                self.states.insert(child.clone(), NodeState::Open);
                self.tree.attach(child, node.clone());
            }
            self.states.insert(node.clone(), NodeState::Visited);

            let step = counter.increment(self.queue.len());
            self.iterations = counter.current();
            step?;
            current = Some(node);
        }

        let path = self.tree.backtrack(&self.goal).unwrap_or_default();
        Ok(Some(Solution {
            path,
            cost: None,
            iterations: self.iterations,
            warnings: Vec::new(),
        }))
    }

    fn iterations(&self) -> usize {
        self.iterations
    }
}

/// Breadth-first search, which finds a path with the fewest edges.
pub fn bfs<G>(start: G::Node, goal: G::Node, graph: &G) -> Result<BreadthFirstSearcher<'_, G>>
where
    G: Adjacency,
{
    Traversal::new(start, goal, graph)
}

/// Depth-first search, which follows each branch as far as it goes
/// before backing up.
pub fn dfs<G>(start: G::Node, goal: G::Node, graph: &G) -> Result<DepthFirstSearcher<'_, G>>
where
    G: Adjacency,
{
    Traversal::new(start, goal, graph)
}
