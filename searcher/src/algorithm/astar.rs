//! Best-first search guided by heuristic node weights (A*).

use std::cmp::{Eq, Ord, Ordering, PartialEq, PartialOrd};
use std::collections::{BinaryHeap, HashMap};
use std::default::Default;

use log::{debug, warn};

use super::score::Cost;
use super::tree::SearchTree;
use super::{check_endpoints, SearchOptions, SearchQueue, Solver};
use crate::errors::{Result, SearchError};
use crate::graph::{Adjacency, Inadmissible, Node, Solution, WeightedDiGraph};

/// An open node ranked by its estimated total cost.
#[derive(Debug)]
pub struct Estimate<N> {
    node: N,
    total: Cost,
    sequence: usize,
}

impl<N> Estimate<N> {
    pub fn new(node: N, total: Cost) -> Self {
        Self {
            node,
            total,
            sequence: 0,
        }
    }
}

impl<N> PartialEq for Estimate<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N> Eq for Estimate<N> {}

// Lowest estimate first, then earliest opened.
impl<N> Ord for Estimate<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total
            .cmp(&other.total)
            .then(self.sequence.cmp(&other.sequence))
            .reverse()
    }
}

impl<N> PartialOrd for Estimate<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The open set of an A* search.
///
/// Re-opening a node pushes a fresh entry instead of updating the old
/// one. Only the most recent entry for a node is live; older ones are
/// dropped when they reach the top of the heap.
#[derive(Debug)]
pub struct AStarQueue<N>
where
    N: Node,
{
    queue: BinaryHeap<Estimate<N>>,
    open: HashMap<N, usize>,
    sequence: usize,
}

impl<N> Default for AStarQueue<N>
where
    N: Node,
{
    fn default() -> Self {
        AStarQueue {
            queue: BinaryHeap::new(),
            open: HashMap::new(),
            sequence: 0,
        }
    }
}

impl<N> AStarQueue<N>
where
    N: Node,
{
    pub fn contains(&self, node: &N) -> bool {
        self.open.contains_key(node)
    }
}

impl<N> SearchQueue for AStarQueue<N>
where
    N: Node,
{
    type Candidate = Estimate<N>;

    fn pop(&mut self) -> Option<Self::Candidate> {
        while let Some(estimate) = self.queue.pop() {
            if self.open.get(&estimate.node) == Some(&estimate.sequence) {
                self.open.remove(&estimate.node);
                return Some(estimate);
            }
        }
        None
    }

    fn push(&mut self, mut item: Self::Candidate) {
        self.sequence += 1;
        item.sequence = self.sequence;
        self.open.insert(item.node.clone(), item.sequence);
        self.queue.push(item);
    }

    /// Number of open nodes, not counting superseded entries.
    fn len(&self) -> usize {
        self.open.len()
    }
}

/// Finds a minimum cost path between two nodes of a weighted graph.
///
/// Candidates are ranked by `g + h`, where `g` is the cost of the best
/// known path from the start and `h` is the heuristic weight of the
/// node. The result is optimal when no heuristic weight overestimates
/// the true remaining cost.
#[derive(Debug)]
pub struct AStar<'g, N>
where
    N: Node,
{
    start: N,
    goal: N,
    graph: &'g WeightedDiGraph<N>,
    tree: SearchTree<N>,
    queue: AStarQueue<N>,
    options: SearchOptions,
    iterations: usize,
}

impl<'g, N> AStar<'g, N>
where
    N: Node,
{
    /// Set up a search from `start` to `goal`.
    ///
    /// Fails if either node is not in the graph.
    pub fn new(start: N, goal: N, graph: &'g WeightedDiGraph<N>) -> Result<Self> {
        check_endpoints(graph, &start, &goal)?;
        let tree = SearchTree::new(start.clone());
        Ok(Self {
            start,
            goal,
            graph,
            tree,
            queue: AStarQueue::default(),
            options: SearchOptions::default(),
            iterations: 0,
        })
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn tree(&self) -> &SearchTree<N> {
        &self.tree
    }

    /// Nodes still waiting to be expanded.
    pub fn open(&self) -> usize {
        self.queue.len()
    }

    fn reset(&mut self) -> Result<()> {
        self.tree = SearchTree::new(self.start.clone());
        self.queue = AStarQueue::default();
        let h = self.graph.get_node_weight(&self.start)?;
        self.queue.push(Estimate::new(self.start.clone(), Cost::zero() + h));
        self.iterations = 0;
        Ok(())
    }

    fn cost(&self, node: &N) -> Result<Cost> {
        self.tree
            .cost(node)
            .ok_or_else(|| SearchError::NodeNotFound(node.to_string()))
    }

    fn expand(&mut self, current: &N) -> Result<()> {
        let graph = self.graph;
        let g = self.cost(current)?;

        for child in graph.children(current) {
            let candidate = g + graph.get_edge_weight(current, child)?;
            let reopened = self.tree.is_reached(child) && !self.queue.contains(child);

            if self.tree.relax(child, current, candidate) {
                if reopened {
                    debug!("re-opening {} at cost {}", child, candidate);
                }
                let h = graph.get_node_weight(child)?;
                self.queue.push(Estimate::new(child.clone(), candidate + h));
            }
        }
        Ok(())
    }

    fn backtrack(&self) -> Result<Solution<N>> {
        let path = self
            .tree
            .backtrack(&self.goal)
            .ok_or_else(|| SearchError::NodeNotFound(self.goal.to_string()))?;
        let total = self.cost(&self.goal)?;

        let mut warnings = Vec::new();
        if self.options.validate_heuristics {
            for node in path.iter().filter(|n| **n != self.goal) {
                let remaining = (total - self.cost(node)?).value();
                let heuristic = self.graph.get_node_weight(node)?;
                if remaining < heuristic {
                    let issue = Inadmissible {
                        node: node.clone(),
                        heuristic,
                        remaining,
                    };
                    warn!("{}", issue);
                    warnings.push(issue);
                }
            }
        }

        Ok(Solution {
            path,
            cost: Some(total.value()),
            iterations: self.iterations,
            warnings,
        })
    }
}

impl<'g, N> Solver for AStar<'g, N>
where
    N: Node,
{
    type Node = N;

    fn solve(&mut self) -> Result<Option<Solution<N>>> {
        self.reset()?;
        let mut counter = self.options.counter();

        loop {
            let current = match self.queue.pop() {
                Some(estimate) => estimate.node,
                None => {
                    debug!(
                        "no path from {} to {} after {} iterations",
                        self.start, self.goal, self.iterations
                    );
                    return Ok(None);
                }
            };

            let step = counter.increment(self.queue.len());
            self.iterations = counter.current();
            step?;

            if current == self.goal {
                break;
            }
            self.expand(&current)?;
        }

        self.backtrack().map(Some)
    }

    fn iterations(&self) -> usize {
        self.iterations
    }
}

/// Build an A* searcher
pub fn astar<N>(start: N, goal: N, graph: &WeightedDiGraph<N>) -> Result<AStar<'_, N>>
where
    N: Node,
{
    AStar::new(start, goal, graph)
}
