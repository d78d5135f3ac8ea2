//! Provides the building blocks for search algorithms

use std::default::Default;

use log::debug;

use crate::errors::{Result, SearchError};
use crate::graph::{Adjacency, Node, Solution};

pub(crate) mod astar;
pub(crate) mod basic;
pub(crate) mod score;
pub(crate) mod tree;

/// Trait used to implement queues of search candidates
/// which should be checked for completion.
pub trait SearchQueue {
    type Candidate;

    fn pop(&mut self) -> Option<Self::Candidate>;

    fn push(&mut self, item: Self::Candidate);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A search which runs from a start node to a goal node.
pub trait Solver {
    type Node: Node;

    /// Run the search to completion.
    ///
    /// `Ok(None)` means the goal cannot be reached from the start.
    /// Each call starts the search over from scratch.
    fn solve(&mut self) -> Result<Option<Solution<Self::Node>>>;

    /// Iterations performed by the most recent call to [Solver::solve].
    fn iterations(&self) -> usize;
}

/// Options which control how a search runs.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Check heuristic weights along the solution path.
    /// Only weighted searches use heuristics.
    pub validate_heuristics: bool,

    /// Give up with an error after this many iterations.
    pub limit: Option<usize>,

    /// Log progress every this many iterations.
    pub verbose: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            validate_heuristics: true,
            limit: None,
            verbose: None,
        }
    }
}

impl SearchOptions {
    pub(crate) fn counter(&self) -> StepCounter {
        StepCounter {
            current: 0,
            maximum: self.limit,
            verbose: self.verbose.filter(|&n| n > 0),
        }
    }
}

#[derive(Debug)]
pub(crate) struct StepCounter {
    current: usize,
    maximum: Option<usize>,
    verbose: Option<usize>,
}

impl StepCounter {
    pub(crate) fn current(&self) -> usize {
        self.current
    }

    /// Count one iteration, failing once the limit is passed.
    pub(crate) fn increment(&mut self, open: usize) -> Result<()> {
        self.current += 1;

        if let Some(every) = self.verbose {
            if self.current % every == 0 {
                debug!("iteration {} with {} open", self.current, open);
            }
        }

        match self.maximum {
            Some(maximum) if self.current > maximum => {
                Err(SearchError::StepLimitExhausted(maximum))
            }
            _ => Ok(()),
        }
    }
}

/// Fail fast when the endpoints of a search are not in the graph.
pub(crate) fn check_endpoints<G>(graph: &G, start: &G::Node, goal: &G::Node) -> Result<()>
where
    G: Adjacency,
{
    for node in &[start, goal] {
        if !graph.contains_node(node) {
            return Err(SearchError::NodeNotFound(node.to_string()));
        }
    }
    Ok(())
}
