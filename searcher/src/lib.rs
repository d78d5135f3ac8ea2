//! Search algorithms over explicit directed graphs.
//!
//! Build a [DiGraph] or a [WeightedDiGraph], then hand a reference to
//! one of the searchers along with a start and a goal node:
//!
//! - [bfs] and [dfs] find any path, ignoring weights;
//! - [astar] finds a minimum cost path, guided by the heuristic weight
//!   stored on each node, and checks those weights along the result.
//!
//! Every searcher implements [Solver]. A search which cannot reach the
//! goal returns `Ok(None)`; errors are reserved for malformed input.

pub mod algorithm;
mod errors;
pub mod graph;

pub use errors::Result as SearchResult;
pub use errors::SearchError;

pub use algorithm::astar::{astar, AStar};
pub use algorithm::basic::{
    bfs, dfs, BreadthFirstSearcher, BreadthQueue, DepthFirstSearcher, DepthQueue, NodeState,
    Traversal,
};
pub use algorithm::score::Cost;
pub use algorithm::tree::SearchTree;
pub use algorithm::SearchOptions;
pub use algorithm::SearchQueue;
pub use algorithm::Solver;

pub use graph::{Adjacency, DiGraph, Edge, Inadmissible, Node, Solution, WeightedDiGraph};
