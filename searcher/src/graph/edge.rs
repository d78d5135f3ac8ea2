use std::fmt;

use super::Node;
use crate::errors::{Result, SearchError};

/// A directed edge from `parent` to `child`.
///
/// Construction rejects self-loops, so any `Edge` value
/// can be inserted into a graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge<N> {
    pub parent: N,
    pub child: N,
}

impl<N> Edge<N>
where
    N: Node,
{
    pub fn new(parent: N, child: N) -> Result<Self> {
        if parent == child {
            return Err(SearchError::SelfLoop(parent.to_string()));
        }
        Ok(Self { parent, child })
    }
}

impl<N> fmt::Display for Edge<N>
where
    N: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} --> {}", self.parent, self.child)
    }
}

/// Node and edge weights must be usable as costs.
pub(crate) fn check_weight(weight: f64) -> Result<f64> {
    if weight.is_finite() {
        Ok(weight)
    } else {
        Err(SearchError::InvalidWeight(weight))
    }
}
