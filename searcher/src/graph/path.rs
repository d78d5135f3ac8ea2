use std::fmt;

use super::Node;

/// A heuristic weight which overestimates the remaining cost
/// of the solution at one node along the solution path.
#[derive(Debug, Clone, PartialEq)]
pub struct Inadmissible<N> {
    pub node: N,
    pub heuristic: f64,
    pub remaining: f64,
}

impl<N> fmt::Display for Inadmissible<N>
where
    N: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "heuristic for {} is inadmissible: cost-to-go {} < heuristic {}, the solution may be sub-optimal",
            self.node, self.remaining, self.heuristic
        )
    }
}

/// A successful search result.
///
/// The path always runs from the start node to the goal node.
/// Only weighted searches report a cost.
#[derive(Debug, Clone)]
pub struct Solution<N> {
    pub(crate) path: Vec<N>,
    pub(crate) cost: Option<f64>,
    pub(crate) iterations: usize,
    pub(crate) warnings: Vec<Inadmissible<N>>,
}

impl<N> Solution<N>
where
    N: Node,
{
    pub fn path(&self) -> &[N] {
        &self.path
    }

    pub fn into_path(self) -> Vec<N> {
        self.path
    }

    pub fn cost(&self) -> Option<f64> {
        self.cost
    }

    /// Number of expansions the search performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn warnings(&self) -> &[Inadmissible<N>] {
        &self.warnings
    }

    /// No warnings were raised while validating heuristics.
    pub fn is_admissible(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of edges in the path.
    pub fn len(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn origin(&self) -> &N {
        &self.path[0]
    }

    pub fn destination(&self) -> &N {
        &self.path[self.path.len() - 1]
    }
}

impl<N> fmt::Display for Solution<N>
where
    N: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, node) in self.path.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", node)?;
        }
        if let Some(cost) = self.cost {
            write!(f, " (cost {})", cost)?;
        }
        Ok(())
    }
}
