use std::cmp::{Ord, Ordering, PartialOrd};
use std::fmt;
use std::ops::{Add, Sub};

/// An accumulated path cost.
///
/// Costs are totally ordered so they can rank candidates in a heap.
/// Weights are checked to be finite when they enter a graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cost(f64);

impl Cost {
    pub fn zero() -> Self {
        Cost(0.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Cost {
    fn from(value: f64) -> Self {
        Cost(value)
    }
}

impl Add<f64> for Cost {
    type Output = Cost;

    fn add(self, rhs: f64) -> Cost {
        Cost(self.0 + rhs)
    }
}

impl Sub for Cost {
    type Output = Cost;

    fn sub(self, rhs: Cost) -> Cost {
        Cost(self.0 - rhs.0)
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Cost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cost {}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ordering() {
        let mut costs: Vec<Cost> = vec![3.5, -1.0, 0.0, 289.0]
            .into_iter()
            .map(Cost::from)
            .collect();
        costs.sort();
        let values: Vec<f64> = costs.into_iter().map(Cost::value).collect();
        assert_eq!(values, vec![-1.0, 0.0, 3.5, 289.0]);
    }

    #[test]
    fn arithmetic() {
        let g = Cost::zero() + 70.0 + 103.0;
        assert_eq!(g, Cost::from(173.0));
        assert_eq!((Cost::from(289.0) - g).value(), 116.0);
    }
}
