//! Example networks with known solutions, and a harness which checks
//! a searcher against them.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use log::info;
use thiserror::Error;

use searcher::{Adjacency, SearchError, Solution, Solver, WeightedDiGraph};

type Name = &'static str;

/// A search problem together with its expected answer.
#[derive(Debug, Clone)]
pub struct Scenario {
    name: Name,
    description: &'static str,
    start: Name,
    goal: Name,
    graph: WeightedDiGraph<Name>,

    /// Minimum path cost, None when the goal is unreachable.
    min_cost: Option<f64>,

    /// Every path achieving the minimum cost.
    optimal: Vec<Vec<Name>>,

    /// Iterations A* should take, when the count is free of ties.
    astar_iterations: Option<usize>,
}

/// Ways a search can disagree with a scenario.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("No scenario named {0}")]
    ScenarioNotFound(String),

    #[error("Expected no path, but found {0}")]
    UnexpectedPath(String),

    #[error("Expected a path, but none was found")]
    MissingPath,

    #[error("Path {0} does not run from {1} to {2} along graph edges")]
    InvalidPath(String, Name, Name),

    #[error("Expected cost {expected}, got {got}")]
    WrongCost { expected: f64, got: f64 },

    #[error("Path {0} is not one of the optimal paths")]
    NotOptimal(String),

    #[error("Expected {expected} iterations, got {got}")]
    WrongIterations { expected: usize, got: usize },

    #[error(transparent)]
    Search(#[from] SearchError),
}

const TOLERANCE: f64 = 1e-9;

impl Scenario {
    pub fn name(&self) -> Name {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn start(&self) -> Name {
        self.start
    }

    pub fn goal(&self) -> Name {
        self.goal
    }

    pub fn graph(&self) -> &WeightedDiGraph<Name> {
        &self.graph
    }

    pub fn min_cost(&self) -> Option<f64> {
        self.min_cost
    }

    pub fn astar_iterations(&self) -> Option<usize> {
        self.astar_iterations
    }

    /// Run `solver` and compare the outcome with the known answer.
    ///
    /// Paths must always be valid walks from start to goal. Costs and
    /// optimality are only checked for searchers which report a cost.
    pub fn verify<S>(
        &self,
        solver: &mut S,
        iterations: Option<usize>,
    ) -> Result<Option<Solution<Name>>, VerifyError>
    where
        S: Solver<Node = Name>,
    {
        let result = solver.solve()?;

        match (&result, self.min_cost) {
            (None, None) => {}
            (Some(solution), None) => {
                return Err(VerifyError::UnexpectedPath(solution.to_string()));
            }
            (None, Some(_)) => return Err(VerifyError::MissingPath),
            (Some(solution), Some(expected)) => self.check(solution, expected)?,
        }

        if let Some(expected) = iterations {
            let got = solver.iterations();
            if got != expected {
                return Err(VerifyError::WrongIterations { expected, got });
            }
        }

        info!("{}: verified", self.name);
        Ok(result)
    }

    fn check(&self, solution: &Solution<Name>, expected: f64) -> Result<(), VerifyError> {
        let path = solution.path();
        let walks = path.first() == Some(&self.start)
            && path.last() == Some(&self.goal)
            && path
                .windows(2)
                .all(|w| self.graph.children(&w[0]).any(|c| c == &w[1]));
        if !walks {
            return Err(VerifyError::InvalidPath(
                path.join(" -> "),
                self.start,
                self.goal,
            ));
        }

        if let Some(got) = solution.cost() {
            if (got - expected).abs() > TOLERANCE {
                return Err(VerifyError::WrongCost { expected, got });
            }
            if !self.optimal.iter().any(|p| p.as_slice() == path) {
                return Err(VerifyError::NotOptimal(path.join(" -> ")));
            }
        }
        Ok(())
    }
}

fn network(
    name: Name,
    nodes: &[(Name, f64)],
    edges: &[(Name, Name, f64)],
) -> WeightedDiGraph<Name> {
    let mut graph = WeightedDiGraph::new(name);
    for &(node, h) in nodes {
        graph
            .add_node(node, h)
            .expect("scenario nodes have finite weights");
    }
    for &(parent, child, w) in edges {
        graph
            .add_edge(parent, child, w)
            .expect("scenario edges join distinct, known nodes");
    }
    graph
}

/// Straight-line distances to Würzburg as heuristics, road distances
/// as edge weights.
fn german_cities() -> Scenario {
    Scenario {
        name: "german-cities",
        description: "German city network, Saarbrücken to Würzburg",
        start: "SB",
        goal: "WB",
        graph: network(
            "German city network from SB to WB",
            &[
                ("SB", 222.0),
                ("KL", 158.0),
                ("Frankfurt", 96.0),
                ("LH", 108.0),
                ("KA", 140.0),
                ("HB", 87.0),
                ("WB", 0.0),
            ],
            &[
                ("SB", "KL", 70.0),
                ("SB", "KA", 145.0),
                ("KA", "HB", 84.0),
                ("HB", "WB", 102.0),
                ("KL", "Frankfurt", 103.0),
                ("Frankfurt", "WB", 116.0),
                ("KL", "LH", 53.0),
                ("LH", "WB", 183.0),
            ],
        ),
        min_cost: Some(289.0),
        optimal: vec![vec!["SB", "KL", "Frankfurt", "WB"]],
        astar_iterations: Some(6),
    }
}

/// The cheapest route first reaches E directly, but E has to be
/// re-opened once the detour through C and D turns out cheaper.
fn longway_round() -> Scenario {
    Scenario {
        name: "longway-round",
        description: "Admissible heuristics which force a node to be revisited",
        start: "Start",
        goal: "Goal",
        graph: network(
            "longway round",
            &[
                ("Start", 0.0),
                ("C", 80.0),
                ("D", 50.0),
                ("E", 5.0),
                ("Goal", 0.0),
            ],
            &[
                ("Start", "C", 16.0),
                ("Start", "E", 90.0),
                ("C", "D", 30.0),
                ("D", "E", 40.0),
                ("E", "Goal", 10.0),
                ("D", "Goal", 300.0),
            ],
        ),
        min_cost: Some(96.0),
        optimal: vec![vec!["Start", "C", "D", "E", "Goal"]],
        astar_iterations: Some(6),
    }
}

fn disconnected() -> Scenario {
    Scenario {
        name: "disconnected",
        description: "A goal which cannot be reached from the start",
        start: "S",
        goal: "G",
        graph: network(
            "disconnected",
            &[("S", 0.0), ("A", 0.0), ("B", 0.0), ("G", 0.0)],
            &[("S", "A", 1.0), ("A", "B", 1.0), ("B", "S", 1.0), ("G", "A", 1.0)],
        ),
        min_cost: None,
        optimal: vec![],
        astar_iterations: Some(3),
    }
}

/// Unit edge weights, so the cheapest path is also the shortest.
fn depot() -> Scenario {
    Scenario {
        name: "depot",
        description: "Small delivery network with a loop back through C",
        start: "S",
        goal: "C",
        graph: network(
            "depot",
            &[
                ("S", 0.0),
                ("A", 0.0),
                ("depot", 0.0),
                ("D", 0.0),
                ("X", 0.0),
                ("F", 0.0),
                ("C", 0.0),
                ("N", 0.0),
            ],
            &[
                ("S", "depot", 1.0),
                ("S", "A", 1.0),
                ("depot", "D", 1.0),
                ("X", "D", 1.0),
                ("X", "F", 1.0),
                ("D", "C", 1.0),
                ("A", "C", 1.0),
                ("C", "N", 1.0),
                ("N", "A", 1.0),
            ],
        ),
        min_cost: Some(2.0),
        optimal: vec![vec!["S", "A", "C"]],
        astar_iterations: None,
    }
}

lazy_static! {
    static ref SCENARIOS: BTreeMap<Name, fn() -> Scenario> = {
        let mut s: BTreeMap<Name, fn() -> Scenario> = BTreeMap::new();
        s.insert("german-cities", german_cities);
        s.insert("longway-round", longway_round);
        s.insert("disconnected", disconnected);
        s.insert("depot", depot);
        s
    };
}

/// Names of all known scenarios, in sorted order.
pub fn names() -> impl Iterator<Item = Name> {
    SCENARIOS.keys().copied()
}

/// Build a fresh copy of the named scenario.
pub fn get(name: &str) -> Result<Scenario, VerifyError> {
    SCENARIOS
        .get(name)
        .map(|build| build())
        .ok_or_else(|| VerifyError::ScenarioNotFound(name.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;
    use searcher::{astar, bfs, dfs, SearchOptions};

    #[test]
    fn registry() {
        assert_eq!(
            names().collect::<Vec<_>>(),
            vec!["depot", "disconnected", "german-cities", "longway-round"]
        );
        for name in names() {
            assert_eq!(get(name).unwrap().name(), name);
        }
        assert!(matches!(
            get("atlantis"),
            Err(VerifyError::ScenarioNotFound(n)) if n == "atlantis"
        ));
    }

    #[test]
    fn astar_solves_every_scenario() {
        for name in names() {
            let s = get(name).unwrap();
            let mut solver = astar(s.start(), s.goal(), s.graph()).unwrap();
            let result = s.verify(&mut solver, s.astar_iterations()).unwrap();
            if let Some(solution) = result {
                assert!(solution.is_admissible());
            }
        }
    }

    #[test]
    fn traversals_solve_every_scenario() {
        for name in names() {
            let s = get(name).unwrap();
            s.verify(&mut bfs(s.start(), s.goal(), s.graph()).unwrap(), None)
                .unwrap();
            s.verify(&mut dfs(s.start(), s.goal(), s.graph()).unwrap(), None)
                .unwrap();
        }
    }

    #[test]
    fn german_cities_solution() {
        let s = get("german-cities").unwrap();
        let mut solver = astar(s.start(), s.goal(), s.graph()).unwrap();
        let solution = s.verify(&mut solver, Some(6)).unwrap().unwrap();
        assert_eq!(solution.to_string(), "SB -> KL -> Frankfurt -> WB (cost 289)");
    }

    #[test]
    fn wrong_iterations() {
        let s = get("longway-round").unwrap();
        let mut solver = astar(s.start(), s.goal(), s.graph()).unwrap();
        assert!(matches!(
            s.verify(&mut solver, Some(5)),
            Err(VerifyError::WrongIterations {
                expected: 5,
                got: 6
            })
        ));
    }

    #[test]
    fn search_errors_pass_through() {
        let s = get("german-cities").unwrap();
        let mut o = SearchOptions::default();
        o.limit = Some(2);
        let mut solver = astar(s.start(), s.goal(), s.graph())
            .unwrap()
            .with_options(o);
        assert!(matches!(
            s.verify(&mut solver, None),
            Err(VerifyError::Search(SearchError::StepLimitExhausted(2)))
        ));
    }

    #[test]
    fn non_optimal_paths_are_caught() {
        // An overestimate on A steers A* through the depot instead.
        let mut s = get("depot").unwrap();
        s.graph = network(
            "misleading depot",
            &[("S", 0.0), ("A", 10.0), ("depot", 0.0), ("D", 0.0), ("C", 0.0)],
            &[
                ("S", "depot", 1.0),
                ("S", "A", 1.0),
                ("depot", "D", 1.0),
                ("D", "C", 1.0),
                ("A", "C", 1.0),
            ],
        );
        let mut solver = astar(s.start(), s.goal(), s.graph()).unwrap();
        assert!(matches!(
            s.verify(&mut solver, None),
            Err(VerifyError::WrongCost { .. })
        ));
    }
}
