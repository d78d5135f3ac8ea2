//! Command line front-end and example networks for the `searcher` crate.

use clap::{value_t, App, Arg, ArgMatches};

use log::debug;

use searcher::{astar, bfs, dfs, SearchOptions, Solver};

pub mod scenarios;

type Error = anyhow::Error;

const ALGORITHMS: &[&str] = &["astar", "bfs", "dfs"];

pub fn solver() -> Result<(), Error> {
    let matches = App::new("graphsearch")
        .version("0.1")
        .author("Alex Rudy <opensource@alexrudy.net>")
        .about("Run graph searches against example networks")
        .arg(
            Arg::with_name("scenario")
                .value_name("SCENARIO")
                .required_unless("list")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("algorithm")
                .short("a")
                .long("algorithm")
                .takes_value(true)
                .possible_values(ALGORITHMS)
                .default_value("astar"),
        )
        .arg(
            Arg::with_name("limit")
                .long("limit")
                .value_name("STEPS")
                .help("Give up after this many iterations")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("no-validate")
                .long("no-validate")
                .help("Skip checking heuristic weights along the solution"),
        )
        .arg(
            Arg::with_name("verify")
                .long("verify")
                .help("Check the result against the known solution"),
        )
        .arg(
            Arg::with_name("show")
                .long("show")
                .help("Print the graph before searching"),
        )
        .arg(
            Arg::with_name("list")
                .long("list")
                .help("List the available scenarios"),
        )
        .get_matches();

    if matches.is_present("list") {
        for name in scenarios::names() {
            let scenario = scenarios::get(name)?;
            println!("{:<16}{}", name, scenario.description());
        }
        return Ok(());
    }

    run(&matches)
}

fn options(matches: &ArgMatches) -> Result<SearchOptions, Error> {
    let mut o = SearchOptions::default();
    o.validate_heuristics = !matches.is_present("no-validate");
    if matches.is_present("limit") {
        o.limit = Some(value_t!(matches, "limit", usize)?);
    }
    Ok(o)
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let name = matches.value_of("scenario").unwrap_or_default();
    let scenario = scenarios::get(name)?;
    let options = options(matches)?;
    let verify = matches.is_present("verify");

    if matches.is_present("show") {
        println!("{}", scenario.graph());
    }
    println!("{} -> {}", scenario.start(), scenario.goal());

    let (start, goal, graph) = (scenario.start(), scenario.goal(), scenario.graph());
    let algorithm = matches.value_of("algorithm").unwrap_or("astar");
    debug!("running {} on {}", algorithm, name);

    match algorithm {
        "bfs" => report(
            &scenario,
            bfs(start, goal, graph)?.with_options(options),
            verify,
            None,
        ),
        "dfs" => report(
            &scenario,
            dfs(start, goal, graph)?.with_options(options),
            verify,
            None,
        ),
        _ => report(
            &scenario,
            astar(start, goal, graph)?.with_options(options),
            verify,
            scenario.astar_iterations(),
        ),
    }
}

fn report<S>(
    scenario: &scenarios::Scenario,
    mut solver: S,
    verify: bool,
    iterations: Option<usize>,
) -> Result<(), Error>
where
    S: Solver<Node = &'static str>,
{
    let result = if verify {
        scenario.verify(&mut solver, iterations)?
    } else {
        solver.solve()?
    };

    match result {
        Some(solution) => {
            println!("Path: {}", solution.path().join(" -> "));
            if let Some(cost) = solution.cost() {
                println!("Cost: {}", cost);
            }
            for warning in solution.warnings() {
                println!("Warning: {}", warning);
            }
        }
        None => println!("No path found"),
    }
    println!("Iterations: {}", solver.iterations());

    if verify {
        println!("Verified against {}", scenario.name());
    }
    Ok(())
}
