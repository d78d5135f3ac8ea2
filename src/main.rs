fn main() {
    env_logger::init();

    if let Err(e) = graphsearch::solver() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
