fn main() {
    if let Err(err) = structviz::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
