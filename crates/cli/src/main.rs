fn main() {
    if let Err(e) = hierscope_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
