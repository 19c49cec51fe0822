use std::process;

fn main() {
    if let Err(e) = decli::cli::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
