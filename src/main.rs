//! restaurant-data CLI entry point
//!
//! Parses arguments and dispatches via `cli::run`. Fatal errors are printed
//! to stderr and exit with status 1; otherwise the command decides the exit
//! status (the validator exits 1 when it reported violations).

use restaurant_data::cli;

fn main() {
    match cli::run() {
        Ok(status) => std::process::exit(status),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
