//! Command-line front end for the barrier-synchronized reduction.
//!
//! - `sum`: generate or read a sequence, reduce it, compare with the
//!   sequential reference
//! - `library`: counting-semaphore simulation

mod cli;

fn main() {
    let matches = cli::build_cli().get_matches();

    if let Err(e) = cli::run(matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
