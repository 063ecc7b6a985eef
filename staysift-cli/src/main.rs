//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = staysift_cli::run() {
        eprintln!("staysift: {err}");
        std::process::exit(1);
    }
}
