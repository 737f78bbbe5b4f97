//! FILENAME: app/src/main.rs
// PURPOSE: Command-line entry point with unified logging.
// FORMAT: seq|level|category|message

fn main() {
    std::process::exit(app_lib::run());
}
