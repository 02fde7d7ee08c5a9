//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

#[expect(clippy::print_stderr, reason = "report fatal errors to the user")]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(err) = mapscore_cli::run() {
        eprintln!("mapscore: {err}");
        std::process::exit(1);
    }
}
