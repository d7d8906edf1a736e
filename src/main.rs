use clap::Parser;
use fxfetch::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    fxfetch::logging::init();
    run(Cli::parse())
}
