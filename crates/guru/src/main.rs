use std::process::ExitCode;

fn main() -> ExitCode {
    guru::init();

    guru::cli::run()
}
