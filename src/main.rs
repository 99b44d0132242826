use std::process::ExitCode;

fn main() -> ExitCode {
    match battery_graph::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("battery-graph: {e}");
            ExitCode::FAILURE
        }
    }
}
