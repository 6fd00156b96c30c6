use std::process::ExitCode;

fn main() -> ExitCode {
    trigon_playground::launch(trigon_playground::presets::hello_triangle())
}
