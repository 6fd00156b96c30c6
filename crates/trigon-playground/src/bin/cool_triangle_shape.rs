use std::process::ExitCode;

fn main() -> ExitCode {
    trigon_playground::launch(trigon_playground::presets::cool_triangle_shape())
}
