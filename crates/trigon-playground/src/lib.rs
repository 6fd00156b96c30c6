//! Trigon playground: preset scenes and the shared binary entry point.

pub mod presets;

use std::process::ExitCode;

use trigon_engine::bootstrap::BootstrapConfig;
use trigon_engine::logging::{init_logging, LoggingConfig};
use trigon_engine::window::Runtime;

/// Runs `config` in a window and maps the outcome to a process exit code.
pub fn launch(config: BootstrapConfig) -> ExitCode {
    init_logging(LoggingConfig::default());

    match Runtime::run(config) {
        Ok(report) => {
            log::info!(
                "exited cleanly after {} frames ({} skipped)",
                report.draw_calls,
                report.frames_skipped
            );
            ExitCode::SUCCESS
        }
        // Already logged where it happened.
        Err(err) => ExitCode::from(err.exit_code()),
    }
}
