use std::fmt;

use crate::shader::ShaderStage;

/// Fatal bootstrap failure.
///
/// Every variant ends the program: the bootstrap releases whatever it had
/// acquired and the process exits with [`BootstrapError::exit_code`].
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapError {
    /// The windowing subsystem (event loop) could not be created or failed while running.
    SubsystemInit(String),
    /// The window could not be created.
    WindowCreate(String),
    /// No graphics adapter/device/surface could be bound to the window.
    FunctionLoad(String),
    /// A shader stage failed to parse or validate.
    ShaderCompile { stage: ShaderStage, message: String },
    /// The two stages do not form a usable program for the configured layout.
    ProgramLink(String),
    /// Vertex/index data is inconsistent with its layout.
    InvalidGeometry(String),
}

impl BootstrapError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubsystemInit(msg) => write!(f, "failed to initialize windowing subsystem: {msg}"),
            Self::WindowCreate(msg) => write!(f, "failed to create window: {msg}"),
            Self::FunctionLoad(msg) => write!(f, "failed to load graphics API: {msg}"),
            Self::ShaderCompile { stage, message } => {
                write!(f, "failed to compile {stage} shader: {message}")
            }
            Self::ProgramLink(msg) => write!(f, "failed to link shader program: {msg}"),
            Self::InvalidGeometry(msg) => write!(f, "invalid geometry: {msg}"),
        }
    }
}

impl std::error::Error for BootstrapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_stage() {
        let err = BootstrapError::ShaderCompile {
            stage: ShaderStage::Fragment,
            message: "expected `;`".to_string(),
        };
        assert_eq!(err.to_string(), "failed to compile fragment shader: expected `;`");
    }

    #[test]
    fn every_kind_exits_non_zero() {
        let all = [
            BootstrapError::SubsystemInit(String::new()),
            BootstrapError::WindowCreate(String::new()),
            BootstrapError::FunctionLoad(String::new()),
            BootstrapError::ShaderCompile { stage: ShaderStage::Vertex, message: String::new() },
            BootstrapError::ProgramLink(String::new()),
            BootstrapError::InvalidGeometry(String::new()),
        ];
        assert!(all.iter().all(|e| e.exit_code() != 0));
    }
}
