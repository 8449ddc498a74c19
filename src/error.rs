use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, SandboxError>;

/// Failures the sandbox reports to its host.
///
/// Runtime physics never produces these: malformed interaction requests are
/// defined no-ops and degenerate geometry is guarded numerically. Only
/// construction and configuration can fail.
#[derive(Debug, Error)]
pub enum SandboxError {
    /// The rendering surface was missing or had no drawable area.
    #[error("rendering surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// A settings value was outside its documented range.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// The config file was not valid JSON for `SandboxConfig`.
    #[error("failed to parse config: {0}")]
    Config(#[source] serde_json::Error),

    /// The embedded periodic table could not be parsed.
    #[error("failed to parse element table: {0}")]
    ElementTable(#[source] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
