use std::fmt;
use std::path::PathBuf;

/// Process exit status used when the engine cannot start.
pub const INITIALIZATION_EXIT_CODE: i32 = 12;

/// Errors surfaced by the engine.
///
/// Only `Initialization`, `Config` and `Surface` are meant to end the process.
/// Asset and format problems are absorbed and logged by [`crate::Graphics`] so a single
/// bad sprite cannot take down a running frame loop.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Window, surface, adapter or device creation failed.
    Initialization(String),

    /// The engine configuration document could not be read or parsed.
    Config(String),

    /// An image file could not be opened or decoded.
    Decode { path: PathBuf, message: String },

    /// An image decoded to something other than 8-bit RGB/RGBA. Pixels are
    /// converted best-effort; this value is only ever logged.
    UnsupportedFormat { path: PathBuf, color: String },

    /// Advisory error string reported by the graphics backend.
    TransientPlatform(String),

    /// Framebuffer readback or bitmap write failed.
    Capture(String),

    /// The surface can no longer be presented to (device out of memory).
    Surface(String),
}

impl EngineError {
    /// Returns `true` for errors the host should exit on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Initialization(_) | Self::Config(_) | Self::Surface(_))
    }

    /// Exit status a host should use when terminating on this error.
    pub fn exit_code(&self) -> i32 {
        if self.is_fatal() { INITIALIZATION_EXIT_CODE } else { 1 }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initialization(msg) => write!(f, "initialization failed: {msg}"),
            Self::Config(msg) => write!(f, "config error: {msg}"),
            Self::Decode { path, message } => {
                write!(f, "could not load {}: {message}", path.display())
            }
            Self::UnsupportedFormat { path, color } => write!(
                f,
                "Warning: {} is not truecolor ({color}). Converted to RGBA8.",
                path.display()
            ),
            Self::TransientPlatform(msg) => write!(f, ">>>{msg}"),
            Self::Capture(msg) => write!(f, "screenshot failed: {msg}"),
            Self::Surface(msg) => write!(f, "surface lost: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
