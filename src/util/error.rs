// plugin-tooling - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every failure aborts the run; nothing here is retried.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all tooling operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum ToolingError {
    /// Rendering a structured-text document failed.
    Render(RenderError),

    /// A metadata selector was outside its enumerated set.
    Meta(MetaError),

    /// The directory sweep failed.
    Sweep(SweepError),

    /// The documentation pipeline failed.
    Docs(DocsError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for ToolingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(e) => write!(f, "Render error: {e}"),
            Self::Meta(e) => write!(f, "Metadata error: {e}"),
            Self::Sweep(e) => write!(f, "Sweep error: {e}"),
            Self::Docs(e) => write!(f, "Documentation error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ToolingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(e) => Some(e),
            Self::Meta(e) => Some(e),
            Self::Sweep(e) => Some(e),
            Self::Docs(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Render errors
// ---------------------------------------------------------------------------

/// Errors produced by the structured-text emitter.
///
/// These signal a bug in the producer of the value tree, not bad user input.
#[derive(Debug)]
pub enum RenderError {
    /// The document root is an empty mapping or sequence.
    EmptyRoot { kind: &'static str },

    /// The document root is a scalar; only containers can be rendered.
    ScalarRoot { kind: &'static str },

    /// Writing to the output sink failed.
    Io(io::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRoot { kind } => write!(f, "Cannot render an empty {kind} as a document"),
            Self::ScalarRoot { kind } => {
                write!(f, "Document root must be a mapping or sequence, got {kind}")
            }
            Self::Io(source) => write!(f, "Write failed: {source}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(source) => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for RenderError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<RenderError> for ToolingError {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}

// ---------------------------------------------------------------------------
// Metadata errors
// ---------------------------------------------------------------------------

/// Errors related to platform selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaError {
    /// A selector string does not name any known value.
    UnknownSelector {
        selector: &'static str,
        value: String,
    },

    /// A known selector value that the chosen builder does not accept.
    UnsupportedSelector {
        builder: &'static str,
        selector: &'static str,
        value: String,
    },
}

impl fmt::Display for MetaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSelector { selector, value } => {
                write!(f, "Unknown {selector} '{value}'")
            }
            Self::UnsupportedSelector {
                builder,
                selector,
                value,
            } => write!(f, "{builder} does not accept {selector} '{value}'"),
        }
    }
}

impl std::error::Error for MetaError {}

impl From<MetaError> for ToolingError {
    fn from(e: MetaError) -> Self {
        Self::Meta(e)
    }
}

// ---------------------------------------------------------------------------
// Sweep errors
// ---------------------------------------------------------------------------

/// Errors related to the plugin directory sweep.
#[derive(Debug)]
pub enum SweepError {
    /// The plugin directory does not exist.
    RootNotFound { path: PathBuf },

    /// The plugin path is not a directory.
    NotADirectory { path: PathBuf },

    /// Walkdir traversal error.
    Traversal {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// Creating, writing or deleting a file failed.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// The meta document for a binary could not be rendered.
    Render { path: PathBuf, source: RenderError },

    /// The preset asked a builder for an unsupported selector.
    Meta { path: PathBuf, source: MetaError },
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "Plugin directory '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Plugin path '{}' is not a directory", path.display())
            }
            Self::Traversal { path, source } => {
                write!(f, "Error traversing '{}': {source}", path.display())
            }
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
            Self::Render { path, source } => {
                write!(f, "Cannot render meta for '{}': {source}", path.display())
            }
            Self::Meta { path, source } => {
                write!(f, "Cannot build meta for '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Traversal { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::Render { source, .. } => Some(source),
            Self::Meta { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<SweepError> for ToolingError {
    fn from(e: SweepError) -> Self {
        Self::Sweep(e)
    }
}

// ---------------------------------------------------------------------------
// Documentation pipeline errors
// ---------------------------------------------------------------------------

/// Errors related to the documentation pipeline.
#[derive(Debug)]
pub enum DocsError {
    /// A required executable is not on the search path.
    ToolNotFound { tool: &'static str },

    /// A directory the pipeline runs in is missing.
    MissingDirectory { path: PathBuf },

    /// The tool could not be started.
    Spawn {
        tool: &'static str,
        source: io::Error,
    },

    /// The tool ran but exited unsuccessfully. `code` is `None` when the
    /// process was terminated by a signal.
    ExitStatus {
        tool: &'static str,
        code: Option<i32>,
    },

    /// Filesystem error around a pipeline step.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// The generated API reference is not valid JSON.
    InvalidOutput {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for DocsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToolNotFound { tool } => write!(f, "{tool} executable not found"),
            Self::MissingDirectory { path } => {
                write!(f, "Required directory '{}' does not exist", path.display())
            }
            Self::Spawn { tool, source } => write!(f, "Failed to run {tool}: {source}"),
            Self::ExitStatus {
                tool,
                code: Some(code),
            } => write!(f, "{tool} exited with status {code}"),
            Self::ExitStatus { tool, code: None } => {
                write!(f, "{tool} was terminated by a signal")
            }
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
            Self::InvalidOutput { path, source } => {
                write!(f, "'{}' is not valid JSON: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DocsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::InvalidOutput { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DocsError> for ToolingError {
    fn from(e: DocsError) -> Self {
        Self::Docs(e)
    }
}

/// Convenience type alias for tooling results.
pub type Result<T> = std::result::Result<T, ToolingError>;
