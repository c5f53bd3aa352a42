// LogBoundary - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every variant carries the path it concerns so console output and the
// run report can name the file without extra bookkeeping.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogBoundary operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogBoundaryError {
    /// File discovery failed.
    Discovery(DiscoveryError),

    /// Converting a single file failed.
    Conversion(ConversionError),

    /// Configuration loading failed.
    Config(ConfigError),

    /// Writing the run report failed.
    Report(ReportError),
}

impl fmt::Display for LogBoundaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discovery(e) => write!(f, "Discovery error: {e}"),
            Self::Conversion(e) => write!(f, "Conversion error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Report(e) => write!(f, "Report error: {e}"),
        }
    }
}

impl std::error::Error for LogBoundaryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Discovery(e) => Some(e),
            Self::Conversion(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Report(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Discovery errors
// ---------------------------------------------------------------------------

/// Errors related to file discovery.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The root path does not exist.
    RootNotFound { path: PathBuf },

    /// The root path is not a directory.
    NotADirectory { path: PathBuf },

    /// Permission denied accessing the root path.
    PermissionDenied { path: PathBuf, source: io::Error },

    /// Walkdir traversal error (an individual file or directory could not
    /// be accessed). Non-fatal: the driver records it as a warning.
    Traversal {
        path: PathBuf,
        source: walkdir::Error,
    },
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "Conversion root '{}' does not exist", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Conversion root '{}' is not a directory", path.display())
            }
            Self::PermissionDenied { path, source } => {
                write!(
                    f,
                    "Permission denied accessing '{}': {source}",
                    path.display()
                )
            }
            Self::Traversal { path, source } => {
                write!(f, "Cannot access '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PermissionDenied { source, .. } => Some(source),
            Self::Traversal { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DiscoveryError> for LogBoundaryError {
    fn from(e: DiscoveryError) -> Self {
        Self::Discovery(e)
    }
}

// ---------------------------------------------------------------------------
// Conversion errors
// ---------------------------------------------------------------------------

/// Per-file conversion failures. These never abort a batch; the driver
/// stores them in the file's outcome and moves on.
#[derive(Debug)]
pub enum ConversionError {
    /// The file could not be opened or read.
    Read { path: PathBuf, source: io::Error },

    /// The file is not valid UTF-8.
    InvalidEncoding {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },

    /// The converted content could not be written. The file may be left
    /// empty or truncated.
    Write { path: PathBuf, source: io::Error },
}

impl ConversionError {
    /// Short machine-friendly label used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Read { .. } => "read",
            Self::InvalidEncoding { .. } => "encoding",
            Self::Write { .. } => "write",
        }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "cannot read '{}': {source}", path.display())
            }
            Self::InvalidEncoding { path, source } => {
                write!(f, "'{}': invalid UTF-8 encoding: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "cannot write '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConversionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::InvalidEncoding { source, .. } => Some(source),
            Self::Write { source, .. } => Some(source),
        }
    }
}

impl From<ConversionError> for LogBoundaryError {
    fn from(e: ConversionError) -> Self {
        Self::Conversion(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    NotFound { path: PathBuf },

    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "Config file '{}' not found", path.display())
            }
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<ConfigError> for LogBoundaryError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Report errors
// ---------------------------------------------------------------------------

/// Errors related to writing the run report.
#[derive(Debug)]
pub enum ReportError {
    /// I/O error writing the report file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Report I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV report error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON report error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ReportError> for LogBoundaryError {
    fn from(e: ReportError) -> Self {
        Self::Report(e)
    }
}

/// Convenience type alias for LogBoundary results.
pub type Result<T> = std::result::Result<T, LogBoundaryError>;
