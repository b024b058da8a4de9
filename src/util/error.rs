// Logtally - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors keep the causal chain
// for diagnostic logging.
//
// Failures are contained at file granularity: one unreadable file never
// prevents entries from other files in the same batch from being parsed
// and aggregated. Nothing here is fatal to the process.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all Logtally operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogTallyError {
    /// File ingestion failed for a single file.
    Ingest(IngestError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for LogTallyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ingest(e) => write!(f, "Ingest error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
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

impl std::error::Error for LogTallyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Ingest(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Ingest errors
// ---------------------------------------------------------------------------

/// Per-file ingestion failures. These are recorded in the batch result and
/// never abort the batch; the affected file contributes zero entries.
#[derive(Debug)]
pub enum IngestError {
    /// The file extension is not in the accepted set (.log / .txt).
    UnsupportedExtension { path: PathBuf },

    /// The file's contents could not be obtained as text.
    Read { path: PathBuf, source: io::Error },
}

impl IngestError {
    /// Short human-readable reason, used for the batch's read-failure records.
    pub fn reason(&self) -> String {
        match self {
            Self::UnsupportedExtension { .. } => "unsupported file extension".to_string(),
            Self::Read { source, .. } => format!("cannot read file as text: {source}"),
        }
    }

    /// The file the failure applies to.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::UnsupportedExtension { path } => path,
            Self::Read { path, .. } => path,
        }
    }
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedExtension { path } => {
                write!(
                    f,
                    "'{}': unsupported file extension (accepted: .log, .txt)",
                    path.display()
                )
            }
            Self::Read { path, source } => {
                write!(f, "'{}': cannot read as text: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<IngestError> for LogTallyError {
    fn from(e: IngestError) -> Self {
        Self::Ingest(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export output.
    Io { target: String, source: io::Error },

    /// CSV serialisation error.
    Csv { target: String, source: csv::Error },

    /// JSON serialisation error.
    Json {
        target: String,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { target, source } => {
                write!(f, "Export I/O error '{target}': {source}")
            }
            Self::Csv { target, source } => {
                write!(f, "CSV export error '{target}': {source}")
            }
            Self::Json { target, source } => {
                write!(f, "JSON export error '{target}': {source}")
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for LogTallyError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
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
            _ => None,
        }
    }
}

impl From<ConfigError> for LogTallyError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for Logtally results.
pub type Result<T> = std::result::Result<T, LogTallyError>;
