use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by profiler construction, the session lifecycle and
/// report export. A `SampleFailed` during a running session is recovered
/// inside the sampling loop and never aborts it.
#[derive(Debug, Error)]
pub enum ProfilerError {
    /// A metric source could not be constructed.
    #[error("metric source unavailable: {0}")]
    SourceUnavailable(String),

    /// GPU monitoring was requested but the device cannot be reached.
    #[error("GPU device {index} unavailable: {reason}")]
    GpuUnavailable { index: u32, reason: String },

    /// A single read from a metric source failed.
    #[error("sample read failed: {0}")]
    SampleFailed(String),

    #[error("a profiling session is already active")]
    SessionAlreadyActive,

    #[error("no profiling session is active")]
    SessionNotActive,

    /// Writing the report artifact failed. The recorded series is kept.
    #[error("failed to write report to {path}: {source}")]
    ExportFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
