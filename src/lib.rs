//! rsprof samples CPU, RAM and (optionally) GPU usage of a process at a
//! fixed interval on a background thread, records a time series, and
//! reports peak statistics or a plotly graph of the whole run.

pub mod cli;
pub mod cpu;
pub mod error;
pub mod gpu;
pub mod memory;
pub mod profiler;
pub mod report;
pub mod sampler;
pub mod series;
pub mod types;

pub use error::ProfilerError;
pub use profiler::{Config, Profiler};
pub use types::{Metric, PeakMetrics, SampleRecord};
