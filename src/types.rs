use chrono::{DateTime, Utc};
use std::fmt;

pub(crate) const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// A single timestamped observation across all enabled metric sources.
///
/// GPU fields are always 0.0 when the profiler was built without a GPU
/// source.
#[derive(Debug, Clone, Copy)]
pub struct SampleRecord {
    pub timestamp: DateTime<Utc>,
    pub cpu_percent: f64,
    pub ram_mb: f64,
    pub gpu_percent: f64,
    pub gpu_memory_mb: f64,
}

/// The numeric fields of a record that peak queries can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    CpuPercent,
    RamMb,
    GpuPercent,
    GpuMemoryMb,
}

impl SampleRecord {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::CpuPercent => self.cpu_percent,
            Metric::RamMb => self.ram_mb,
            Metric::GpuPercent => self.gpu_percent,
            Metric::GpuMemoryMb => self.gpu_memory_mb,
        }
    }
}

/// Peak usage over a recorded series, one value per metric field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakMetrics {
    pub cpu_percent: f64,
    pub ram_mb: f64,
    pub gpu_percent: f64,
    pub gpu_memory_mb: f64,
}

impl PeakMetrics {
    /// Ordered as (CPU %, RAM MB, GPU %, GPU memory MB).
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (
            self.cpu_percent,
            self.ram_mb,
            self.gpu_percent,
            self.gpu_memory_mb,
        )
    }
}

impl fmt::Display for SampleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Record {{ ts: {}, cpu: {:.2}%, ram: {:.2} MB, gpu: {:.2}%, gpu_mem: {:.2} MB }}",
            self.timestamp, self.cpu_percent, self.ram_mb, self.gpu_percent, self.gpu_memory_mb
        )
    }
}
