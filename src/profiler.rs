use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::cpu::CpuSource;
use crate::error::ProfilerError;
use crate::gpu::GpuSource;
use crate::memory::MemorySource;
use crate::report;
use crate::sampler::Sampler;
use crate::series::SeriesStore;
use crate::types::{Metric, PeakMetrics, SampleRecord};

/// Profiler configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Report destination. `None` opens the report interactively.
    pub output_path: Option<PathBuf>,
    pub gpu_device_index: u32,
    pub enable_gpu: bool,
    pub sampling_period: Duration,
    /// Process to monitor. `None` means the current process.
    pub pid: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: None,
            gpu_device_index: 0,
            enable_gpu: true,
            sampling_period: Duration::from_millis(100),
            pid: None,
        }
    }
}

/// Owns the metric sources, the shared series store and the sampling
/// thread for one monitoring session.
///
/// The sources move into the sampling thread at `begin_session`, so a
/// profiler serves exactly one session; construct a fresh one per
/// monitored block.
pub struct Profiler {
    config: Config,
    store: Arc<SeriesStore>,
    running: Arc<AtomicBool>,
    sampler: Option<Sampler>,
    handle: Option<JoinHandle<()>>,
    has_gpu: bool,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
}

impl Profiler {
    /// Builds all enabled metric sources. Requesting GPU monitoring on a
    /// machine where the device cannot be reached is a hard error; pass
    /// `enable_gpu: false` to skip the GPU source entirely.
    pub fn new(config: Config) -> Result<Self, ProfilerError> {
        let pid = config.pid.unwrap_or_else(std::process::id);
        let cpu = CpuSource::new(pid)?;
        let ram = MemorySource::new(pid)?;
        let gpu = if config.enable_gpu {
            Some(GpuSource::new(config.gpu_device_index)?)
        } else {
            None
        };
        debug!(
            "profiling pid {pid}: cpu baseline {:.2}%, ram baseline {:.2} MB",
            cpu.baseline(),
            ram.baseline()
        );
        if let Some(gpu) = &gpu {
            let (util, memory_mb) = gpu.baseline();
            debug!("gpu baseline {util:.2}%, {memory_mb:.2} MB");
        }

        let store = Arc::new(SeriesStore::new());
        let running = Arc::new(AtomicBool::new(false));
        let has_gpu = gpu.is_some();
        let sampler = Sampler::new(
            cpu,
            ram,
            gpu,
            Arc::clone(&store),
            Arc::clone(&running),
            config.sampling_period,
        );
        Ok(Self {
            config,
            store,
            running,
            sampler: Some(sampler),
            handle: None,
            has_gpu,
            start_time: None,
            end_time: None,
        })
    }

    /// Starts the background sampling loop and stamps the session start.
    pub fn begin_session(&mut self) -> Result<(), ProfilerError> {
        let sampler = self
            .sampler
            .take()
            .ok_or(ProfilerError::SessionAlreadyActive)?;
        self.running.store(true, Ordering::Relaxed);
        self.handle = Some(sampler.spawn());
        self.start_time = Some(Utc::now());
        Ok(())
    }

    /// Stops the loop and blocks until the drain finishes, then stamps
    /// the session end. With `export`, prints the peak summary and writes
    /// or displays the report; an export failure propagates but the
    /// recorded series stays available.
    pub fn end_session(&mut self, export: bool) -> Result<(), ProfilerError> {
        let handle = self.handle.take().ok_or(ProfilerError::SessionNotActive)?;
        self.running.store(false, Ordering::Relaxed);
        if handle.join().is_err() {
            warn!("sampling thread panicked; keeping records collected so far");
        }
        self.end_time = Some(Utc::now());
        if export {
            report::print_summary(&self.get_peaks(), self.session_duration());
            report::export(
                &self.get_series(),
                self.has_gpu,
                self.config.output_path.as_deref(),
            )?;
        }
        Ok(())
    }

    /// Runs `workload` inside a session. The loop is stopped and drained
    /// on every exit path, panics included.
    pub fn scoped<T>(
        &mut self,
        export: bool,
        workload: impl FnOnce() -> T,
    ) -> Result<T, ProfilerError> {
        self.begin_session()?;
        let outcome = catch_unwind(AssertUnwindSafe(workload));
        let teardown = self.end_session(export);
        match outcome {
            Ok(value) => teardown.map(|_| value),
            Err(panic) => resume_unwind(panic),
        }
    }

    /// Consistent snapshot of everything recorded so far; callable while
    /// a session is still running.
    pub fn get_series(&self) -> Vec<SampleRecord> {
        self.store.snapshot()
    }

    /// Peak of each metric field, 0.0 when nothing was recorded.
    pub fn get_peaks(&self) -> PeakMetrics {
        PeakMetrics {
            cpu_percent: self.store.peak(Metric::CpuPercent).unwrap_or(0.0),
            ram_mb: self.store.peak(Metric::RamMb).unwrap_or(0.0),
            gpu_percent: self.store.peak(Metric::GpuPercent).unwrap_or(0.0),
            gpu_memory_mb: self.store.peak(Metric::GpuMemoryMb).unwrap_or(0.0),
        }
    }

    /// Wall-clock time between session start and end, once both exist.
    pub fn session_duration(&self) -> Option<chrono::Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    pub fn gpu_enabled(&self) -> bool {
        self.has_gpu
    }
}
