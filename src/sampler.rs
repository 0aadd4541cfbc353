use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use log::warn;

use crate::cpu::CpuSource;
use crate::gpu::GpuSource;
use crate::memory::MemorySource;
use crate::series::SeriesStore;
use crate::types::SampleRecord;

/// Extra ticks taken after a stop request, to catch usage right at the
/// end of a workload (e.g. a final allocation spike).
pub const DRAIN_TICKS: usize = 10;

pub struct Sampler {
    cpu: CpuSource,
    ram: MemorySource,
    gpu: Option<GpuSource>,
    store: Arc<SeriesStore>,
    running: Arc<AtomicBool>,
    period: Duration,
}

/// Sampler polls every enabled source once per tick and appends one
/// record to the shared store.
impl Sampler {
    pub fn new(
        cpu: CpuSource,
        ram: MemorySource,
        gpu: Option<GpuSource>,
        store: Arc<SeriesStore>,
        running: Arc<AtomicBool>,
        period: Duration,
    ) -> Self {
        Self {
            cpu,
            ram,
            gpu,
            store,
            running,
            period,
        }
    }

    /// New thread records samples while the caller's thread runs the
    /// monitored workload. The sleep is not compensated for sampling
    /// latency, so the tick rate drifts under load.
    pub fn spawn(mut self) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            while self.running.load(Ordering::Relaxed) {
                self.tick();
                thread::sleep(self.period);
            }
            for _ in 0..DRAIN_TICKS {
                self.tick();
                thread::sleep(self.period);
            }
        })
    }

    /// One sample from every enabled source, zero on a failed read. A
    /// failed read must not kill the loop.
    fn tick(&mut self) {
        let timestamp = Utc::now();
        let cpu_percent = self.cpu.sample().unwrap_or_else(|e| {
            warn!("cpu sample failed: {e}");
            0.0
        });
        let ram_mb = self.ram.sample().unwrap_or_else(|e| {
            warn!("memory sample failed: {e}");
            0.0
        });
        let (gpu_percent, gpu_memory_mb) = match self.gpu.as_ref() {
            Some(gpu) => gpu.sample().unwrap_or_else(|e| {
                warn!("gpu sample failed: {e}");
                (0.0, 0.0)
            }),
            None => (0.0, 0.0),
        };
        self.store.append(SampleRecord {
            timestamp,
            cpu_percent,
            ram_mb,
            gpu_percent,
            gpu_memory_mb,
        });
    }
}
