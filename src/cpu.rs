use std::thread;

use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::error::ProfilerError;

/// Per-process CPU utilization source.
///
/// `sysinfo` reports usage summed over all cores (so it can exceed 100 on
/// multi-core machines); samples are normalized by the logical core count
/// to a 0-100 per-core scale.
pub struct CpuSource {
    sys: System,
    pid: Pid,
    cpu_count: usize,
    init_measure: f64,
}

impl CpuSource {
    pub fn new(pid: u32) -> Result<Self, ProfilerError> {
        let mut sys = System::new();
        let pid = Pid::from_u32(pid);
        if sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true) == 0 {
            return Err(ProfilerError::SourceUnavailable(format!(
                "no such process: {pid}"
            )));
        }
        let cpu_count = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let mut source = Self {
            sys,
            pid,
            cpu_count,
            init_measure: 0.0,
        };
        // first reading is always 0; kept only as the construction baseline
        source.init_measure = source.sample().unwrap_or(0.0);
        Ok(source)
    }

    /// Current usage as a percentage of one logical core.
    pub fn sample(&mut self) -> Result<f64, ProfilerError> {
        self.sys
            .refresh_processes(ProcessesToUpdate::Some(&[self.pid]), true);
        let process = self.sys.process(self.pid).ok_or_else(|| {
            ProfilerError::SampleFailed(format!("process {} disappeared", self.pid))
        })?;
        Ok(process.cpu_usage() as f64 / self.cpu_count as f64)
    }

    pub fn baseline(&self) -> f64 {
        self.init_measure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_process_sample() {
        let mut source = CpuSource::new(std::process::id()).unwrap();
        let usage = source.sample().unwrap();
        assert!(usage >= 0.0);
        assert!(source.baseline() >= 0.0);
    }

    #[test]
    fn test_unknown_pid_is_unavailable() {
        let result = CpuSource::new(999_999_999);
        assert!(matches!(result, Err(ProfilerError::SourceUnavailable(_))));
    }
}
