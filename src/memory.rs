use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::error::ProfilerError;
use crate::types::BYTES_PER_MB;

/// Virtual memory size of the target process, in megabytes.
pub struct MemorySource {
    sys: System,
    pid: Pid,
    init_measure: f64,
}

impl MemorySource {
    pub fn new(pid: u32) -> Result<Self, ProfilerError> {
        let mut sys = System::new();
        let pid = Pid::from_u32(pid);
        if sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true) == 0 {
            return Err(ProfilerError::SourceUnavailable(format!(
                "no such process: {pid}"
            )));
        }
        let mut source = Self {
            sys,
            pid,
            init_measure: 0.0,
        };
        source.init_measure = source.sample().unwrap_or(0.0);
        Ok(source)
    }

    pub fn sample(&mut self) -> Result<f64, ProfilerError> {
        self.sys
            .refresh_processes(ProcessesToUpdate::Some(&[self.pid]), true);
        let process = self.sys.process(self.pid).ok_or_else(|| {
            ProfilerError::SampleFailed(format!("process {} disappeared", self.pid))
        })?;
        Ok(process.virtual_memory() as f64 / BYTES_PER_MB)
    }

    pub fn baseline(&self) -> f64 {
        self.init_measure
    }
}
