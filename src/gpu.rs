use nvml_wrapper::error::NvmlError;
use nvml_wrapper::Nvml;

use crate::error::ProfilerError;
use crate::types::BYTES_PER_MB;

/// NVML-backed utilization and memory source for one GPU device.
///
/// The `Device` handle borrows the NVML context, so the context and the
/// device index are stored and the handle is re-fetched on every sample.
pub struct GpuSource {
    nvml: Nvml,
    device_index: u32,
    init_util: f64,
    init_memory_mb: f64,
}

impl GpuSource {
    pub fn new(device_index: u32) -> Result<Self, ProfilerError> {
        let unavailable = |e: NvmlError| ProfilerError::GpuUnavailable {
            index: device_index,
            reason: e.to_string(),
        };
        let nvml = Nvml::init().map_err(unavailable)?;
        let (init_util, init_memory_mb) = {
            let device = nvml.device_by_index(device_index).map_err(unavailable)?;
            let util = device.utilization_rates().map_err(unavailable)?.gpu as f64;
            let memory = device.memory_info().map_err(unavailable)?.used as f64 / BYTES_PER_MB;
            (util, memory)
        };
        Ok(Self {
            nvml,
            device_index,
            init_util,
            init_memory_mb,
        })
    }

    /// Returns (utilization percent, memory used in MB) for the device.
    pub fn sample(&self) -> Result<(f64, f64), ProfilerError> {
        let failed = |e: NvmlError| ProfilerError::SampleFailed(e.to_string());
        let device = self
            .nvml
            .device_by_index(self.device_index)
            .map_err(failed)?;
        let util = device.utilization_rates().map_err(failed)?.gpu as f64;
        let memory_mb = device.memory_info().map_err(failed)?.used as f64 / BYTES_PER_MB;
        Ok((util, memory_mb))
    }

    pub fn baseline(&self) -> (f64, f64) {
        (self.init_util, self.init_memory_mb)
    }
}
