use std::sync::Mutex;

use crate::types::{Metric, SampleRecord};

/// A thread-safe, append-only time series of sample records.
///
/// The sampling thread is the sole writer; readers take cloned snapshots
/// and never observe a partially written record.
pub struct SeriesStore {
    data: Mutex<Vec<SampleRecord>>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self {
            data: Mutex::new(Vec::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        let data = self.data.lock().unwrap();
        data.is_empty()
    }

    pub fn len(&self) -> usize {
        let data = self.data.lock().unwrap();
        data.len()
    }

    pub fn append(&self, record: SampleRecord) {
        let mut data = self.data.lock().unwrap();
        data.push(record);
    }

    /// Full ordered copy of everything recorded so far.
    pub fn snapshot(&self) -> Vec<SampleRecord> {
        let data = self.data.lock().unwrap();
        data.clone()
    }

    /// Maximum observed value of one metric field, or `None` for an empty
    /// store. An all-zero field peaks at `Some(0.0)`.
    pub fn peak(&self, metric: Metric) -> Option<f64> {
        let data = self.data.lock().unwrap();
        data.iter()
            .map(|record| record.value(metric))
            .fold(None, |acc, value| match acc {
                None => Some(value),
                Some(max) => Some(max.max(value)),
            })
    }
}

impl Default for SeriesStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(cpu: f64, ram: f64) -> SampleRecord {
        SampleRecord {
            timestamp: Utc::now(),
            cpu_percent: cpu,
            ram_mb: ram,
            gpu_percent: 0.0,
            gpu_memory_mb: 0.0,
        }
    }

    #[test]
    fn test_empty_peaks_are_none() {
        let store = SeriesStore::new();
        assert!(store.is_empty());
        assert_eq!(store.peak(Metric::CpuPercent), None);
        assert_eq!(store.peak(Metric::GpuMemoryMb), None);
    }

    #[test]
    fn test_peak_is_field_maximum() {
        let store = SeriesStore::new();
        store.append(record(10.0, 250.0));
        store.append(record(35.5, 120.0));
        store.append(record(20.0, 180.0));

        assert_eq!(store.len(), 3);
        assert_eq!(store.peak(Metric::CpuPercent), Some(35.5));
        assert_eq!(store.peak(Metric::RamMb), Some(250.0));
        // disabled GPU fields peak at zero, not None
        assert_eq!(store.peak(Metric::GpuPercent), Some(0.0));
    }

    #[test]
    fn test_snapshot_preserves_insertion_order() {
        let store = SeriesStore::new();
        store.append(record(1.0, 1.0));
        store.append(record(2.0, 2.0));
        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].cpu_percent, 1.0);
        assert_eq!(snapshot[1].cpu_percent, 2.0);
    }
}
