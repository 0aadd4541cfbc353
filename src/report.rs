use std::fs;
use std::path::Path;

use plotly::common::Mode;
use plotly::layout::{GridPattern, Layout, LayoutGrid};
use plotly::{Plot, Scatter};

use crate::error::ProfilerError;
use crate::types::{PeakMetrics, SampleRecord};

pub fn print_summary(peaks: &PeakMetrics, elapsed: Option<chrono::Duration>) {
    println!("\n{:=^60}", " PEAK USAGE ");
    println!("{:<40} | {:>15}", "Metric", "Peak");
    println!("{:-^60}", "");
    println!("{:<40} | {:>12.2} %", "CPU utilization", peaks.cpu_percent);
    println!("{:<40} | {:>11.2} MB", "RAM usage", peaks.ram_mb);
    println!("{:<40} | {:>12.2} %", "GPU utilization", peaks.gpu_percent);
    println!("{:<40} | {:>11.2} MB", "GPU memory usage", peaks.gpu_memory_mb);
    println!("{:-^60}", "");
    if let Some(elapsed) = elapsed {
        println!(
            "Total runtime: {:.3} s",
            elapsed.num_milliseconds() as f64 / 1000.0
        );
    }
    println!("{:=^60}\n", "");
}

/// Renders the series as a two-panel figure, percentages on the left and
/// megabytes on the right, then displays it or writes self-contained HTML.
pub fn export(
    records: &[SampleRecord],
    has_gpu: bool,
    output: Option<&Path>,
) -> Result<(), ProfilerError> {
    let plot = build_plot(records, has_gpu);
    match output {
        None => {
            plot.show();
            Ok(())
        }
        Some(path) => {
            fs::write(path, plot.to_html()).map_err(|source| ProfilerError::ExportFailed {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

fn build_plot(records: &[SampleRecord], has_gpu: bool) -> Plot {
    let timestamps: Vec<String> = records
        .iter()
        .map(|record| record.timestamp.to_rfc3339())
        .collect();

    let mut plot = Plot::new();
    plot.set_layout(
        Layout::new().grid(
            LayoutGrid::new()
                .rows(1)
                .columns(2)
                .pattern(GridPattern::Independent),
        ),
    );

    let cpu: Vec<f64> = records.iter().map(|r| r.cpu_percent).collect();
    plot.add_trace(
        Scatter::new(timestamps.clone(), cpu)
            .mode(Mode::Lines)
            .name("CPU_utilization_%")
            .x_axis("x1")
            .y_axis("y1"),
    );

    let ram: Vec<f64> = records.iter().map(|r| r.ram_mb).collect();
    plot.add_trace(
        Scatter::new(timestamps.clone(), ram)
            .mode(Mode::Lines)
            .name("total_RAM_memory_usage_MB")
            .x_axis("x2")
            .y_axis("y2"),
    );

    if has_gpu {
        let gpu_util: Vec<f64> = records.iter().map(|r| r.gpu_percent).collect();
        plot.add_trace(
            Scatter::new(timestamps.clone(), gpu_util)
                .mode(Mode::Lines)
                .name("GPU_utilization_%")
                .x_axis("x1")
                .y_axis("y1"),
        );

        let gpu_memory: Vec<f64> = records.iter().map(|r| r.gpu_memory_mb).collect();
        plot.add_trace(
            Scatter::new(timestamps, gpu_memory)
                .mode(Mode::Lines)
                .name("total_GPU_memory_usage_MB")
                .x_axis("x2")
                .y_axis("y2"),
        );
    }

    plot
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(cpu: f64) -> SampleRecord {
        SampleRecord {
            timestamp: Utc::now(),
            cpu_percent: cpu,
            ram_mb: 100.0,
            gpu_percent: 0.0,
            gpu_memory_mb: 0.0,
        }
    }

    #[test]
    fn test_plot_has_gpu_traces_only_when_enabled() {
        let records = vec![record(5.0), record(10.0)];
        let without_gpu = build_plot(&records, false).to_html();
        assert!(without_gpu.contains("CPU_utilization_%"));
        assert!(without_gpu.contains("total_RAM_memory_usage_MB"));
        assert!(!without_gpu.contains("GPU_utilization_%"));

        let with_gpu = build_plot(&records, true).to_html();
        assert!(with_gpu.contains("GPU_utilization_%"));
        assert!(with_gpu.contains("total_GPU_memory_usage_MB"));
    }
}
