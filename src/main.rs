use anyhow::Result;
use clap::Parser;
use std::{thread, time::Duration};
use rsprof::profiler::{Config, Profiler};
use rsprof::cli;

fn main() -> Result<()> {
    env_logger::init();
    let args = cli::Args::parse();
    let sampling_period = cli::parse_interval(args.interval)?;
    let config = Config {
        output_path: args.output,
        gpu_device_index: args.gpu_device,
        enable_gpu: !args.no_gpu,
        sampling_period,
        pid: Some(args.pid),
    };
    let mut profiler = Profiler::new(config)?;
    profiler.begin_session()?;
    thread::sleep(Duration::from_millis(args.duration));
    profiler.end_session(true)?;
    Ok(())
}
