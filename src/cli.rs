use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use anyhow::{bail, Result};


#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Process to monitor.
    #[arg(short, long)]
    pub pid: u32,

    /// How long to monitor, in milliseconds.
    #[arg(short, long, default_value = "1000")]
    pub duration: u64,

    /// Sampling period, in milliseconds.
    #[arg(short, long, default_value = "100")]
    pub interval: u64,

    /// Write the HTML report here instead of opening it in a browser.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// GPU device to monitor.
    #[arg(long, default_value = "0")]
    pub gpu_device: u32,

    /// Skip GPU monitoring entirely.
    #[arg(long)]
    pub no_gpu: bool,
}

pub fn parse_interval(millis: u64) -> Result<Duration> {
    if millis == 0 {
        bail!("sampling interval must be at least 1 ms");
    }
    Ok(Duration::from_millis(millis))
}
