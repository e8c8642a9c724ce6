use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pathmetrics::correlate::LatencyWindow;
use pathmetrics::params::{ensure_matching_metadata, CaptureMetadata, RunConfig};
use pathmetrics::record::{records_from_reader, PacketRecord};

/// Correlate pre/post packet captures and compute transport statistics.
#[derive(Parser, Debug)]
#[command(name = "pathmetrics", version, about)]
struct Args {
    /// Record stream captured before the measured path (JSON array)
    pre: PathBuf,

    /// Record stream captured after the measured path (JSON array)
    post: PathBuf,

    /// Per-packet header bytes subtracted for overhead-free throughput
    #[arg(long, default_value_t = 0)]
    overhead: u64,

    /// Bucket width in seconds
    #[arg(long, default_value_t = 1.0)]
    bucket_duration: f64,

    /// Capture metadata recorded next to the pre capture (JSON object)
    #[arg(long, requires = "post_params")]
    pre_params: Option<PathBuf>,

    /// Capture metadata recorded next to the post capture (JSON object)
    #[arg(long, requires = "pre_params")]
    post_params: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn load_records(path: &Path) -> anyhow::Result<Vec<PacketRecord>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    records_from_reader(BufReader::new(file))
        .with_context(|| format!("parsing records from {}", path.display()))
}

fn load_metadata(path: &Path) -> anyhow::Result<CaptureMetadata> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing capture metadata from {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // The metadata check runs before anything else: correlating captures
    // from two different runs would silently produce nonsense.
    if let (Some(pre_params), Some(post_params)) = (&args.pre_params, &args.post_params) {
        let pre = load_metadata(pre_params)?;
        let post = load_metadata(post_params)?;
        ensure_matching_metadata(&pre, &post)?;
    }

    let pre = load_records(&args.pre)?;
    let post = load_records(&args.post)?;

    let config = RunConfig {
        overhead: args.overhead,
        bucket_duration_s: args.bucket_duration,
        latency_window: LatencyWindow::default(),
    };

    let output = pathmetrics::run(&pre, &post, &config)?;

    match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            output.report.write_json(BufWriter::new(file))?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            output.report.write_json(&mut handle)?;
            handle.write_all(b"\n")?;
        }
    }

    Ok(())
}
