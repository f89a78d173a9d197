use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mudo_backend::services::points::{self, DEFAULT_INPUT, DEFAULT_OUTPUT};

/// Turn an image into the normalized point cloud used by the frontend.
#[derive(Parser, Debug)]
#[command(name = "extract-points", version, about)]
struct Args {
    /// Source image
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// JSON file to write the `[x, y]` pairs to
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();
    points::run(&args.input, &args.output);
}
