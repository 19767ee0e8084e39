//! CLI entry point for image-guided maze generation

use clap::Parser;
use edgemaze::io::cli::{Cli, FileProcessor};

fn main() -> edgemaze::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
