use anyhow::Result;
use clap::Parser;
use higgsml::{cli::Cli, config::RunConfig, pipeline};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber, INFO by default and TRACE with --debug
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();

    if !args.cutoff.is_finite() {
        anyhow::bail!("Invalid value for --cut: {} (must be finite)", args.cutoff);
    }

    init_tracing(args.debug);

    let config = RunConfig::from_cli(args);
    let start = Instant::now();
    let result = pipeline::run(&config);
    tracing::info!("timing: {:?}", start.elapsed());

    let report = result?;
    print!("{}", report.render(config.format)?);
    Ok(())
}
