use anyhow::Result;
use cedict_client::cli::Args;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // quiet by default; -v / -vv or RUST_LOG turn it up
    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let directive: Directive = format!("cedict_client={level}").parse()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    cedict_client::run(args).await
}
