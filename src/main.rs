use broadcast_verify::opts::BroadcastVerifyArgs;
use clap::Parser;
use eyre::Result;

fn main() -> Result<()> {
    subscriber();
    let args = BroadcastVerifyArgs::parse();
    args.run()
}

/// Initializes a tracing subscriber for logging, configured through
/// `RUST_LOG`.
fn subscriber() {
    tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
