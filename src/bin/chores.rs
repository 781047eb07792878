use chore_tracker::cli::{self, Cli};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if let Err(err) = cli::run(Cli::parse()).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
