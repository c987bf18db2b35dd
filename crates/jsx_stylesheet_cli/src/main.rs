use clap::Parser;
use jsx_stylesheet_cli::{run, Args};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
  initialize_tracing();

  let args = Args::parse();
  if let Err(error) = run(&args) {
    error!("{:#}", error);
    std::process::exit(1);
  }
}

fn initialize_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}
