use anyhow::Result;
use clap::Parser;

mod cli;
#[cfg(feature = "gui")]
mod gui;
mod headless;

fn main() -> Result<()> {
    init_tracing();
    let args = cli::CliArgs::parse();
    match args.mode {
        Some(cli::Mode::Inspect(inspect)) => headless::run_inspect(inspect),
        Some(cli::Mode::Replay(replay)) => headless::run_replay(replay),
        None => run_gui(args.window),
    }
}

#[cfg(feature = "gui")]
fn run_gui(args: cli::WindowArgs) -> Result<()> {
    gui::run_gui(args)
}

#[cfg(not(feature = "gui"))]
fn run_gui(_args: cli::WindowArgs) -> Result<()> {
    anyhow::bail!("no window support in this build; use `inspect` or `replay`, or enable the `gui` feature");
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
