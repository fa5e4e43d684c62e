use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vantage-view")]
#[command(about = "Orbit, walk and teleport through the viewpoints of a scene")]
pub struct CliArgs {
    #[command(subcommand)]
    pub mode: Option<Mode>,
    #[command(flatten)]
    pub window: WindowArgs,
}

#[derive(Subcommand)]
pub enum Mode {
    /// List the viewpoints a camera document yields.
    Inspect(InspectArgs),
    /// Run a scripted input session without a window.
    Replay(ReplayArgs),
}

#[derive(Args)]
pub struct WindowArgs {
    #[arg(long)]
    pub cameras: Option<PathBuf>,
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct InspectArgs {
    #[arg(long)]
    pub cameras: PathBuf,
}

#[derive(Args)]
pub struct ReplayArgs {
    #[arg(long)]
    pub cameras: PathBuf,
    #[arg(long)]
    pub script: PathBuf,
    #[arg(long, default_value_t = 60.0)]
    pub fps: f64,
    #[arg(long, default_value_t = 0.5)]
    pub settle: f64,
    #[arg(long)]
    pub config: Option<PathBuf>,
}
