use anyhow::{Context, Result, bail};
use std::path::Path;
use tracing::info;
use vantage_io::{FileSource, load_config, load_script};
use vantage_nav::{NavConfig, NavigationState, NullScene, ViewpointRegistry};

use crate::cli::{InspectArgs, ReplayArgs};

pub fn run_inspect(args: InspectArgs) -> Result<()> {
    let source = FileSource::new(&args.cameras);
    let (registry, summary) = ViewpointRegistry::try_load(&source, NavConfig::default().marker_radius)
        .with_context(|| format!("failed to load cameras from {}", args.cameras.display()))?;

    for (index, viewpoint) in registry.viewpoints().iter().enumerate() {
        let position = viewpoint.transform().translation();
        info!(
            index,
            id = %viewpoint.id(),
            label = %viewpoint.label().unwrap_or_default(),
            x = position.x,
            y = position.y,
            z = position.z,
            "viewpoint"
        );
    }
    info!(
        accepted = summary.accepted,
        missing = summary.missing,
        invalid = summary.invalid,
        "inspection complete"
    );
    Ok(())
}

pub fn run_replay(args: ReplayArgs) -> Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        bail!("--fps must be a positive number, got {}", args.fps);
    }
    let mut state = build_state(Some(&args.cameras), args.config.as_deref())?;
    let script = load_script(&args.script)
        .with_context(|| format!("failed to load script {}", args.script.display()))?;

    let mut scene = NullScene::default();
    state.attach_markers(&mut scene);
    let outcome = script.replay(&mut state, args.fps, args.settle)?;

    let position = outcome.last.pose.position;
    info!(
        markers = scene.markers,
        frames = outcome.frames,
        teleports = outcome.teleports,
        elapsed = outcome.elapsed,
        "replay finished"
    );
    info!(
        mode = outcome.last.mode.label(),
        x = position.x,
        y = position.y,
        z = position.z,
        "final pose"
    );
    Ok(())
}

/// Builds a navigation state from optional config and camera files.
pub fn build_state(cameras: Option<&Path>, config: Option<&Path>) -> Result<NavigationState> {
    let config = match config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => NavConfig::default(),
    };
    let registry = match cameras {
        Some(path) => ViewpointRegistry::load(&FileSource::new(path), config.marker_radius),
        None => ViewpointRegistry::default(),
    };
    Ok(NavigationState::with_registry(config, registry))
}
