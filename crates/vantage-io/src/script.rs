//! Scripted input sessions, replayed against a simulated fixed-rate clock.
//!
//! A script is a JSON list of timed events:
//!
//! ```json
//! [
//!   { "at": 0.0, "event": { "type": "key_down", "key": "f" } },
//!   { "at": 0.5, "event": { "type": "click", "x": 400, "y": 300 } }
//! ]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use vantage_base::{Error, Result};
use vantage_nav::{FrameReport, InputEvent, NavigationState, PlatformCommand};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptStep {
    pub at: f64,
    pub event: InputEvent,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Script {
    steps: Vec<ScriptStep>,
}

#[derive(Clone, Debug)]
pub struct ReplayOutcome {
    pub frames: u64,
    pub teleports: usize,
    pub elapsed: f64,
    pub last: FrameReport,
}

pub fn load_script(path: impl AsRef<Path>) -> Result<Script> {
    let text = fs::read_to_string(path.as_ref())?;
    Script::parse(&text)
}

impl Script {
    pub fn parse(text: &str) -> Result<Self> {
        let steps: Vec<ScriptStep> = serde_json::from_str(text)?;
        Self::new(steps)
    }

    pub fn new(steps: Vec<ScriptStep>) -> Result<Self> {
        let mut last = 0.0;
        for (index, step) in steps.iter().enumerate() {
            if !step.at.is_finite() || step.at < last {
                return Err(Error::InvalidParameter(format!(
                    "step {index}: time {} is not finite and non-decreasing",
                    step.at
                )));
            }
            last = step.at;
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    pub fn duration(&self) -> f64 {
        self.steps.last().map_or(0.0, |step| step.at)
    }

    /// Feeds the script into `state` at `fps` frames per second, answering
    /// capture requests the way a cooperative platform would (one frame
    /// later). Runs until the script is exhausted, `settle` seconds have
    /// passed after the last step, and no teleport is in flight.
    pub fn replay(&self, state: &mut NavigationState, fps: f64, settle: f64) -> Result<ReplayOutcome> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(Error::InvalidParameter(format!("fps must be > 0, got {fps}")));
        }
        let dt = 1.0 / fps;
        let end = self.duration() + settle.max(0.0);

        let mut next = 0;
        let mut frames = 0u64;
        let mut teleports = 0;
        loop {
            let now = frames as f64 * dt;
            while let Some(step) = self.steps.get(next).filter(|step| step.at <= now) {
                trace!(at = step.at, event = ?step.event, "script event");
                state.push(step.event);
                next += 1;
            }

            let report = state.frame(now);
            frames += 1;
            if report.teleport_started.is_some() {
                teleports += 1;
            }
            for command in &report.commands {
                let engaged = matches!(command, PlatformCommand::RequestCapture);
                debug!(?command, "platform command");
                state.push(InputEvent::CaptureChanged { engaged });
            }

            if next >= self.steps.len() && now >= end && state.teleport().is_none() {
                return Ok(ReplayOutcome {
                    frames,
                    teleports,
                    elapsed: now,
                    last: report,
                });
            }
        }
    }
}
