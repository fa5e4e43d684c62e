use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Handle linking a pick marker back to the viewpoint it stands for. Ids
/// are random per load and never persisted.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewpointId(Uuid);

impl ViewpointId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ViewpointId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ViewpointId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ViewpointId> for Uuid {
    fn from(id: ViewpointId) -> Self {
        id.0
    }
}

impl fmt::Display for ViewpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vp-{}", self.0.simple())
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("malformed viewpoint source: {0}")]
    Source(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
