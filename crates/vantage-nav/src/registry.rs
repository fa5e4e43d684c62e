//! Viewpoints loaded from the external camera document, and their pick markers.

use cgmath::Point3;
use serde_json::{Map, Value};
use tracing::{error, info, warn};
use vantage_base::{Error, Result, ViewpointId};

use crate::transform::{SkipReason, TransformMatrix, TransformOutcome, parse_transform};

const CAMERAS_PATH: [&str; 4] = ["document", "chunk", "cameras", "camera"];
const LABEL_KEYS: [&str; 4] = ["label", "@label", "id", "@id"];

/// Supplies the raw text of the camera document.
pub trait ViewpointSource {
    fn describe(&self) -> String;
    fn fetch(&self) -> Result<String>;
}

/// In-memory document, mostly useful for tests and embedding.
#[derive(Clone, Debug)]
pub struct StaticSource(pub String);

impl ViewpointSource for StaticSource {
    fn describe(&self) -> String {
        "inline document".to_string()
    }

    fn fetch(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// A named camera pose. Immutable once loaded.
#[derive(Clone, Debug)]
pub struct Viewpoint {
    id: ViewpointId,
    transform: TransformMatrix,
    metadata: Map<String, Value>,
}

impl Viewpoint {
    pub fn new(transform: TransformMatrix, metadata: Map<String, Value>) -> Self {
        Self {
            id: ViewpointId::new(),
            transform,
            metadata,
        }
    }

    pub fn id(&self) -> ViewpointId {
        self.id
    }

    pub fn transform(&self) -> &TransformMatrix {
        &self.transform
    }

    /// The source entry minus its `transform` field.
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    pub fn label(&self) -> Option<String> {
        LABEL_KEYS.iter().find_map(|key| match self.metadata.get(*key)? {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
    }
}

/// Pickable sphere standing in for a viewpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub viewpoint: ViewpointId,
    pub center: Point3<f64>,
    pub radius: f64,
}

#[derive(Clone, Debug, Default)]
pub struct LoadSummary {
    pub accepted: usize,
    pub missing: usize,
    pub invalid: usize,
}

#[derive(Clone, Debug, Default)]
pub struct ViewpointRegistry {
    viewpoints: Vec<Viewpoint>,
    markers: Vec<Marker>,
}

impl ViewpointRegistry {
    /// Best-effort load: a failure of the whole source is logged once and
    /// yields an empty registry.
    pub fn load(source: &dyn ViewpointSource, marker_radius: f64) -> Self {
        match Self::try_load(source, marker_radius) {
            Ok((registry, _)) => registry,
            Err(err) => {
                error!(source = %source.describe(), error = %err, "viewpoint load failed");
                Self::default()
            }
        }
    }

    pub fn try_load(
        source: &dyn ViewpointSource,
        marker_radius: f64,
    ) -> Result<(Self, LoadSummary)> {
        let text = source.fetch()?;
        let document: Value = serde_json::from_str(&text)?;
        let entries = camera_entries(&document)?;

        let mut registry = Self::default();
        let mut summary = LoadSummary::default();
        for (index, entry) in entries.into_iter().enumerate() {
            match parse_transform(entry.get("transform")) {
                TransformOutcome::Matrix(transform) => {
                    let mut metadata = entry.as_object().cloned().unwrap_or_default();
                    metadata.remove("transform");
                    registry.insert(Viewpoint::new(transform, metadata), marker_radius);
                    summary.accepted += 1;
                }
                TransformOutcome::Skip(SkipReason::Missing) => {
                    info!(index, "skipping camera without transform");
                    summary.missing += 1;
                }
                TransformOutcome::Skip(reason) => {
                    warn!(index, %reason, "invalid transform for camera");
                    summary.invalid += 1;
                }
            }
        }

        info!(
            count = summary.accepted,
            skipped = summary.missing + summary.invalid,
            "loaded viewpoints"
        );
        Ok((registry, summary))
    }

    pub fn insert(&mut self, viewpoint: Viewpoint, marker_radius: f64) -> Marker {
        let transform = viewpoint.transform();
        let marker = Marker {
            viewpoint: viewpoint.id(),
            center: transform.translation(),
            radius: marker_radius * transform.max_scale(),
        };
        self.viewpoints.push(viewpoint);
        self.markers.push(marker);
        marker
    }

    pub fn viewpoints(&self) -> &[Viewpoint] {
        &self.viewpoints
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn get(&self, id: ViewpointId) -> Option<&Viewpoint> {
        self.viewpoints.iter().find(|viewpoint| viewpoint.id() == id)
    }

    pub fn resolve(&self, marker: &Marker) -> Option<&Viewpoint> {
        self.get(marker.viewpoint)
    }

    pub fn len(&self) -> usize {
        self.viewpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewpoints.is_empty()
    }

    pub fn clear(&mut self) {
        self.viewpoints.clear();
        self.markers.clear();
    }
}

fn camera_entries(document: &Value) -> Result<Vec<&Value>> {
    let mut node = document;
    for key in CAMERAS_PATH {
        node = node
            .get(key)
            .ok_or_else(|| Error::Source(format!("missing `{}`", CAMERAS_PATH.join("."))))?;
    }
    match node {
        Value::Array(items) => Ok(items.iter().collect()),
        Value::Object(_) => Ok(vec![node]),
        _ => Err(Error::Source(format!(
            "`{}` is neither a list nor an object",
            CAMERAS_PATH.join(".")
        ))),
    }
}
