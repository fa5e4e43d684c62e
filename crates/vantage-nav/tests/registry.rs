use vantage_base::Result;
use vantage_nav::{StaticSource, ViewpointRegistry, ViewpointSource};

struct Unreachable;

impl ViewpointSource for Unreachable {
    fn describe(&self) -> String {
        "unreachable".to_string()
    }

    fn fetch(&self) -> Result<String> {
        Err(std::io::Error::new(std::io::ErrorKind::NotFound, "cameras.json").into())
    }
}

fn source(cameras: &str) -> StaticSource {
    StaticSource(format!(
        r#"{{ "document": {{ "chunk": {{ "cameras": {{ "camera": {cameras} }} }} }} }}"#
    ))
}

#[test]
fn keeps_only_entries_with_valid_transforms() -> Result<()> {
    let doc = source(
        r##"[
            { "@label": "north", "transform": { "#text": "1 0 0 0 0 1 0 0 0 0 1 0 4 1.5 -2 1" } },
            { "@label": "no-pose" }
        ]"##,
    );
    let (registry, summary) = ViewpointRegistry::try_load(&doc, 0.12)?;

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.markers().len(), 1);
    assert_eq!(summary.accepted, 1);
    assert_eq!(summary.missing, 1);

    let viewpoint = &registry.viewpoints()[0];
    assert_eq!(viewpoint.label().as_deref(), Some("north"));
    assert!(!viewpoint.metadata().contains_key("transform"));

    let marker = registry.markers()[0];
    assert_eq!(marker.viewpoint, viewpoint.id());
    assert_eq!((marker.center.x, marker.center.y, marker.center.z), (4.0, 1.5, -2.0));
    assert!((marker.radius - 0.12).abs() < 1.0e-12);
    assert_eq!(registry.resolve(&marker).map(|v| v.id()), Some(viewpoint.id()));
    Ok(())
}

#[test]
fn bad_entries_do_not_abort_the_batch() -> Result<()> {
    let doc = source(
        r#"[
            { "label": "short", "transform": [1, 0, 0] },
            { "label": "words", "transform": { "value": "1 0 0 0 0 1 0 0 0 0 1 0 x y z 1" } },
            { "label": "ok", "transform": [2, 0, 0, 0, 0, 2, 0, 0, 0, 0, 2, 0, 0, 0, 0, 1] }
        ]"#,
    );
    let (registry, summary) = ViewpointRegistry::try_load(&doc, 0.1)?;
    assert_eq!(registry.len(), 1);
    assert_eq!(summary.invalid, 2);
    assert_eq!(registry.viewpoints()[0].label().as_deref(), Some("ok"));
    // Marker grows with the transform's scale.
    assert!((registry.markers()[0].radius - 0.2).abs() < 1.0e-12);
    Ok(())
}

#[test]
fn single_camera_object_is_accepted() -> Result<()> {
    let doc = source(r#"{ "id": 7, "transform": [1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1] }"#);
    let (registry, _) = ViewpointRegistry::try_load(&doc, 0.12)?;
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.viewpoints()[0].label().as_deref(), Some("7"));
    Ok(())
}

#[test]
fn source_failures_leave_the_registry_empty() {
    assert!(ViewpointRegistry::try_load(&Unreachable, 0.12).is_err());
    assert!(ViewpointRegistry::load(&Unreachable, 0.12).is_empty());

    let not_json = StaticSource("<document/>".to_string());
    assert!(ViewpointRegistry::load(&not_json, 0.12).is_empty());

    let wrong_path = StaticSource(r#"{ "document": { "cameras": [] } }"#.to_string());
    assert!(ViewpointRegistry::try_load(&wrong_path, 0.12).is_err());
    assert!(ViewpointRegistry::load(&wrong_path, 0.12).is_empty());
}

#[test]
fn clear_drops_viewpoints_and_markers_together() -> Result<()> {
    let doc = source(r#"[{ "transform": [1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1] }]"#);
    let (mut registry, _) = ViewpointRegistry::try_load(&doc, 0.12)?;
    assert!(!registry.is_empty());
    registry.clear();
    assert!(registry.is_empty());
    assert!(registry.markers().is_empty());
    Ok(())
}
