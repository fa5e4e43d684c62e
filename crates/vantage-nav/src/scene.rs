use crate::camera::Camera;
use crate::registry::Marker;

/// The rendering side: receives pick markers once and the camera every frame.
pub trait SceneSink {
    fn add_marker(&mut self, marker: &Marker);
    fn render(&mut self, camera: &Camera);
}

/// Sink that only counts what it is given.
#[derive(Clone, Debug, Default)]
pub struct NullScene {
    pub markers: usize,
    pub frames: u64,
}

impl SceneSink for NullScene {
    fn add_marker(&mut self, _marker: &Marker) {
        self.markers += 1;
    }

    fn render(&mut self, _camera: &Camera) {
        self.frames += 1;
    }
}
