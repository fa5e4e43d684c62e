use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use vantage_nav::{Camera, InputEvent, Marker, NavigationMode, PlatformCommand, SceneSink};
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{CursorGrabMode, Window};

use crate::cli::WindowArgs;
use crate::headless::build_state;

const CLICK_DRAG_THRESHOLD: f64 = 4.0;
const WHEEL_LINE_PIXELS: f64 = 100.0;

pub fn run_gui(args: WindowArgs) -> Result<()> {
    let mut state = build_state(args.cameras.as_deref(), args.config.as_deref())?;

    let event_loop = EventLoop::new().map_err(|err| anyhow::anyhow!(err.to_string()))?;
    #[allow(deprecated)]
    let window = event_loop
        .create_window(
            Window::default_attributes()
                .with_title("Vantage")
                .with_inner_size(LogicalSize::new(1280.0, 720.0)),
        )
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    let window = Arc::new(window);

    let size = window.inner_size();
    state.push(InputEvent::Resize {
        width: f64::from(size.width),
        height: f64::from(size.height),
    });

    let mut scene = TitleScene::new(window.clone());
    state.attach_markers(&mut scene);
    info!(viewpoints = state.registry().len(), "viewer ready");

    let mut pointer = PointerTracker::default();
    let started = Instant::now();

    #[allow(deprecated)]
    event_loop
        .run(move |event, event_loop| {
            event_loop.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
                    WindowEvent::CloseRequested => {
                        event_loop.exit();
                    }
                    WindowEvent::Resized(size) => {
                        state.push(InputEvent::Resize {
                            width: f64::from(size.width),
                            height: f64::from(size.height),
                        });
                    }
                    WindowEvent::KeyboardInput { event, .. } => match &event.logical_key {
                        Key::Named(NamedKey::Escape) => {
                            if event.state == ElementState::Pressed && state.is_capture_engaged() {
                                release_capture(&window);
                                state.push(InputEvent::CaptureChanged { engaged: false });
                            }
                        }
                        Key::Character(text) => {
                            if let Some(key) = text.chars().next() {
                                state.push(match event.state {
                                    ElementState::Pressed => InputEvent::KeyDown {
                                        key,
                                        repeat: event.repeat,
                                    },
                                    ElementState::Released => InputEvent::KeyUp { key },
                                });
                            }
                        }
                        _ => {}
                    },
                    WindowEvent::CursorMoved { position, .. } => {
                        state.push(pointer.moved(position.x, position.y));
                    }
                    WindowEvent::MouseInput {
                        state: button_state,
                        button: MouseButton::Left,
                        ..
                    } => match button_state {
                        ElementState::Pressed => {
                            if let Some(down) = pointer.pressed() {
                                state.push(down);
                            }
                        }
                        ElementState::Released => {
                            for event in pointer.released() {
                                state.push(event);
                            }
                        }
                    },
                    WindowEvent::MouseWheel { delta, .. } => {
                        let delta = match delta {
                            MouseScrollDelta::LineDelta(_, y) => -f64::from(y) * WHEEL_LINE_PIXELS,
                            MouseScrollDelta::PixelDelta(position) => -position.y,
                        };
                        state.push(InputEvent::Wheel { delta });
                    }
                    WindowEvent::Focused(false) => {
                        if state.is_capture_engaged() {
                            release_capture(&window);
                            state.push(InputEvent::CaptureChanged { engaged: false });
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let report = state.frame(started.elapsed().as_secs_f64());
                        for command in report.commands {
                            let engaged = match command {
                                PlatformCommand::RequestCapture => request_capture(&window),
                                PlatformCommand::ReleaseCapture => {
                                    release_capture(&window);
                                    false
                                }
                            };
                            state.push(InputEvent::CaptureChanged { engaged });
                        }
                        scene.set_mode(report.mode);
                        scene.render(state.camera());
                    }
                    _ => {}
                },
                Event::DeviceEvent {
                    event: DeviceEvent::MouseMotion { delta: (dx, dy) },
                    ..
                } => {
                    state.push(InputEvent::MouseMotion { dx, dy });
                }
                Event::AboutToWait => {
                    window.request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;

    Ok(())
}

fn request_capture(window: &Window) -> bool {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    match grabbed {
        Ok(()) => {
            window.set_cursor_visible(false);
            debug!("pointer captured");
            true
        }
        Err(err) => {
            warn!(error = %err, "pointer capture refused");
            false
        }
    }
}

fn release_capture(window: &Window) {
    if let Err(err) = window.set_cursor_grab(CursorGrabMode::None) {
        debug!(error = %err, "pointer release failed");
    }
    window.set_cursor_visible(true);
}

/// Turns raw left-button traffic into pointer events, adding a click when the
/// button comes up close to where it went down.
#[derive(Debug, Default)]
struct PointerTracker {
    position: Option<(f64, f64)>,
    pressed_at: Option<(f64, f64)>,
    dragged: bool,
}

impl PointerTracker {
    fn moved(&mut self, x: f64, y: f64) -> InputEvent {
        self.position = Some((x, y));
        if let Some((px, py)) = self.pressed_at {
            if (x - px).hypot(y - py) > CLICK_DRAG_THRESHOLD {
                self.dragged = true;
            }
        }
        InputEvent::PointerMove { x, y }
    }

    fn pressed(&mut self) -> Option<InputEvent> {
        let (x, y) = self.position?;
        self.pressed_at = Some((x, y));
        self.dragged = false;
        Some(InputEvent::PointerDown { x, y })
    }

    fn released(&mut self) -> Vec<InputEvent> {
        let Some((x, y)) = self.position else {
            return Vec::new();
        };
        let mut events = vec![InputEvent::PointerUp { x, y }];
        if self.pressed_at.take().is_some() && !self.dragged {
            events.push(InputEvent::Click { x, y });
        }
        self.dragged = false;
        events
    }
}

/// Reports navigation state through the window title.
struct TitleScene {
    window: Arc<Window>,
    markers: usize,
    mode: NavigationMode,
    title: String,
}

impl TitleScene {
    fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            markers: 0,
            mode: NavigationMode::default(),
            title: String::new(),
        }
    }

    fn set_mode(&mut self, mode: NavigationMode) {
        self.mode = mode;
    }
}

impl SceneSink for TitleScene {
    fn add_marker(&mut self, _marker: &Marker) {
        self.markers += 1;
    }

    fn render(&mut self, camera: &Camera) {
        let position = camera.pose.position;
        let title = format!(
            "Vantage | {} | {:.2}, {:.2}, {:.2} | {} viewpoints",
            self.mode.label(),
            position.x,
            position.y,
            position.z,
            self.markers
        );
        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }
    }
}
