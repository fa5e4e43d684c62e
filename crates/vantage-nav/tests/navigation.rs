use cgmath::{InnerSpace, MetricSpace};
use vantage_nav::{
    InputEvent, LocomotionState, NavConfig, NavigationMode, NavigationState, PlatformCommand,
    PoseAuthority,
};

fn key_down(key: char) -> InputEvent {
    InputEvent::KeyDown { key, repeat: false }
}

fn key_up(key: char) -> InputEvent {
    InputEvent::KeyUp { key }
}

fn state() -> NavigationState {
    let mut state = NavigationState::new(NavConfig::default());
    state.push(InputEvent::Resize {
        width: 800.0,
        height: 600.0,
    });
    state.frame(0.0);
    state
}

fn walk_state() -> NavigationState {
    let mut state = state();
    state.push(key_down('f'));
    let report = state.frame(0.0);
    assert_eq!(report.mode, NavigationMode::Walk);
    state
}

fn engage_capture(state: &mut NavigationState) {
    state.push(InputEvent::Click { x: 10.0, y: 10.0 });
    let report = state.frame(0.0);
    assert_eq!(report.commands, vec![PlatformCommand::RequestCapture]);
    state.push(InputEvent::CaptureChanged { engaged: true });
    state.frame(0.0);
    assert!(state.is_capture_engaged());
}

#[test]
fn starts_in_orbit_mode() {
    let state = state();
    assert_eq!(state.mode(), NavigationMode::Orbit);
    assert!(state.orbit().is_enabled());
    assert_eq!(state.locomotion(), LocomotionState::default());
}

#[test]
fn toggling_twice_returns_to_orbit_and_resets_intents() {
    let mut state = walk_state();
    state.push(key_down('w'));
    state.push(key_down('d'));
    state.frame(0.0);
    assert!(state.locomotion().forward && state.locomotion().right);
    assert!(!state.orbit().is_enabled());

    state.push(key_down('F'));
    state.frame(0.0);
    assert_eq!(state.mode(), NavigationMode::Orbit);
    assert!(state.orbit().is_enabled());
    assert_eq!(state.locomotion(), LocomotionState::default());

    state.push(key_down('f'));
    state.frame(0.0);
    assert_eq!(state.mode(), NavigationMode::Walk);
    assert_eq!(state.locomotion(), LocomotionState::default());
}

#[test]
fn key_repeat_does_not_toggle() {
    let mut state = walk_state();
    state.push(InputEvent::KeyDown {
        key: 'f',
        repeat: true,
    });
    state.frame(0.0);
    assert_eq!(state.mode(), NavigationMode::Walk);
}

#[test]
fn walk_keys_do_nothing_in_orbit_mode() {
    let mut state = state();
    let before = state.pose();
    for key in ['w', 'a', 's', 'd', 'W'] {
        state.push(key_down(key));
    }
    for frame in 1..=30 {
        let report = state.frame(frame as f64 / 60.0);
        assert_eq!(report.authority, PoseAuthority::None);
    }
    assert_eq!(state.pose(), before);
    assert_eq!(state.locomotion(), LocomotionState::default());
}

#[test]
fn held_forward_key_walks_along_view_on_the_ground_plane() {
    let mut state = walk_state();
    let before = state.pose();
    let mut heading = before.forward();
    heading.y = 0.0;
    let heading = heading.normalize();

    state.push(key_down('w'));
    for _ in 0..10 {
        let report = state.frame(0.0);
        assert_eq!(report.authority, PoseAuthority::Walk);
    }
    state.push(key_up('w'));
    let report = state.frame(0.0);
    assert_eq!(report.authority, PoseAuthority::None);

    let moved = state.pose().position - before.position;
    assert!(moved.y.abs() < 1.0e-12);
    assert!((moved.magnitude() - 0.7).abs() < 1.0e-9);
    assert!((moved.normalize() - heading).magnitude() < 1.0e-9);
}

#[test]
fn entering_walk_keeps_the_current_view() {
    let state = state();
    let before = state.pose();
    let mut state = state;
    state.push(key_down('f'));
    state.frame(0.0);
    assert_eq!(state.pose(), before);
}

#[test]
fn capture_is_only_requested_in_walk_mode() {
    let mut state = state();
    state.push(InputEvent::Click { x: 10.0, y: 10.0 });
    let report = state.frame(0.0);
    assert!(report.commands.is_empty());

    let mut state = walk_state();
    state.push(InputEvent::Click { x: 10.0, y: 10.0 });
    state.push(InputEvent::Click { x: 12.0, y: 10.0 });
    let report = state.frame(0.0);
    assert_eq!(report.commands, vec![PlatformCommand::RequestCapture]);
    assert!(!state.is_capture_engaged());
}

#[test]
fn mouse_look_needs_capture() {
    let mut state = walk_state();
    let before = state.pose();
    state.push(InputEvent::MouseMotion {
        dx: 200.0,
        dy: 50.0,
    });
    state.frame(0.0);
    assert_eq!(state.pose(), before);

    engage_capture(&mut state);
    let look = state.look();
    state.push(InputEvent::MouseMotion {
        dx: 200.0,
        dy: 50.0,
    });
    let report = state.frame(0.0);
    assert_eq!(report.authority, PoseAuthority::Walk);
    assert!((state.look().yaw - (look.yaw - 0.4)).abs() < 1.0e-12);
    assert!((state.look().pitch - (look.pitch - 0.1)).abs() < 1.0e-12);
    assert_eq!(state.pose().position, before.position);
    assert!((state.pose().right().y).abs() < 1.0e-9, "roll introduced");
}

#[test]
fn leaving_walk_releases_capture_and_ignores_stale_capture_events() {
    let mut state = walk_state();
    engage_capture(&mut state);

    state.push(key_down('f'));
    let report = state.frame(0.0);
    assert_eq!(report.commands, vec![PlatformCommand::ReleaseCapture]);
    assert!(!state.is_capture_engaged());

    // Out-of-order notification from the platform.
    state.push(InputEvent::CaptureChanged { engaged: true });
    let report = state.frame(0.0);
    assert_eq!(report.commands, vec![PlatformCommand::ReleaseCapture]);
    assert!(!state.is_capture_engaged());

    let before = state.pose();
    state.push(InputEvent::MouseMotion {
        dx: 300.0,
        dy: -80.0,
    });
    state.frame(0.0);
    assert_eq!(state.pose(), before);
}

#[test]
fn walk_mode_pointer_activity_never_reaches_orbit_controls() {
    let mut state = walk_state();
    state.push(InputEvent::PointerDown { x: 100.0, y: 100.0 });
    state.push(InputEvent::PointerMove { x: 300.0, y: 120.0 });
    state.frame(0.0);
    assert!(!state.orbit().is_dragging());
    assert!(!state.orbit().has_pending_motion());
    state.push(InputEvent::PointerUp { x: 300.0, y: 120.0 });
    state.frame(0.0);

    let mut state = self::state();
    state.push(InputEvent::PointerDown { x: 100.0, y: 100.0 });
    state.frame(0.0);
    assert!(state.orbit().is_dragging());
}

#[test]
fn orbit_drag_moves_the_camera_around_its_pivot() {
    let mut state = state();
    let target = state.orbit().target();
    let distance = state.pose().position.distance(target);
    state.push(InputEvent::PointerDown { x: 100.0, y: 100.0 });
    state.push(InputEvent::PointerMove { x: 180.0, y: 100.0 });
    state.push(InputEvent::PointerUp { x: 180.0, y: 100.0 });
    let report = state.frame(0.0);
    assert_eq!(report.authority, PoseAuthority::Orbit);
    assert!((state.pose().position.distance(target) - distance).abs() < 1.0e-9);
}

#[test]
fn returning_to_orbit_leaves_pose_where_walking_ended() {
    let mut state = walk_state();
    state.push(key_down('w'));
    for _ in 0..5 {
        state.frame(0.0);
    }
    state.push(key_down('f'));
    state.frame(0.0);
    let after_toggle = state.pose();
    for _ in 0..5 {
        state.frame(0.0);
    }
    assert_eq!(state.pose(), after_toggle);
}
