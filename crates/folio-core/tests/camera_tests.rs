// Camera rig: scroll targets and exponential smoothing.

use folio_core::{
    camera_target, look_at_point, smooth_toward, PointerPosition, ScrollCamera, ScrollMetrics,
    ScrollProgress, SmoothingMode,
};
use glam::Vec3;

fn assert_close(a: Vec3, b: Vec3) {
    assert!((a - b).abs().max_element() < 1e-5, "{:?} != {:?}", a, b);
}

#[test]
fn target_at_top_of_page() {
    let p = ScrollProgress::from_metrics(&ScrollMetrics {
        scroll_y: 0.0,
        document_height: 2000.0,
        viewport_height: 1000.0,
    });
    assert_eq!(p, ScrollProgress::START);
    assert_close(camera_target(p), Vec3::new(0.0, 0.0, 10.0));
}

#[test]
fn target_at_bottom_of_page() {
    let p = ScrollProgress::from_metrics(&ScrollMetrics {
        scroll_y: 1000.0,
        document_height: 2000.0,
        viewport_height: 1000.0,
    });
    assert_eq!(p, ScrollProgress::END);
    assert_close(camera_target(p), Vec3::new(0.0, 5.0, -10.0));
}

#[test]
fn target_sways_furthest_mid_page() {
    let mid = camera_target(ScrollProgress::new(0.5));
    assert_close(mid, Vec3::new(3.0, 2.5, 0.0));
}

#[test]
fn smoothing_is_idempotent_at_target() {
    let target = Vec3::new(1.0, 2.0, 3.0);
    assert_eq!(smooth_toward(target, target, 0.05), target);

    let mut cam = ScrollCamera::default();
    let before = cam.position;
    cam.step(ScrollProgress::START, PointerPosition::default(), 1.0 / 60.0);
    assert_eq!(cam.position, before);
}

#[test]
fn smoothing_converges_monotonically_without_overshoot() {
    let mut cam = ScrollCamera::default();
    let target = camera_target(ScrollProgress::END);
    let mut last_dist = (target - cam.position).length();
    for _ in 0..400 {
        cam.step(ScrollProgress::END, PointerPosition::default(), 1.0 / 60.0);
        let d = target - cam.position;
        // every axis stays on the starting side of the target
        assert!(d.z <= 0.0 && d.y >= 0.0, "overshoot at {:?}", cam.position);
        let dist = d.length();
        assert!(dist <= last_dist);
        last_dist = dist;
    }
    assert!(last_dist < 1e-3);
}

#[test]
fn mid_page_sway_converges_on_x_without_overshoot() {
    let mut cam = ScrollCamera::default();
    let mid = ScrollProgress::new(0.5);
    let target = camera_target(mid);
    assert!(target.x > 2.9);
    let mut last_dist = (target - cam.position).length();
    for _ in 0..300 {
        cam.step(mid, PointerPosition::default(), 1.0 / 60.0);
        let d = target - cam.position;
        assert!(d.x >= 0.0, "x overshoot at {:?}", cam.position);
        assert!(cam.position.x > 0.0);
        let dist = d.length();
        assert!(dist <= last_dist);
        last_dist = dist;
    }
    assert!((target.x - cam.position.x) < 1e-3);
}

#[test]
fn per_frame_step_is_five_percent() {
    let mut cam = ScrollCamera::default();
    cam.step(ScrollProgress::END, PointerPosition::default(), 1.0 / 60.0);
    // z: 10 -> 10 + (-10 - 10) * 0.05
    assert!((cam.position.z - 9.0).abs() < 1e-5);
    assert!((cam.position.y - 0.25).abs() < 1e-5);
}

#[test]
fn per_frame_mode_ignores_frame_time() {
    let mode = SmoothingMode::PerFrame { factor: 0.05 };
    assert_eq!(mode.alpha(1.0 / 30.0), mode.alpha(1.0 / 144.0));
}

#[test]
fn time_scaled_mode_matches_per_frame_at_reference_rate() {
    let mode = SmoothingMode::TimeScaled {
        factor: 0.05,
        reference_fps: 60.0,
    };
    assert!((mode.alpha(1.0 / 60.0) - 0.05).abs() < 1e-5);
}

#[test]
fn time_scaled_mode_is_frame_rate_independent() {
    let mode = SmoothingMode::TimeScaled {
        factor: 0.05,
        reference_fps: 60.0,
    };
    let run = |fps: u32| {
        let mut cam = ScrollCamera::new(mode, 0.0);
        for _ in 0..fps {
            cam.step(ScrollProgress::END, PointerPosition::default(), 1.0 / fps as f32);
        }
        cam.position
    };
    let at_30 = run(30);
    let at_120 = run(120);
    assert!((at_30 - at_120).abs().max_element() < 1e-3);
}

#[test]
fn look_at_follows_progress_and_pointer() {
    let base = look_at_point(ScrollProgress::END, PointerPosition::default(), 0.6);
    assert_close(base, Vec3::new(0.0, 3.0, 0.0));
    let shifted = look_at_point(ScrollProgress::END, PointerPosition { x: 1.0, y: -1.0 }, 0.6);
    assert_close(shifted, Vec3::new(0.6, 2.4, 0.0));
}

#[test]
fn camera_matrices_are_finite() {
    let cam = ScrollCamera::default().to_camera(16.0 / 9.0, 75f32.to_radians());
    let vp = cam.view_projection();
    assert!(vp.to_cols_array().iter().all(|v| v.is_finite()));
    let (right, up) = cam.billboard_axes();
    assert!((right.length() - 1.0).abs() < 1e-5);
    assert!((up.length() - 1.0).abs() < 1e-5);
}
