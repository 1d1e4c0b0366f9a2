//! Orbit camera controller.
//!
//! Blends three behaviours:
//! - autonomous orbit with a slowly "breathing" radius and height,
//! - manual override while the user drags or zooms, resuming after a quiet
//!   period from wherever the user left the camera,
//! - eased fly-to transitions (used by reset view).

use std::f32::consts::TAU;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::settings::OrbitSettings;
use crate::tween::{Easing, Tween};
use crate::viewport::camera::PerspectiveCamera;

/// Orbit parameters advanced by the autonomous model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraMotionState {
    /// Radians, kept in 0..2π
    pub angle: f32,
    /// Base radius in the XZ plane, before breathing
    pub radius: f32,
    /// Base camera height, before breathing
    pub height: f32,
    /// Seconds of autonomous motion since the last reset
    pub elapsed: f32,
    pub auto_rotating: bool,
}

/// Complete controller + camera pose, for undo or persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub motion: CameraMotionState,
    pub auto_rotate_enabled: bool,
    pub position: [f32; 3],
    pub look_at: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Autonomous,
    Manual,
    FlyTo,
    /// Auto rotation disabled and nobody is moving the camera
    Idle,
}

impl CameraMode {
    pub fn label(&self) -> &'static str {
        match self {
            CameraMode::Autonomous => "Auto-rotate",
            CameraMode::Manual => "Manual",
            CameraMode::FlyTo => "Flying",
            CameraMode::Idle => "Idle",
        }
    }
}

struct FlyTo {
    position: Tween<Vec3>,
    look_at: Tween<Vec3>,
}

pub struct OrbitCameraController {
    settings: OrbitSettings,
    motion: CameraMotionState,
    /// Global auto-rotation switch
    enabled: bool,
    manual: bool,
    resume_at: Option<f64>,
    fly_to: Option<FlyTo>,
    look_at: Vec3,
    initial_position: Vec3,
    initial_look_at: Vec3,
    last_tick: Option<f64>,
}

impl OrbitCameraController {
    /// Capture `camera`'s current pose as the reset pose
    pub fn new(settings: OrbitSettings, camera: &PerspectiveCamera) -> Self {
        let enabled = settings.auto_rotate;
        let mut controller = Self {
            motion: CameraMotionState {
                angle: 0.0,
                radius: settings.base_radius,
                height: settings.base_height,
                elapsed: 0.0,
                auto_rotating: enabled,
            },
            settings,
            enabled,
            manual: false,
            resume_at: None,
            fly_to: None,
            look_at: camera.target,
            initial_position: camera.position,
            initial_look_at: camera.target,
            last_tick: None,
        };
        controller.sync_from_camera(camera);
        controller
    }

    /// Camera position for the default orbit pose (angle 0)
    pub fn default_position(settings: &OrbitSettings) -> Vec3 {
        let look_at = Vec3::from(settings.look_at);
        Vec3::new(look_at.x, settings.base_height, look_at.z + settings.base_radius)
    }

    pub fn motion(&self) -> &CameraMotionState {
        &self.motion
    }

    pub fn is_auto_rotate_enabled(&self) -> bool {
        self.enabled
    }

    pub fn mode(&self) -> CameraMode {
        if self.fly_to.is_some() {
            CameraMode::FlyTo
        } else if self.manual {
            CameraMode::Manual
        } else if self.motion.auto_rotating {
            CameraMode::Autonomous
        } else {
            CameraMode::Idle
        }
    }

    /// Advance by one frame
    pub fn tick(&mut self, camera: &mut PerspectiveCamera, now: f64) {
        let dt = self
            .last_tick
            .map(|last| (now - last).max(0.0) as f32)
            .unwrap_or(0.0);
        self.last_tick = Some(now);

        if let Some(fly) = &self.fly_to {
            camera.position = fly.position.sample(now);
            camera.target = fly.look_at.sample(now);
            self.look_at = camera.target;
            if fly.position.is_finished(now) {
                self.fly_to = None;
                self.sync_from_camera(camera);
                self.motion.auto_rotating = self.enabled && !self.manual;
                tracing::debug!("Fly-to finished, mode {:?}", self.mode());
            }
            return;
        }

        if self.manual {
            if self.resume_at.is_some_and(|at| now >= at) {
                self.resume(camera);
            }
            return;
        }

        if !self.motion.auto_rotating {
            return;
        }

        self.motion.elapsed += dt;
        self.motion.angle =
            (self.motion.angle + self.settings.rotation_speed_deg.to_radians() * dt).rem_euclid(TAU);
        self.place_camera(camera);
    }

    /// The shell reports the user started manipulating the camera
    pub fn begin_manual(&mut self) {
        if !self.manual {
            tracing::debug!("Manual camera control");
        }
        self.manual = true;
        self.resume_at = None;
        self.fly_to = None;
        self.motion.auto_rotating = false;
    }

    /// The shell reports the manipulation ended; autonomous motion resumes
    /// after the quiet period if auto rotation is still enabled
    pub fn end_manual(&mut self, now: f64) {
        if self.manual {
            self.resume_at = Some(now + self.settings.resume_delay);
        }
    }

    /// Rotate the camera around the look-at point (degrees)
    pub fn orbit_by(&mut self, camera: &mut PerspectiveCamera, dx_deg: f32, dy_deg: f32) {
        self.begin_manual();
        camera.orbit(dx_deg, dy_deg);
    }

    /// Move the camera toward or away from the look-at point
    pub fn zoom_by(&mut self, camera: &mut PerspectiveCamera, delta: f32) {
        self.begin_manual();
        camera.dolly(delta, self.settings.min_distance, self.settings.max_distance);
    }

    pub fn set_auto_rotate(&mut self, camera: &PerspectiveCamera, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.motion.auto_rotating = false;
        } else if !self.manual && self.fly_to.is_none() && !self.motion.auto_rotating {
            self.sync_from_camera(camera);
            self.motion.auto_rotating = true;
        }
        tracing::debug!("Auto rotation {}", if enabled { "on" } else { "off" });
    }

    pub fn toggle_auto_rotate(&mut self, camera: &PerspectiveCamera) {
        self.set_auto_rotate(camera, !self.enabled);
    }

    /// Ease position and look-at toward a new pose
    pub fn animate_to_position(
        &mut self,
        camera: &PerspectiveCamera,
        target_position: Vec3,
        target_look_at: Vec3,
        duration: f64,
        now: f64,
    ) {
        self.manual = false;
        self.resume_at = None;
        self.motion.auto_rotating = false;
        self.fly_to = Some(FlyTo {
            position: Tween::new(camera.position, target_position, duration, now)
                .with_easing(Easing::EaseInOutCubic),
            look_at: Tween::new(camera.target, target_look_at, duration, now)
                .with_easing(Easing::EaseInOutCubic),
        });
    }

    /// Restore orbit defaults and fly back to the captured initial pose
    pub fn reset(&mut self, camera: &PerspectiveCamera, now: f64) {
        self.motion.angle = 0.0;
        self.motion.elapsed = 0.0;
        self.motion.radius = self.settings.base_radius;
        self.motion.height = self.settings.base_height;
        self.animate_to_position(
            camera,
            self.initial_position,
            self.initial_look_at,
            self.settings.reset_duration,
            now,
        );
        tracing::debug!("Reset view");
    }

    pub fn get_state(&self, camera: &PerspectiveCamera) -> CameraState {
        CameraState {
            motion: self.motion,
            auto_rotate_enabled: self.enabled,
            position: camera.position.to_array(),
            look_at: camera.target.to_array(),
        }
    }

    pub fn set_state(&mut self, camera: &mut PerspectiveCamera, state: &CameraState) {
        self.fly_to = None;
        self.manual = false;
        self.resume_at = None;
        self.enabled = state.auto_rotate_enabled;
        self.motion = state.motion;
        self.motion.auto_rotating = state.motion.auto_rotating && self.enabled;
        camera.position = Vec3::from(state.position);
        camera.target = Vec3::from(state.look_at);
        self.look_at = camera.target;
    }

    fn resume(&mut self, camera: &PerspectiveCamera) {
        self.manual = false;
        self.resume_at = None;
        if self.enabled {
            self.sync_from_camera(camera);
            self.motion.auto_rotating = true;
            tracing::debug!("Autonomous orbit resumed at {:.2} rad", self.motion.angle);
        }
    }

    /// Recompute angle, radius and height from the camera position so the
    /// orbit continues from where the camera is
    fn sync_from_camera(&mut self, camera: &PerspectiveCamera) {
        self.look_at = camera.target;
        let offset = camera.position - self.look_at;
        self.motion.angle = offset.x.atan2(offset.z).rem_euclid(TAU);
        self.motion.radius = offset.x.hypot(offset.z);
        self.motion.height = camera.position.y;
    }

    fn place_camera(&self, camera: &mut PerspectiveCamera) {
        let s = &self.settings;
        let t = self.motion.elapsed;
        let radius = self.motion.radius + s.radial_amplitude * (t * s.radial_frequency).sin();
        let height = self.motion.height + s.vertical_amplitude * (t * s.vertical_frequency).cos();
        let (sin, cos) = self.motion.angle.sin_cos();
        camera.position = Vec3::new(
            self.look_at.x + radius * sin,
            height,
            self.look_at.z + radius * cos,
        );
        camera.target = self.look_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    fn setup() -> (OrbitCameraController, PerspectiveCamera) {
        let settings = OrbitSettings::default();
        let camera = PerspectiveCamera::new(
            OrbitCameraController::default_position(&settings),
            Vec3::from(settings.look_at),
        );
        (OrbitCameraController::new(settings, &camera), camera)
    }

    /// Run frames from `start` for `seconds`, returning the end time
    fn run(
        ctrl: &mut OrbitCameraController,
        cam: &mut PerspectiveCamera,
        start: f64,
        seconds: f64,
    ) -> f64 {
        let frames = (seconds / FRAME).round() as usize;
        let mut t = start;
        for _ in 0..frames {
            t += FRAME;
            ctrl.tick(cam, t);
        }
        t
    }

    #[test]
    fn test_initial_sync_matches_defaults() {
        let (ctrl, _) = setup();
        let m = ctrl.motion();
        assert!(m.angle.abs() < 1e-6);
        assert!((m.radius - 8.0).abs() < 1e-5);
        assert!((m.height - 3.0).abs() < 1e-5);
        assert_eq!(ctrl.mode(), CameraMode::Autonomous);
    }

    #[test]
    fn test_angle_increases_while_autonomous() {
        let (mut ctrl, mut cam) = setup();
        ctrl.tick(&mut cam, 0.0);
        let mut t = 0.0;
        let mut prev = ctrl.motion().angle;
        for _ in 0..120 {
            t += FRAME;
            ctrl.tick(&mut cam, t);
            let angle = ctrl.motion().angle;
            assert!(angle > prev);
            prev = angle;
        }
        // 10 deg/s for 2 s
        assert!((prev - 20.0_f32.to_radians()).abs() < 1e-3);
    }

    #[test]
    fn test_angle_wraps() {
        let (mut ctrl, mut cam) = setup();
        ctrl.tick(&mut cam, 0.0);
        ctrl.tick(&mut cam, 40.0); // 400 degrees
        assert!((ctrl.motion().angle - 40.0_f32.to_radians()).abs() < 1e-3);
    }

    #[test]
    fn test_camera_on_breathing_circle() {
        let (mut ctrl, mut cam) = setup();
        ctrl.tick(&mut cam, 0.0);
        ctrl.tick(&mut cam, 1.0);
        let s = OrbitSettings::default();
        let look_at = Vec3::from(s.look_at);
        let offset = cam.position - look_at;
        let r = 8.0 + s.radial_amplitude * (1.0 * s.radial_frequency).sin();
        let h = 3.0 + s.vertical_amplitude * (1.0 * s.vertical_frequency).cos();
        assert!((offset.x.hypot(offset.z) - r).abs() < 1e-4);
        assert!((cam.position.y - h).abs() < 1e-4);
        assert_eq!(cam.target, look_at);
    }

    #[test]
    fn test_frozen_during_manual_override() {
        let (mut ctrl, mut cam) = setup();
        let t = run(&mut ctrl, &mut cam, 0.0, 1.0);
        ctrl.begin_manual();
        let frozen = ctrl.motion().angle;
        let pos = cam.position;
        let t = run(&mut ctrl, &mut cam, t, 5.0);
        assert_eq!(ctrl.motion().angle, frozen);
        assert_eq!(cam.position, pos);
        assert_eq!(ctrl.mode(), CameraMode::Manual);

        // Still frozen inside the quiet period
        ctrl.end_manual(t);
        let t = run(&mut ctrl, &mut cam, t, 1.9);
        assert_eq!(ctrl.motion().angle, frozen);

        let _ = run(&mut ctrl, &mut cam, t, 0.5);
        assert_eq!(ctrl.mode(), CameraMode::Autonomous);
        assert!(ctrl.motion().angle > frozen);
    }

    #[test]
    fn test_resume_resyncs_from_user_position() {
        let (mut ctrl, mut cam) = setup();
        ctrl.tick(&mut cam, 0.0);
        ctrl.orbit_by(&mut cam, -90.0, 0.0); // camera to +X side
        ctrl.zoom_by(&mut cam, 0.25);
        ctrl.end_manual(0.0);
        ctrl.tick(&mut cam, 2.0);
        let m = *ctrl.motion();
        let offset = cam.position - Vec3::from(OrbitSettings::default().look_at);
        assert_eq!(ctrl.mode(), CameraMode::Autonomous);
        // Advanced from the user's angle, not from the frozen one
        assert!((m.angle - std::f32::consts::FRAC_PI_2).abs() < 0.3);
        assert!((offset.x.hypot(offset.z) - m.radius).abs() < 0.6);
    }

    #[test]
    fn test_no_resume_when_disabled() {
        let (mut ctrl, mut cam) = setup();
        ctrl.tick(&mut cam, 0.0);
        ctrl.begin_manual();
        ctrl.end_manual(0.0);
        ctrl.set_auto_rotate(&cam, false);
        let angle = ctrl.motion().angle;
        let _ = run(&mut ctrl, &mut cam, 0.0, 4.0);
        assert_eq!(ctrl.mode(), CameraMode::Idle);
        assert_eq!(ctrl.motion().angle, angle);
    }

    #[test]
    fn test_begin_manual_cancels_resume() {
        let (mut ctrl, mut cam) = setup();
        ctrl.tick(&mut cam, 0.0);
        ctrl.begin_manual();
        ctrl.end_manual(0.0);
        ctrl.tick(&mut cam, 1.0);
        ctrl.begin_manual();
        ctrl.tick(&mut cam, 3.0);
        assert_eq!(ctrl.mode(), CameraMode::Manual);
    }

    #[test]
    fn test_reset_returns_to_initial_pose() {
        let (mut ctrl, mut cam) = setup();
        let initial = cam.clone();
        let t = run(&mut ctrl, &mut cam, 0.0, 3.0);
        ctrl.orbit_by(&mut cam, 45.0, 10.0);
        ctrl.zoom_by(&mut cam, 0.3);
        ctrl.end_manual(t);

        ctrl.reset(&cam, t);
        assert_eq!(ctrl.mode(), CameraMode::FlyTo);
        ctrl.tick(&mut cam, t + 0.5);
        assert_eq!(ctrl.mode(), CameraMode::FlyTo);
        ctrl.tick(&mut cam, t + 1.5);

        let m = ctrl.motion();
        assert!(m.angle.abs() < 1e-4 || (m.angle - TAU).abs() < 1e-4);
        assert!((m.radius - 8.0).abs() < 1e-4);
        assert!((m.height - 3.0).abs() < 1e-4);
        assert!(cam.position.abs_diff_eq(initial.position, 1e-4));
        assert!(cam.target.abs_diff_eq(initial.target, 1e-4));
        assert_eq!(ctrl.mode(), CameraMode::Autonomous);
    }

    #[test]
    fn test_fly_to_eases() {
        let (mut ctrl, mut cam) = setup();
        let start = cam.position;
        let target = start + Vec3::new(4.0, 0.0, 0.0);
        ctrl.tick(&mut cam, 0.0);
        ctrl.animate_to_position(&cam, target, cam.target, 1.0, 0.0);
        ctrl.tick(&mut cam, 0.25);
        // Ease-in: less than a quarter of the way after a quarter of the time
        assert!(cam.position.x - start.x < 1.0);
        ctrl.tick(&mut cam, 0.5);
        assert!((cam.position.x - start.x - 2.0).abs() < 1e-4);
        ctrl.tick(&mut cam, 1.0);
        assert!(cam.position.abs_diff_eq(target, 1e-5));
    }

    #[test]
    fn test_state_roundtrip_through_json() {
        let (mut ctrl, mut cam) = setup();
        let _ = run(&mut ctrl, &mut cam, 0.0, 2.0);
        let state = ctrl.get_state(&cam);
        let json = serde_json::to_string(&state).unwrap();

        let (mut other, mut other_cam) = setup();
        other.set_state(&mut other_cam, &serde_json::from_str(&json).unwrap());
        assert_eq!(other.get_state(&other_cam), state);
        assert_eq!(other_cam.position, cam.position);
    }
}
