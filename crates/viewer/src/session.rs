//! Viewer session: owns the scene, the camera and both controllers, and
//! routes shell events to them with the current logical time.

use glam::Vec3;
use serde::Serialize;
use shared::ProductCatalog;

use crate::camera_controller::{CameraMode, CameraState, OrbitCameraController};
use crate::clock::TimeSource;
use crate::error::ViewerError;
use crate::interaction::{CursorHint, InteractionController, InteractionState, SceneAccess};
use crate::material::MaterialStore;
use crate::scene::{build_scene, render_states, BuiltScene, Part, RenderState, Scene};
use crate::settings::ViewerSettings;
use crate::viewport::camera::{CanvasRect, PerspectiveCamera};

/// Degrees of orbit per dragged pixel
const DRAG_DEG_PER_PIXEL: f32 = 0.4;

/// Text for the info panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoPanel {
    pub title: String,
    /// Category of the shown part, `None` for the product overview
    pub category: Option<String>,
    pub description: String,
}

pub struct ViewerSession {
    product_name: String,
    product_description: String,
    settings: ViewerSettings,
    scene: Scene,
    parts: Vec<Part>,
    materials: MaterialStore,
    camera: PerspectiveCamera,
    orbit: OrbitCameraController,
    interaction: InteractionController,
    clock: Box<dyn TimeSource>,
}

impl ViewerSession {
    pub fn new(
        catalog: &ProductCatalog,
        settings: ViewerSettings,
        clock: Box<dyn TimeSource>,
    ) -> Result<Self, ViewerError> {
        let mut materials = MaterialStore::new();
        let BuiltScene { scene, parts } = build_scene(catalog, &mut materials)?;

        let mut camera = PerspectiveCamera::new(
            OrbitCameraController::default_position(&settings.orbit),
            Vec3::from(settings.orbit.look_at),
        );
        camera.fov = settings.viewport.fov_deg.to_radians();

        let orbit = OrbitCameraController::new(settings.orbit.clone(), &camera);
        let interaction = InteractionController::new(settings.interaction.clone(), &mut materials);

        tracing::info!(
            "Viewer session ready: '{}', {} parts, auto-rotate {}",
            catalog.name,
            parts.len(),
            settings.orbit.auto_rotate
        );

        Ok(Self {
            product_name: catalog.name.clone(),
            product_description: catalog.description.clone(),
            settings,
            scene,
            parts,
            materials,
            camera,
            orbit,
            interaction,
            clock,
        })
    }

    // ── Accessors ────────────────────────────────────────────

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn materials(&self) -> &MaterialStore {
        &self.materials
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn orbit(&self) -> &OrbitCameraController {
        &self.orbit
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.orbit.mode()
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.interaction.state()
    }

    pub fn hovered_part(&self) -> Option<&Part> {
        self.interaction.hovered_part(&self.parts)
    }

    pub fn selected_part(&self) -> Option<&Part> {
        self.interaction.selected_part(&self.parts)
    }

    pub fn cursor(&self) -> CursorHint {
        self.interaction.cursor()
    }

    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.camera.set_aspect(width, height);
    }

    pub fn set_on_change(&mut self, callback: impl FnMut(Option<&Part>) + 'static) {
        self.interaction.set_on_change(callback);
    }

    // ── Frame ────────────────────────────────────────────────

    /// Camera first, then interaction feedback
    pub fn frame(&mut self) {
        let now = self.clock.now();
        self.orbit.tick(&mut self.camera, now);
        let (interaction, _, mut ctx) = self.split();
        interaction.frame_tick(&mut ctx, now);
    }

    // ── Pointer ──────────────────────────────────────────────

    /// Pointer moved to device pixel `(x, y)` inside `rect`
    pub fn pointer_move(&mut self, x: f32, y: f32, rect: CanvasRect) {
        let Some(ndc) = rect.to_ndc(x, y) else {
            return;
        };
        let now = self.clock.now();
        let (interaction, camera, mut ctx) = self.split();
        interaction.pointer_move(ndc, camera, &mut ctx, now);
    }

    pub fn pointer_click(&mut self, x: f32, y: f32, rect: CanvasRect) {
        let Some(ndc) = rect.to_ndc(x, y) else {
            return;
        };
        let now = self.clock.now();
        let (interaction, camera, mut ctx) = self.split();
        interaction.pointer_click(ndc, camera, &mut ctx, now);
    }

    pub fn pointer_leave(&mut self) {
        let now = self.clock.now();
        let (interaction, _, mut ctx) = self.split();
        interaction.pointer_leave(&mut ctx, now);
    }

    // ── Camera ───────────────────────────────────────────────

    pub fn begin_camera_drag(&mut self) {
        self.orbit.begin_manual();
    }

    /// Orbit by a pointer delta in pixels
    pub fn drag_camera(&mut self, dx: f32, dy: f32) {
        self.orbit.orbit_by(
            &mut self.camera,
            dx * DRAG_DEG_PER_PIXEL,
            dy * DRAG_DEG_PER_PIXEL,
        );
    }

    pub fn end_camera_drag(&mut self) {
        let now = self.clock.now();
        self.orbit.end_manual(now);
    }

    /// One zoom step; counts as a complete manual interaction
    pub fn zoom(&mut self, delta: f32) {
        let now = self.clock.now();
        self.orbit.zoom_by(&mut self.camera, delta);
        self.orbit.end_manual(now);
    }

    pub fn reset_view(&mut self) {
        let now = self.clock.now();
        self.orbit.reset(&self.camera, now);
    }

    pub fn toggle_auto_rotate(&mut self) {
        self.orbit.toggle_auto_rotate(&self.camera);
    }

    pub fn camera_state(&self) -> CameraState {
        self.orbit.get_state(&self.camera)
    }

    pub fn restore_camera_state(&mut self, state: &CameraState) {
        self.orbit.set_state(&mut self.camera, state);
    }

    // ── Selection ────────────────────────────────────────────

    /// Select a part by id. Returns `false` for an unknown id.
    pub fn select_part(&mut self, id: &str) -> bool {
        let Some(index) = self.parts.iter().position(|p| p.id == id) else {
            return false;
        };
        let now = self.clock.now();
        let (interaction, _, mut ctx) = self.split();
        interaction.select_part(index, &mut ctx, now);
        true
    }

    pub fn clear_selection(&mut self) {
        let now = self.clock.now();
        let (interaction, _, mut ctx) = self.split();
        interaction.clear_selection(&mut ctx, now);
    }

    // ── Output ───────────────────────────────────────────────

    /// Hovered part, else selected part, else the product overview
    pub fn info(&self) -> InfoPanel {
        let relevant = self
            .interaction
            .state()
            .relevant()
            .and_then(|i| self.parts.get(i));
        match relevant {
            Some(part) => InfoPanel {
                title: part.name.clone(),
                category: Some(part.category.display_name().to_string()),
                description: part.description.clone(),
            },
            None => InfoPanel {
                title: self.product_name.clone(),
                category: None,
                description: self.product_description.clone(),
            },
        }
    }

    pub fn render_states(&self) -> Vec<RenderState> {
        render_states(&self.parts, &self.scene, &self.materials)
    }

    /// Restore original materials and release feedback materials. Idempotent.
    pub fn dispose(&mut self) {
        if self.interaction.is_disposed() {
            return;
        }
        self.interaction.dispose(&mut self.scene, &mut self.materials);
        tracing::debug!("Viewer session disposed");
    }

    fn split(&mut self) -> (&mut InteractionController, &PerspectiveCamera, SceneAccess<'_>) {
        (
            &mut self.interaction,
            &self.camera,
            SceneAccess {
                parts: &self.parts,
                scene: &mut self.scene,
                materials: &mut self.materials,
            },
        )
    }
}

impl Drop for ViewerSession {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::fixtures;

    fn session(catalog: &ProductCatalog) -> (ViewerSession, ManualClock) {
        let clock = ManualClock::new();
        let session =
            ViewerSession::new(catalog, ViewerSettings::default(), Box::new(clock.clone()))
                .unwrap();
        (session, clock)
    }

    #[test]
    fn test_camera_starts_at_default_pose() {
        let (s, _) = session(&ProductCatalog::chair());
        assert!(s.camera().position.abs_diff_eq(Vec3::new(0.0, 3.0, 8.0), 1e-5));
        assert!(s.camera().target.abs_diff_eq(Vec3::new(0.0, 0.9, 0.0), 1e-5));
        assert_eq!(s.camera_mode(), CameraMode::Autonomous);
    }

    #[test]
    fn test_invalid_catalog_fails() {
        let mut catalog = fixtures::row_catalog();
        catalog.parts[1].id = "box_left".to_string();
        let result = ViewerSession::new(
            &catalog,
            ViewerSettings::default(),
            Box::new(ManualClock::new()),
        );
        assert!(matches!(result, Err(ViewerError::InvalidCatalog(_))));
    }

    #[test]
    fn test_select_by_id_and_info() {
        let (mut s, _) = session(&ProductCatalog::chair());
        assert_eq!(s.info().title, "Oak Lounge Chair");
        assert!(s.info().category.is_none());

        assert!(s.select_part("seat"));
        let info = s.info();
        assert_eq!(info.category.as_deref(), Some("Seat"));
        assert_eq!(s.selected_part().map(|p| p.id.as_str()), Some("seat"));

        assert!(!s.select_part("no_such_part"));
        assert_eq!(s.selected_part().map(|p| p.id.as_str()), Some("seat"));

        s.clear_selection();
        assert!(s.selected_part().is_none());
    }

    #[test]
    fn test_drag_overrides_then_resumes() {
        let (mut s, clock) = session(&ProductCatalog::chair());
        s.frame();
        s.begin_camera_drag();
        s.drag_camera(50.0, 0.0);
        assert_eq!(s.camera_mode(), CameraMode::Manual);
        s.end_camera_drag();

        clock.advance(1.0);
        s.frame();
        assert_eq!(s.camera_mode(), CameraMode::Manual);

        clock.advance(1.5);
        s.frame();
        assert_eq!(s.camera_mode(), CameraMode::Autonomous);
    }

    #[test]
    fn test_pointer_outside_empty_rect_is_ignored() {
        let (mut s, _) = session(&fixtures::single_box_catalog());
        s.pointer_move(10.0, 10.0, CanvasRect::new(0.0, 0.0, 0.0, 0.0));
        assert!(s.hovered_part().is_none());
        assert_eq!(s.cursor(), CursorHint::Default);
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let (mut s, _) = session(&fixtures::single_box_catalog());
        assert!(s.select_part("box"));
        let live = s.materials().live_count();
        s.dispose();
        assert!(s.materials().live_count() < live);
        let after = s.materials().live_count();
        s.dispose();
        assert_eq!(s.materials().live_count(), after);
    }
}
