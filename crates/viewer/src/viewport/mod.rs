//! 3D viewport panel with OpenGL rendering

mod gl_renderer;
pub use chair_viewer_lib::viewport::mesh;

use std::sync::{Arc, Mutex};

use chair_viewer_lib::interaction::CursorHint;
use chair_viewer_lib::viewport::camera::CanvasRect;
use chair_viewer_lib::ViewerSession;
use egui::Ui;
use glam::{Mat4, Vec3};

use gl_renderer::{DrawItem, GlRenderer, RenderParams};
use mesh::MeshData;

/// Zoom fraction per scrolled point
const ZOOM_PER_POINT: f32 = 0.002;

/// 3D viewport panel with OpenGL rendering
pub struct ViewportPanel {
    gl_renderer: Arc<Mutex<GlRenderer>>,
    pointer_inside: bool,
}

impl ViewportPanel {
    /// Create the panel with a GL renderer (must be called with a GL context)
    pub fn new(gl: &glow::Context) -> Result<Self, String> {
        let renderer = GlRenderer::new(gl)?;
        Ok(Self {
            gl_renderer: Arc::new(Mutex::new(renderer)),
            pointer_inside: false,
        })
    }

    /// Queue the session's meshes for upload
    pub fn load_scene(&mut self, session: &ViewerSession) {
        let meshes: Vec<MeshData> = session
            .scene()
            .iter()
            .map(|(_, r)| r.mesh.clone())
            .collect();
        if let Ok(mut r) = self.gl_renderer.lock() {
            r.queue_meshes(meshes);
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        if let Ok(mut r) = self.gl_renderer.lock() {
            r.destroy(gl);
        }
    }

    pub fn show(&mut self, ui: &mut Ui, session: &mut ViewerSession, show_grid: bool) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        session.set_viewport_size(rect.width(), rect.height());
        let canvas = CanvasRect::new(rect.left(), rect.top(), rect.width(), rect.height());

        self.handle_camera(&response, ui, session);
        self.handle_pointer(&response, canvas, session);

        if session.cursor() == CursorHint::Pointer {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        if !ui.is_rect_visible(rect) {
            return;
        }
        self.render_gl(ui, rect, session, show_grid);
    }

    fn handle_camera(&mut self, response: &egui::Response, ui: &Ui, session: &mut ViewerSession) {
        if response.drag_started_by(egui::PointerButton::Primary) {
            session.begin_camera_drag();
        }
        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            session.drag_camera(delta.x, delta.y);
        }
        if response.drag_stopped() {
            session.end_camera_drag();
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                session.zoom(scroll * ZOOM_PER_POINT);
            }
        }
    }

    fn handle_pointer(
        &mut self,
        response: &egui::Response,
        canvas: CanvasRect,
        session: &mut ViewerSession,
    ) {
        match response.hover_pos() {
            Some(pos) => {
                self.pointer_inside = true;
                if !response.dragged() {
                    session.pointer_move(pos.x, pos.y, canvas);
                }
            }
            None if self.pointer_inside => {
                self.pointer_inside = false;
                session.pointer_leave();
            }
            None => {}
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                session.pointer_click(pos.x, pos.y, canvas);
            }
        }
    }

    fn render_gl(&mut self, ui: &mut Ui, rect: egui::Rect, session: &ViewerSession, show_grid: bool) {
        let renderer = self.gl_renderer.clone();
        let view_projection = session.camera().view_projection();
        let eye = session.camera().position;
        let items = draw_items(session);
        let bg_color = session.settings().viewport.background_color;

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(eframe::egui_glow::CallbackFn::new(move |info, painter| {
                let gl = painter.gl();

                let clip = info.clip_rect_in_pixels();
                let viewport = [
                    clip.left_px as f32,
                    clip.from_bottom_px as f32,
                    clip.width_px as f32,
                    clip.height_px as f32,
                ];

                if let Ok(mut r) = renderer.lock() {
                    let params = RenderParams {
                        viewport,
                        grid_visible: show_grid,
                        bg_color,
                        eye,
                    };
                    r.paint(gl, &view_projection, &items, &params);
                }
            })),
        };

        ui.painter().add(callback);
    }
}

/// Per-frame draw list: one item per renderable
fn draw_items(session: &ViewerSession) -> Vec<DrawItem> {
    let materials = session.materials();
    session
        .scene()
        .iter()
        .filter_map(|(id, r)| {
            let material = materials.get(r.material)?;
            let (emissive, emissive_intensity) = material
                .emissive
                .map(|e| (e.color, e.intensity))
                .unwrap_or(([0.0; 3], 0.0));
            Some(DrawItem {
                mesh: id.0,
                model: Mat4::from_translation(r.position) * Mat4::from_scale(Vec3::splat(r.scale)),
                color: material.color,
                roughness: material.roughness,
                metalness: material.metalness,
                emissive,
                emissive_intensity,
            })
        })
        .collect()
}
