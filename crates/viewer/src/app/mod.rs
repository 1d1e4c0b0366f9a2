//! Main application module

mod keyboard;
mod menus;
mod styles;

use chair_viewer_lib::clock::SystemClock;
use chair_viewer_lib::error::ViewerError;
use chair_viewer_lib::settings::ViewerSettings;
use chair_viewer_lib::ViewerSession;
use eframe::egui;
use shared::ProductCatalog;

use crate::ui::{info_panel, status_bar};
use crate::viewport::ViewportPanel;

enum Phase {
    /// Catalog waiting to be turned into a scene
    Loading(ProductCatalog),
    Ready(ViewerSession),
    /// Terminal: one message, no retry
    Failed(String),
}

/// Main application
pub struct ViewerApp {
    phase: Phase,
    viewport: Option<ViewportPanel>,
    settings: ViewerSettings,
    /// Frames shown with the loading indicator
    loading_frames: u32,
}

impl ViewerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        catalog: Result<ProductCatalog, ViewerError>,
    ) -> Self {
        let settings = ViewerSettings::load();
        styles::configure_styles(&cc.egui_ctx, settings.ui.font_size);

        let viewport = match cc.gl.as_ref() {
            Some(gl) => ViewportPanel::new(gl).map_err(ViewerError::RenderContext),
            None => Err(ViewerError::RenderContext(
                "no OpenGL context available".to_string(),
            )),
        };

        let (phase, viewport) = match (catalog, viewport) {
            (Ok(catalog), Ok(viewport)) => (Phase::Loading(catalog), Some(viewport)),
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!("Initialization failed: {e}");
                (Phase::Failed(e.to_string()), None)
            }
        };

        Self {
            phase,
            viewport,
            settings,
            loading_frames: 0,
        }
    }

    fn finish_loading(&mut self, ctx: &egui::Context) {
        let Phase::Loading(catalog) = &self.phase else {
            return;
        };
        self.phase = match ViewerSession::new(
            catalog,
            self.settings.clone(),
            Box::new(SystemClock::new()),
        ) {
            Ok(mut session) => {
                let repaint = ctx.clone();
                session.set_on_change(move |part| {
                    tracing::debug!("Showing {}", part.map_or("product overview", |p| p.name.as_str()));
                    repaint.request_repaint();
                });
                if let Some(viewport) = self.viewport.as_mut() {
                    viewport.load_scene(&session);
                }
                Phase::Ready(session)
            }
            Err(e) => {
                tracing::error!("Failed to build scene: {e}");
                Phase::Failed(e.to_string())
            }
        };
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if matches!(self.phase, Phase::Loading(_)) {
            show_loading(ctx);
            // Let the indicator reach the screen before building
            if self.loading_frames > 0 {
                self.finish_loading(ctx);
            }
            self.loading_frames += 1;
            ctx.request_repaint();
            return;
        }

        if let Phase::Failed(message) = &self.phase {
            show_error(ctx, message);
            return;
        }
        let Phase::Ready(session) = &mut self.phase else {
            return;
        };

        session.frame();

        keyboard::handle_keyboard(ctx, session);

        let mut settings_changed = false;

        // ── Menu bar ──────────────────────────────────────────
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                menus::file_menu(ui);
                settings_changed |= menus::view_menu(ui, session, &mut self.settings);
            });
        });

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, session);
            });

        // ── Right panel: part info ───────────────────────────
        egui::SidePanel::right("info_panel")
            .default_width(280.0)
            .width_range(200.0..=450.0)
            .resizable(true)
            .frame(egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(8)))
            .show(ctx, |ui| {
                info_panel::show(ui, session);
            });

        // ── Central panel: 3D viewport ───────────────────────
        let show_grid = self.settings.viewport.show_grid;
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                if let Some(viewport) = self.viewport.as_mut() {
                    viewport.show(ui, session, show_grid);
                }
            });

        if settings_changed {
            if let Err(e) = self.settings.save() {
                tracing::warn!("Failed to save settings: {e}");
            }
        }

        // Autonomous camera and feedback animations run every frame
        ctx.request_repaint();
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if let Phase::Ready(session) = &mut self.phase {
            session.dispose();
        }
        if let (Some(gl), Some(viewport)) = (gl, self.viewport.as_ref()) {
            viewport.destroy(gl);
        }
    }
}

fn show_loading(ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.centered_and_justified(|ui| {
            ui.horizontal_centered(|ui| {
                ui.spinner();
                ui.label("Loading model...");
            });
        });
    });
}

fn show_error(ctx: &egui::Context, message: &str) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.centered_and_justified(|ui| {
            ui.colored_label(
                egui::Color32::from_rgb(230, 110, 110),
                format!("Unable to start the viewer: {message}"),
            );
        });
    });
}
