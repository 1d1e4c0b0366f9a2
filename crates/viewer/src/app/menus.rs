//! Application menu bar

use chair_viewer_lib::settings::ViewerSettings;
use chair_viewer_lib::ViewerSession;
use eframe::egui;

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui) {
    ui.menu_button("File", |ui| {
        if ui.button("Quit").clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            ui.close_menu();
        }
    });
}

/// Show the view menu. Returns `true` when a persisted setting changed.
pub fn view_menu(
    ui: &mut egui::Ui,
    session: &mut ViewerSession,
    settings: &mut ViewerSettings,
) -> bool {
    let mut changed = false;
    ui.menu_button("View", |ui| {
        if ui.button("Reset view  (R)").clicked() {
            session.reset_view();
            ui.close_menu();
        }

        let mut auto_rotate = session.orbit().is_auto_rotate_enabled();
        if ui.checkbox(&mut auto_rotate, "Auto-rotate  (Space)").changed() {
            session.toggle_auto_rotate();
        }

        ui.separator();
        changed |= ui
            .checkbox(&mut settings.viewport.show_grid, "Ground grid")
            .changed();

        ui.separator();
        let has_selection = session.selected_part().is_some();
        if ui
            .add_enabled(has_selection, egui::Button::new("Clear selection  (Esc)"))
            .clicked()
        {
            session.clear_selection();
            ui.close_menu();
        }
    });
    changed
}
