use chair_viewer_lib::ViewerSession;
use egui::Ui;

pub fn show(ui: &mut Ui, session: &ViewerSession) {
    ui.horizontal(|ui| {
        match session.hovered_part() {
            Some(part) => ui.label(format!("Hover: {}", part.name)),
            None => ui.weak("Hover: none"),
        };

        ui.separator();

        if let Some(part) = session.selected_part() {
            ui.colored_label(
                egui::Color32::from_rgb(255, 190, 110),
                format!("Selected: {}", part.name),
            );
            ui.separator();
        }

        let motion = session.orbit().motion();
        ui.weak(format!(
            "Camera: {}  {:.0}°",
            session.camera_mode().label(),
            motion.angle.to_degrees()
        ));

        if !session.orbit().is_auto_rotate_enabled() {
            ui.separator();
            ui.weak("Auto-rotate off");
        }

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(concat!("Chair Viewer v", env!("CARGO_PKG_VERSION")));
        });
    });
}
