//! Right-hand panel: details of the hovered or selected part, and the part list

use chair_viewer_lib::ViewerSession;
use egui::Ui;

pub fn show(ui: &mut Ui, session: &mut ViewerSession) {
    let info = session.info();

    ui.heading(&info.title);
    let shape = session
        .hovered_part()
        .or_else(|| session.selected_part())
        .map(|p| p.shape);
    match (&info.category, shape) {
        (Some(category), Some(shape)) => {
            ui.weak(format!("{category} · {shape}"));
        }
        (Some(category), None) => {
            ui.weak(category);
        }
        _ => {}
    }
    ui.add_space(4.0);
    if !info.description.is_empty() {
        ui.label(&info.description);
    }

    ui.add_space(8.0);
    ui.separator();
    ui.strong("Parts");

    let selected = session.selected_part().map(|p| p.id.clone());
    let entries: Vec<(String, String)> = session
        .parts()
        .iter()
        .map(|p| (p.id.clone(), p.name.clone()))
        .collect();

    let mut clicked = None;
    egui::ScrollArea::vertical().show(ui, |ui| {
        for (id, name) in &entries {
            let is_selected = selected.as_deref() == Some(id.as_str());
            if ui.selectable_label(is_selected, name).clicked() {
                clicked = Some((id.clone(), is_selected));
            }
        }
    });

    match clicked {
        // Clicking the selected entry again deselects it
        Some((_, true)) => session.clear_selection(),
        Some((id, false)) => {
            session.select_part(&id);
        }
        None => {}
    }
}
