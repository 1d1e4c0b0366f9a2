//! Keyboard shortcut handling

use chair_viewer_lib::ViewerSession;
use eframe::egui;

/// Handle keyboard shortcuts for the viewer
pub fn handle_keyboard(ctx: &egui::Context, session: &mut ViewerSession) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    let (reset, toggle, escape) = ctx.input(|i| {
        (
            i.key_pressed(egui::Key::R) && !i.modifiers.command,
            i.key_pressed(egui::Key::Space),
            i.key_pressed(egui::Key::Escape),
        )
    });

    // R: fly back to the initial view
    if reset {
        session.reset_view();
    }
    // Space: autonomous rotation on/off
    if toggle {
        session.toggle_auto_rotate();
    }
    if escape {
        session.clear_selection();
    }
}
