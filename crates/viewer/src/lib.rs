// Library crate: scene, controllers and session, testable without a GL context.
// GUI-specific modules (app, ui, viewport rendering) remain in the binary crate.

pub mod camera_controller;
pub mod clock;
pub mod error;
pub mod fixtures;
pub mod interaction;
pub mod material;
pub mod scene;
pub mod session;
pub mod settings;
pub mod tween;

/// Camera, mesh and picking types shared with the renderer.
/// The GL renderer itself stays in the binary crate.
pub mod viewport {
    pub mod camera;
    pub mod mesh;
    pub mod picking;
}

pub use session::{InfoPanel, ViewerSession};
