mod app;
mod ui;
mod viewport;

use std::path::Path;

use app::ViewerApp;
use chair_viewer_lib::error::{load_catalog, ViewerError};
use shared::ProductCatalog;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chair_viewer=info".into()),
        )
        .init();

    let catalog = parse_catalog_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Chair Viewer")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "chair-viewer",
        native_options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc, catalog)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

/// `--catalog <path>` loads a JSON catalog; the built-in chair otherwise
fn parse_catalog_arg() -> Result<ProductCatalog, ViewerError> {
    let args: Vec<String> = std::env::args().collect();
    let Some(i) = args.iter().position(|a| a == "--catalog") else {
        return Ok(ProductCatalog::chair());
    };
    let path = args
        .get(i + 1)
        .ok_or_else(|| ViewerError::Io("--catalog needs a path".to_string()))?;
    let catalog = load_catalog(Path::new(path))?;
    tracing::info!("Loaded catalog from {path} ({} parts)", catalog.parts.len());
    Ok(catalog)
}
