//! Browser bindings for the product viewer.
//!
//! JS owns the canvas, the render loop and the actual drawing: it calls
//! `frame()` once per animation frame, then draws `render_states()` with the
//! matrix from `view_projection()`. Pointer events are forwarded in client
//! pixels; the canvas bounding rect is read here.

use chair_viewer_lib::camera_controller::CameraState;
use chair_viewer_lib::clock::TimeSource;
use chair_viewer_lib::error::ViewerError;
use chair_viewer_lib::settings::ViewerSettings;
use chair_viewer_lib::viewport::camera::CanvasRect;
use chair_viewer_lib::ViewerSession;
use shared::ProductCatalog;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}

/// `performance.now()` in seconds
struct JsClock {
    performance: Option<web_sys::Performance>,
}

impl JsClock {
    fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

impl TimeSource for JsClock {
    fn now(&self) -> f64 {
        match &self.performance {
            Some(p) => p.now() / 1000.0,
            None => js_sys::Date::now() / 1000.0,
        }
    }
}

fn to_js(e: ViewerError) -> JsValue {
    JsError::new(&e.to_string()).into()
}

fn serialize<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[wasm_bindgen]
pub struct WasmViewer {
    canvas: web_sys::HtmlCanvasElement,
    session: ViewerSession,
}

#[wasm_bindgen]
impl WasmViewer {
    /// Bind to the canvas with id `canvas_id`. Uses the built-in chair unless
    /// `catalog_json` is given. Fails if the canvas does not exist.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, catalog_json: Option<String>) -> Result<WasmViewer, JsValue> {
        let canvas = find_canvas(canvas_id).map_err(to_js)?;
        let catalog = match catalog_json {
            Some(json) => ProductCatalog::from_json(&json)
                .map_err(ViewerError::from)
                .map_err(to_js)?,
            None => ProductCatalog::chair(),
        };

        let mut session =
            ViewerSession::new(&catalog, ViewerSettings::default(), Box::new(JsClock::new()))
                .map_err(to_js)?;
        session.set_viewport_size(canvas.width() as f32, canvas.height() as f32);
        tracing::info!("Viewer bound to #{canvas_id}");

        Ok(WasmViewer { canvas, session })
    }

    /// Advance camera and feedback animations; call once per animation frame
    pub fn frame(&mut self) {
        self.session
            .set_viewport_size(self.canvas.width() as f32, self.canvas.height() as f32);
        self.session.frame();
    }

    pub fn pointer_move(&mut self, client_x: f32, client_y: f32) {
        let rect = self.canvas_rect();
        self.session.pointer_move(client_x, client_y, rect);
    }

    pub fn pointer_click(&mut self, client_x: f32, client_y: f32) {
        let rect = self.canvas_rect();
        self.session.pointer_click(client_x, client_y, rect);
    }

    pub fn pointer_leave(&mut self) {
        self.session.pointer_leave();
    }

    pub fn begin_camera_drag(&mut self) {
        self.session.begin_camera_drag();
    }

    pub fn drag_camera(&mut self, dx: f32, dy: f32) {
        self.session.drag_camera(dx, dy);
    }

    pub fn end_camera_drag(&mut self) {
        self.session.end_camera_drag();
    }

    pub fn zoom(&mut self, delta: f32) {
        self.session.zoom(delta);
    }

    pub fn reset_view(&mut self) {
        self.session.reset_view();
    }

    pub fn toggle_auto_rotate(&mut self) {
        self.session.toggle_auto_rotate();
    }

    /// Select a part by id. Returns `false` for an unknown id.
    pub fn select_part(&mut self, id: &str) -> bool {
        self.session.select_part(id)
    }

    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
    }

    /// CSS cursor for the canvas
    pub fn cursor(&self) -> String {
        self.session.cursor().css().to_string()
    }

    /// `{ title, category, description }` for the info panel
    pub fn info(&self) -> Result<JsValue, JsValue> {
        serialize(&self.session.info())
    }

    /// Per-part position, scale and material for this frame
    pub fn render_states(&self) -> Result<JsValue, JsValue> {
        serialize(&self.session.render_states())
    }

    /// Column-major view-projection matrix
    pub fn view_projection(&self) -> Vec<f32> {
        self.session.camera().view_projection().to_cols_array().to_vec()
    }

    pub fn camera_state(&self) -> Result<JsValue, JsValue> {
        serialize(&self.session.camera_state())
    }

    pub fn restore_camera_state(&mut self, state: JsValue) -> Result<(), JsValue> {
        let state: CameraState = serde_wasm_bindgen::from_value(state)
            .map_err(|e| JsValue::from_str(&format!("Invalid camera state: {}", e)))?;
        self.session.restore_camera_state(&state);
        Ok(())
    }

    /// `callback(partId | null)` whenever the hovered/selected part changes
    pub fn set_on_change(&mut self, callback: js_sys::Function) {
        self.session.set_on_change(move |part| {
            let arg = part.map_or(JsValue::NULL, |p| JsValue::from_str(&p.id));
            if let Err(e) = callback.call1(&JsValue::NULL, &arg) {
                web_sys::console::error_1(&e);
            }
        });
    }

    pub fn dispose(&mut self) {
        self.session.dispose();
    }

    fn canvas_rect(&self) -> CanvasRect {
        let r = self.canvas.get_bounding_client_rect();
        CanvasRect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
    }
}

fn find_canvas(id: &str) -> Result<web_sys::HtmlCanvasElement, ViewerError> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        .ok_or_else(|| ViewerError::MissingCanvas(id.to_string()))
}
