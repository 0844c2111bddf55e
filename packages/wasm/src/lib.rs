//! Browser entry point for the element editor.
//!
//! The extension's content script creates one [`ElementEditor`] per page
//! and forwards the toolbar-button message to it:
//!
//! ```js
//! const editor = new ElementEditor();
//! chrome.runtime.onMessage.addListener((request) => editor.handleMessage(request.action));
//! ```

mod host;

pub use host::{Dispatch, PageEvent, WebHost};

use element_editor::{ClickDisposition, EditSession, EditorConfig, KeyDisposition, KeyInput, Mode};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Node;

type SharedSession = Rc<RefCell<EditSession<WebHost>>>;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Messages the extension background process can send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMessage {
    Toggle,
}

impl HostMessage {
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "toggle" => Some(HostMessage::Toggle),
            _ => None,
        }
    }
}

#[wasm_bindgen]
pub struct ElementEditor {
    session: SharedSession,
}

#[wasm_bindgen]
impl ElementEditor {
    /// Editor bound to the current page with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ElementEditor, JsValue> {
        Self::create(EditorConfig::default())
    }

    /// Editor with settings from a JSON config string
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str) -> Result<ElementEditor, JsValue> {
        let config: EditorConfig = serde_json::from_str(config_json)
            .map_err(|e| JsValue::from_str(&format!("Config error: {}", e)))?;
        Self::create(config)
    }

    fn create(config: EditorConfig) -> Result<ElementEditor, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("No document available"))?;

        let session = Rc::new_cyclic(|weak: &Weak<RefCell<EditSession<WebHost>>>| {
            let weak = weak.clone();
            let dispatch: Dispatch = Rc::new(move |event: PageEvent| route_event(&weak, event));
            RefCell::new(EditSession::with_config(WebHost::new(document, dispatch), config))
        });

        Ok(ElementEditor { session })
    }

    /// Flip the overlay on or off; returns the new state
    #[wasm_bindgen(js_name = toggleActivation)]
    pub fn toggle_activation(&self) -> bool {
        match self.session.try_borrow_mut() {
            Ok(mut session) => session.toggle_activation(),
            Err(_) => false,
        }
    }

    /// Handle a `{ action }` message from the extension
    #[wasm_bindgen(js_name = handleMessage)]
    pub fn handle_message(&self, action: &str) -> bool {
        match HostMessage::from_action(action) {
            Some(HostMessage::Toggle) => self.toggle_activation(),
            None => {
                debug!(action, "Ignoring unknown message");
                self.active()
            }
        }
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.session.try_borrow().map(|s| s.is_active()).unwrap_or(false)
    }

    /// Armed mode as "none", "remove" or "edit"
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        let mode = self.session.try_borrow().map(|s| s.mode()).unwrap_or(Mode::None);
        serde_json::to_value(mode)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    }

    #[wasm_bindgen(getter, js_name = changeCount)]
    pub fn change_count(&self) -> usize {
        self.session.try_borrow().map(|s| s.log().len()).unwrap_or(0)
    }

    /// Revert the last change; returns false when there was nothing to undo
    pub fn undo(&self) -> bool {
        self.session
            .try_borrow_mut()
            .map(|mut s| s.undo().is_some())
            .unwrap_or(false)
    }
}

// Listeners hold closures owned by the host; detach them before it goes
impl Drop for ElementEditor {
    fn drop(&mut self) {
        if let Ok(mut session) = self.session.try_borrow_mut() {
            session.close();
        }
    }
}

fn route_event(session: &Weak<RefCell<EditSession<WebHost>>>, event: PageEvent) {
    let Some(session) = session.upgrade() else {
        return;
    };
    // Events raised synchronously by our own DOM calls are dropped
    let Ok(mut session) = session.try_borrow_mut() else {
        debug!("Dropping re-entrant page event");
        return;
    };

    match event {
        PageEvent::Click(event) => {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
                return;
            };
            if session.handle_click(&target) == ClickDisposition::Consumed {
                event.prevent_default();
                event.stop_propagation();
            }
        }
        PageEvent::Icon(icon) => session.activate_icon(icon),
        PageEvent::Blur(node) => session.handle_blur(&node),
        PageEvent::KeyDown(node, event) => {
            let key = KeyInput::new(event.key(), event.shift_key());
            if session.handle_keydown(&node, &key) == KeyDisposition::PreventDefault {
                event.prevent_default();
            }
        }
    }
}
