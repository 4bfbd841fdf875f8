//! `web-sys` adapters for the theme controller.
//!
//! Each adapter degrades instead of failing when the API it wraps is missing.

use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsValue;

use crate::config::ThemeConfig;
use crate::preference::{MemoryStore, PreferenceStore, StoreError};
use crate::theme::{AmbientSignal, StyleScope, Theme, ThemeChangeEvent, ThemeController};

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

fn js_error_message(e: &JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// `window.localStorage`.
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    /// Fails when storage is missing or blocked by browser policy.
    pub fn open() -> Result<Self, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .map(|storage| Self { storage })
            .ok_or(StoreError::Unavailable)
    }
}

impl PreferenceStore for LocalStorageStore {
    fn read(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn try_write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Rejected(js_error_message(&e)))
    }
}

/// `matchMedia("(prefers-color-scheme: dark)")`, evaluated on each call.
pub struct MediaQueryAmbient;

impl AmbientSignal for MediaQueryAmbient {
    fn prefers_dark(&self) -> bool {
        web_sys::window()
            .and_then(|w| w.match_media(DARK_QUERY).ok().flatten())
            .is_some_and(|mq| mq.matches())
    }
}

/// Dark class and theme attribute on `<html>`.
pub struct DocumentScope {
    dark_class: String,
    attribute: String,
}

impl DocumentScope {
    pub fn new(config: &ThemeConfig) -> Self {
        Self {
            dark_class: config.dark_class.clone(),
            attribute: config.attribute.clone(),
        }
    }
}

impl StyleScope for DocumentScope {
    fn apply(&self, theme: Theme) {
        let Some(html) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        else {
            return;
        };

        let classes = html.class_list();
        let result = if theme.is_dark() {
            classes.add_1(&self.dark_class)
        } else {
            classes.remove_1(&self.dark_class)
        };
        if let Err(e) = result {
            warn!("Failed to update theme class: {}", js_error_message(&e));
        }
        if let Err(e) = html.set_attribute(&self.attribute, theme.as_str()) {
            warn!("Failed to set {} attribute: {}", self.attribute, js_error_message(&e));
        }
    }
}

/// Re-dispatch each change as a `CustomEvent` on `window` with `detail = { theme }`.
pub fn dom_broadcaster(event_name: String) -> impl Fn(&ThemeChangeEvent) + 'static {
    move |event| dispatch_theme_event(&event_name, event)
}

fn dispatch_theme_event(event_name: &str, event: &ThemeChangeEvent) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let detail = match serde_wasm_bindgen::to_value(event) {
        Ok(detail) => detail,
        Err(e) => {
            warn!("Failed to serialize {} detail: {}", event_name, e);
            return;
        }
    };

    let init = web_sys::CustomEventInit::new();
    init.set_detail(&detail);
    match web_sys::CustomEvent::new_with_event_init_dict(event_name, &init) {
        Ok(custom) => {
            let _ = window.dispatch_event(&custom);
            debug!("Dispatched {} ({})", event_name, event.theme);
        }
        Err(e) => warn!("Failed to create {} event: {}", event_name, js_error_message(&e)),
    }
}

/// Build the page's controller on top of the browser adapters.
pub fn theme_controller(config: &ThemeConfig) -> ThemeController {
    let store: Rc<dyn PreferenceStore> = match LocalStorageStore::open() {
        Ok(store) => Rc::new(store),
        Err(e) => {
            warn!("{}; theme will not persist across reloads", e);
            Rc::new(MemoryStore::default())
        }
    };

    ThemeController::new(
        store,
        Rc::new(MediaQueryAmbient),
        Rc::new(DocumentScope::new(config)),
        config.storage_key.clone(),
    )
}
