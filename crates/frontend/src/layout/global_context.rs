use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

use super::center::registry::{is_known_section, DEFAULT_SECTION};
use crate::shared::theme::{load_sidebar_open, save_sidebar_open};

/// Active section and sidebar visibility, shared by the whole shell
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<String>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(DEFAULT_SECTION.to_string()),
            left_open: RwSignal::new(load_sidebar_open()),
        }
    }

    /// Restores `?active=` from the URL and keeps it in sync afterwards
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(key) = active_from_query(&search) {
            self.activate(&key);
        }

        let this = *self;
        Effect::new(move |_| {
            let new_url = query_for_active(&this.active.get());
            let current = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current == new_url {
                return;
            }
            if let Some(history) = window().and_then(|w| w.history().ok()) {
                let _ = history.replace_state_with_url(
                    &wasm_bindgen::JsValue::NULL,
                    "",
                    Some(&new_url),
                );
            }
        });
    }

    pub fn activate(&self, key: &str) {
        if !is_known_section(key) {
            log::warn!("unknown section '{}'", key);
            return;
        }
        log::debug!("activate section '{}'", key);
        self.active.set(key.to_string());
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|open| *open = !*open);
        save_sidebar_open(self.left_open.get_untracked());
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// `?active=a001_crop` -> `a001_crop`
pub fn active_from_query(search: &str) -> Option<String> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").cloned().filter(|k| !k.is_empty())
}

pub fn query_for_active(key: &str) -> String {
    let query = serde_qs::to_string(&HashMap::from([("active", key)])).unwrap_or_default();
    format!("?{}", query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_query_round_trip() {
        assert_eq!(active_from_query("?active=a001_crop"), Some("a001_crop".to_string()));
        assert_eq!(active_from_query(""), None);
        assert_eq!(active_from_query("?active="), None);
        assert_eq!(query_for_active("a005_vehicle"), "?active=a005_vehicle");
    }
}
