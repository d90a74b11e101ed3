//! UI preferences: color mode and sidebar state.
//!
//! Both are persisted in localStorage under the keys `mode` (`dark`/`light`)
//! and `status` (`close`/`open`).

use leptos::prelude::*;
use web_sys::window;

const MODE_KEY: &str = "mode";
const SIDEBAR_KEY: &str = "status";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Stored value and `data-theme` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => "moon",
            Theme::Dark => "sun",
        }
    }
}

/// Sidebar collapsed flag as stored under `status`
pub fn sidebar_open_from(stored: Option<&str>) -> bool {
    stored != Some("close")
}

pub fn sidebar_stored_value(open: bool) -> &'static str {
    if open {
        "open"
    } else {
        "close"
    }
}

fn load_pref(key: &str) -> Option<String> {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(key).ok().flatten())
}

fn save_pref(key: &str, value: &str) {
    if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
        if storage.set_item(key, value).is_err() {
            log::warn!("failed to persist preference '{}'", key);
        }
    }
}

pub fn load_sidebar_open() -> bool {
    sidebar_open_from(load_pref(SIDEBAR_KEY).as_deref())
}

pub fn save_sidebar_open(open: bool) {
    save_pref(SIDEBAR_KEY, sidebar_stored_value(open));
}

/// Toggles the `dark` class on body and mirrors the mode in `data-theme`
fn apply_theme(theme: Theme) {
    if let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) {
        let _ = body
            .class_list()
            .toggle_with_force("dark", theme == Theme::Dark);
        let _ = body.set_attribute("data-theme", theme.as_str());
    }
}

#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub theme: RwSignal<Theme>,
}

impl ThemeContext {
    pub fn set_theme(&self, theme: Theme) {
        self.theme.set(theme);
        save_pref(MODE_KEY, theme.as_str());
        apply_theme(theme);
    }

    pub fn toggle(&self) {
        self.set_theme(self.theme.get_untracked().toggled());
    }
}

#[component]
pub fn ThemeProvider(children: Children) -> impl IntoView {
    let initial = load_pref(MODE_KEY)
        .map(|s| Theme::parse(&s))
        .unwrap_or_default();
    apply_theme(initial);
    provide_context(ThemeContext {
        theme: RwSignal::new(initial),
    });

    children()
}

pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext not found. Wrap your app with ThemeProvider.")
}

/// Dark/light switch for the top header
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let ctx = use_theme();

    view! {
        <button
            class="top-header__icon-btn"
            title=move || match ctx.theme.get() {
                Theme::Light => "Dark mode",
                Theme::Dark => "Light mode",
            }
            on:click=move |_| ctx.toggle()
        >
            {move || crate::shared::icons::icon(ctx.theme.get().icon())}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parse_and_toggle() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("anything"), Theme::Light);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::parse(Theme::Dark.as_str()), Theme::Dark);
    }

    #[test]
    fn test_sidebar_pref() {
        assert!(sidebar_open_from(None));
        assert!(sidebar_open_from(Some("open")));
        assert!(!sidebar_open_from(Some("close")));
        assert_eq!(sidebar_stored_value(false), "close");
    }
}
