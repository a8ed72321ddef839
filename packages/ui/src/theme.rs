//! Light/dark theme selection, persisted in the browser.

use dioxus::prelude::*;

use crate::icons::{FaCircleHalfStroke, FaMoon, FaSun};
use crate::Icon;

#[cfg(target_arch = "wasm32")]
const THEME_KEY: &str = "munchkin_theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    /// Follow the OS preference.
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::System, Theme::Light, Theme::Dark];

    /// Parse a stored value. Anything unrecognised means [`Theme::System`].
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "light" => Self::Light,
            "dark" => Self::Dark,
            _ => Self::System,
        }
    }

    /// Value of the `data-theme` attribute; `None` for the system theme.
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Self::System => None,
            Self::Light => Some("light"),
            Self::Dark => Some("dark"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }

    /// The next theme in the sidebar toggle cycle.
    pub fn next(self) -> Self {
        match self {
            Self::System => Self::Light,
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
        }
    }
}

/// Theme context provided at the root.
pub type ThemeSignal = Signal<Theme>;

pub fn use_theme() -> ThemeSignal {
    use_context::<ThemeSignal>()
}

/// Read the saved theme into `theme` and apply it to the document.
pub fn load_theme_from_storage(theme: &mut ThemeSignal) {
    #[cfg(target_arch = "wasm32")]
    {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(THEME_KEY).ok().flatten());
        if let Some(value) = stored {
            let saved = Theme::parse(&value);
            apply_theme(saved);
            theme.set(saved);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = theme;
}

/// Set `data-theme` on the document element and persist the choice.
pub fn apply_theme(theme: Theme) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(root) = window.document().and_then(|d| d.document_element()) {
            let _ = match theme.as_str() {
                Some(value) => root.set_attribute("data-theme", value),
                None => root.remove_attribute("data-theme"),
            };
        }
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = match theme.as_str() {
                Some(value) => storage.set_item(THEME_KEY, value),
                None => storage.remove_item(THEME_KEY),
            };
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::debug!("theme set to {}", theme.label());
}

fn icon_for(theme: Theme) -> Element {
    match theme {
        Theme::System => rsx! { Icon { icon: FaCircleHalfStroke, width: 14, height: 14 } },
        Theme::Light => rsx! { Icon { icon: FaSun, width: 14, height: 14 } },
        Theme::Dark => rsx! { Icon { icon: FaMoon, width: 14, height: 14 } },
    }
}

/// Radio-style cards for the settings page.
#[component]
pub fn ThemeSelector() -> Element {
    let mut theme = use_theme();
    let current = theme();

    rsx! {
        div {
            class: "flex flex-wrap gap-3",
            for option in Theme::ALL {
                label {
                    key: "{option.label()}",
                    class: if option == current { "theme-card theme-card-active" } else { "theme-card" },
                    onclick: move |_| {
                        apply_theme(option);
                        theme.set(option);
                    },
                    {icon_for(option)}
                    span { "{option.label()}" }
                }
            }
        }
        p {
            class: "view-muted mt-2",
            "Choose how Munchkin Site appears. System follows your OS preference."
        }
    }
}

/// Compact cycling toggle for the sidebar footer.
#[component]
pub fn ThemeToggle() -> Element {
    let mut theme = use_theme();
    let current = theme();

    rsx! {
        button {
            class: "sidebar-bottom-item",
            title: "Theme: {current.label()}",
            onclick: move |_| {
                let next = current.next();
                apply_theme(next);
                theme.set(next);
            },
            {icon_for(current)}
            span { "{current.label()}" }
        }
    }
}
