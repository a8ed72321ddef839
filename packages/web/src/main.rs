use api::PocketBase;
use dioxus::logger::tracing::Level;
use dioxus::prelude::*;
use store::SiteConfig;
use ui::{AuthProvider, Theme, ThemeSignal};
use views::{CategoryReviews, Dreams, Home, LetterDetail, Letters, Reviews, Settings, SidebarLayout};

mod views;

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Site settings embedded at build time.
const SITE_TOML: &str = include_str!("../../../munchkin.toml");

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(SidebarLayout)]
        #[route("/")]
        Home {},
        #[route("/dreams")]
        Dreams {},
        #[route("/letters")]
        Letters {},
        #[route("/letters/:id")]
        LetterDetail { id: String },
        #[route("/reviews")]
        Reviews {},
        #[route("/reviews/:category")]
        CategoryReviews { category: String },
        #[route("/settings")]
        Settings {},
}

fn main() {
    dioxus::logger::init(Level::INFO).ok();
    dioxus::launch(App);
}

/// `munchkin.toml`, with the backend URL overridable at compile time.
fn site_config() -> SiteConfig {
    let config = SiteConfig::from_toml(SITE_TOML).unwrap_or_else(|e| {
        tracing::warn!("invalid {}: {e}; using defaults", SiteConfig::filename());
        SiteConfig::default()
    });
    match option_env!("MUNCHKIN_BACKEND_URL") {
        Some(url) if !url.is_empty() => config.with_backend_url(url),
        _ => config,
    }
}

#[component]
fn App() -> Element {
    let config = use_context_provider(site_config);
    use_context_provider(move || {
        tracing::info!("backend at {}", config.backend.url);
        PocketBase::from_config(&config)
    });

    let mut theme: ThemeSignal = use_context_provider(|| Signal::new(Theme::System));
    use_effect(move || {
        ui::load_theme_from_storage(&mut theme);
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}
