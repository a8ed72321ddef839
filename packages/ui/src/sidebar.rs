use api::AVATAR_THUMB;
use dioxus::prelude::*;

use crate::auth::{sign_out, use_auth, use_backend};
use crate::icons::{FaBook, FaEnvelope, FaGear, FaHouse, FaMoon, FaRightFromBracket, FaStar};
use crate::theme::ThemeToggle;
use crate::Icon;

/// Top-level destinations in the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavItem {
    Home,
    Dreams,
    Letters,
    Reviews,
    Settings,
}

impl NavItem {
    pub const MAIN: [NavItem; 4] = [NavItem::Home, NavItem::Dreams, NavItem::Letters, NavItem::Reviews];

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Dreams => "Dreams",
            Self::Letters => "Letters",
            Self::Reviews => "Reviews",
            Self::Settings => "Settings",
        }
    }

    fn icon(self) -> Element {
        match self {
            Self::Home => rsx! { Icon { icon: FaHouse, width: 14, height: 14 } },
            Self::Dreams => rsx! { Icon { icon: FaMoon, width: 14, height: 14 } },
            Self::Letters => rsx! { Icon { icon: FaEnvelope, width: 14, height: 14 } },
            Self::Reviews => rsx! { Icon { icon: FaStar, width: 14, height: 14 } },
            Self::Settings => rsx! { Icon { icon: FaGear, width: 14, height: 14 } },
        }
    }
}

#[component]
pub fn AppSidebar(active: NavItem, on_navigate: EventHandler<NavItem>) -> Element {
    let auth = use_auth();
    let client = use_backend();
    let user = auth().user;
    let avatar = user
        .as_ref()
        .and_then(|u| client.file_url(u, Some(AVATAR_THUMB)));
    let name = user
        .as_ref()
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| "Munchkin Site".to_string());

    rsx! {
        nav {
            class: "sidebar",

            div {
                class: "sidebar-user",
                if let Some(src) = avatar {
                    img { class: "sidebar-user-avatar", src: "{src}", alt: "Avatar" }
                } else {
                    span { class: "sidebar-user-avatar", Icon { icon: FaBook, width: 16, height: 16 } }
                }
                span { class: "sidebar-user-name", "{name}" }
            }

            div {
                class: "sidebar-group",
                p { class: "sidebar-group-label", "Munchkinaville" }
                for item in NavItem::MAIN {
                    SidebarLink {
                        key: "{item.label()}",
                        item,
                        active: active == item,
                        on_navigate,
                    }
                }
            }

            div {
                class: "sidebar-bottom",
                SidebarLink {
                    item: NavItem::Settings,
                    active: active == NavItem::Settings,
                    on_navigate,
                }
                ThemeToggle {}
                if user.is_some() {
                    SignOutItem { on_signed_out: move |_| on_navigate.call(NavItem::Home) }
                }
            }
        }
    }
}

#[component]
fn SidebarLink(item: NavItem, active: bool, on_navigate: EventHandler<NavItem>) -> Element {
    rsx! {
        button {
            class: if active { "sidebar-item active" } else { "sidebar-item" },
            onclick: move |_| on_navigate.call(item),
            {item.icon()}
            span { "{item.label()}" }
        }
    }
}

#[component]
fn SignOutItem(on_signed_out: EventHandler<()>) -> Element {
    let auth = use_auth();
    let client = use_backend();

    rsx! {
        button {
            class: "sidebar-bottom-item",
            onclick: move |_| {
                sign_out(auth, &client);
                on_signed_out.call(());
            },
            Icon { icon: FaRightFromBracket, width: 14, height: 14 }
            span { "Sign out" }
        }
    }
}
