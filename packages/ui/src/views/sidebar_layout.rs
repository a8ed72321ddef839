use dioxus::prelude::*;

use crate::sidebar::{AppSidebar, NavItem};

/// Sidebar on the left, routed content on the right.
#[component]
pub fn SidebarLayoutView(active: NavItem, on_navigate: EventHandler<NavItem>, children: Element) -> Element {
    rsx! {
        div {
            class: "app-shell",
            AppSidebar { active, on_navigate }
            main { class: "app-content", {children} }
        }
    }
}
