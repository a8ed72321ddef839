//! Route targets: each binds navigation to a shared view from `ui`.

use dioxus::prelude::*;
use ui::views::{
    CategoryReviewsView, DreamsView, HomeView, LetterDetailView, LettersView, ReviewsView,
    SettingsView, SidebarLayoutView,
};
use ui::{NavItem, ProtectedRoute};

use crate::Route;

fn route_for(item: NavItem) -> Route {
    match item {
        NavItem::Home => Route::Home {},
        NavItem::Dreams => Route::Dreams {},
        NavItem::Letters => Route::Letters {},
        NavItem::Reviews => Route::Reviews {},
        NavItem::Settings => Route::Settings {},
    }
}

fn nav_item(route: &Route) -> NavItem {
    match route {
        Route::Home {} => NavItem::Home,
        Route::Dreams {} => NavItem::Dreams,
        Route::Letters {} | Route::LetterDetail { .. } => NavItem::Letters,
        Route::Reviews {} | Route::CategoryReviews { .. } => NavItem::Reviews,
        Route::Settings {} => NavItem::Settings,
    }
}

#[component]
pub fn SidebarLayout() -> Element {
    let nav = use_navigator();
    let route = use_route::<Route>();

    rsx! {
        SidebarLayoutView {
            active: nav_item(&route),
            on_navigate: move |item| {
                nav.push(route_for(item));
            },
            Outlet::<Route> {}
        }
    }
}

/// Signed-out visitors are sent back to the landing page.
#[component]
fn Guarded(children: Element) -> Element {
    let nav = use_navigator();

    rsx! {
        ProtectedRoute {
            on_redirect: move |_| {
                nav.replace(Route::Home {});
            },
            {children}
        }
    }
}

#[component]
pub fn Home() -> Element {
    rsx! { HomeView {} }
}

#[component]
pub fn Dreams() -> Element {
    rsx! {
        Guarded { DreamsView {} }
    }
}

#[component]
pub fn Letters() -> Element {
    let nav = use_navigator();

    rsx! {
        Guarded {
            LettersView {
                on_open: move |id| {
                    nav.push(Route::LetterDetail { id });
                },
            }
        }
    }
}

#[component]
pub fn LetterDetail(id: String) -> Element {
    let nav = use_navigator();

    rsx! {
        Guarded {
            LetterDetailView {
                key: "{id}",
                id: id.clone(),
                on_back: move |_| {
                    nav.push(Route::Letters {});
                },
                on_deleted: move |_| {
                    nav.replace(Route::Letters {});
                },
            }
        }
    }
}

#[component]
pub fn Reviews() -> Element {
    let nav = use_navigator();

    rsx! {
        Guarded {
            ReviewsView {
                on_open_category: move |category| {
                    nav.push(Route::CategoryReviews { category });
                },
            }
        }
    }
}

#[component]
pub fn CategoryReviews(category: String) -> Element {
    let nav = use_navigator();

    rsx! {
        Guarded {
            CategoryReviewsView {
                key: "{category}",
                category: category.clone(),
                on_back: move |_| {
                    nav.push(Route::Reviews {});
                },
            }
        }
    }
}

#[component]
pub fn Settings() -> Element {
    rsx! {
        Guarded { SettingsView {} }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_items_round_trip_through_routes() {
        for item in [
            NavItem::Home,
            NavItem::Dreams,
            NavItem::Letters,
            NavItem::Reviews,
            NavItem::Settings,
        ] {
            assert_eq!(nav_item(&route_for(item)), item);
        }
    }

    #[test]
    fn detail_routes_highlight_their_list() {
        let detail = Route::LetterDetail { id: "l1".into() };
        assert_eq!(nav_item(&detail), NavItem::Letters);
        let category = Route::CategoryReviews { category: "Coffee".into() };
        assert_eq!(nav_item(&category), NavItem::Reviews);
    }

    #[test]
    fn routes_render_their_paths() {
        assert_eq!(Route::Dreams {}.to_string(), "/dreams");
        assert_eq!(Route::LetterDetail { id: "abc".into() }.to_string(), "/letters/abc");
    }
}
