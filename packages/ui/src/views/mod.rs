mod auth_panel;
pub use auth_panel::AuthPanel;

mod category_reviews;
pub use category_reviews::CategoryReviewsView;

mod dreams;
pub use dreams::DreamsView;

mod home;
pub use home::HomeView;

mod letter_detail;
pub use letter_detail::LetterDetailView;

mod letters;
pub use letters::LettersView;

mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod reviews;
pub use reviews::ReviewsView;

mod settings;
pub use settings::SettingsView;

mod sidebar_layout;
pub use sidebar_layout::SidebarLayoutView;
