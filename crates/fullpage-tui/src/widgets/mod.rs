mod nav_dots;
mod panel;
mod status_bar;

pub use nav_dots::NavDotsWidget;
pub use panel::{visible_slice, wrap_text, PanelWidget};
pub use status_bar::StatusBarWidget;
