pub mod scroll_view;
pub mod tick;
