// Presentation layer - HTTP handlers and HTML rendering
pub mod app_state;
pub mod handlers;
pub mod page;
pub mod view_state;
