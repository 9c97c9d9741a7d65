// Presentation layer - View model, overlay rendering and HTTP handlers
pub mod app_state;
pub mod handlers;
pub mod overlay;
pub mod page;
pub mod view;
