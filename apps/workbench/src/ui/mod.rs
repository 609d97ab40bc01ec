//! UI layer: app shell, dial canvas and the terminal palette.

pub mod app;
pub mod dial_view;
pub mod theme;

pub use app::WorkbenchApp;
