//! GUI panels and application state.

pub mod app;
pub mod components;
pub mod roster_panel;
pub mod student_form;

pub use app::App;
