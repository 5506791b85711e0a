//! State stores owning the persisted student roster and theme preference.

pub mod students;
pub mod theme;

pub use students::{Latency, StudentStore};
pub use theme::{Theme, ThemeStore};
