pub mod config;
pub mod courses;
pub mod error;
pub mod models;
pub mod storage;
pub mod store;
pub mod ui;
pub mod view;

pub use error::{AppError, Result};
