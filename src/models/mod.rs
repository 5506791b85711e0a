//! Data models for students, courses, and sort configuration.

pub mod course;
pub mod student;

pub use course::{Course, SortConfig, SortDirection, SortKey};
pub use student::{DEFAULT_IMAGE_URL, NewStudent, Student, is_valid_email, seed_students};
