//! Validation modules

pub mod file_size;

pub use file_size::{check_size, validate_file};
