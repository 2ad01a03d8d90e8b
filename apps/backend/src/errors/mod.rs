//! Error handling for the StudentHub backend.

pub mod error_code;

pub use error_code::ErrorCode;
