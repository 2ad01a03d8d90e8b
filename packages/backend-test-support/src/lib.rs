//! Backend test support utilities
//!
//! This crate provides utilities specifically for backend testing: unified
//! logging initialization, error envelope assertions, and unique test data.

pub mod error_body;
pub mod logging;
pub mod unique_helpers;
