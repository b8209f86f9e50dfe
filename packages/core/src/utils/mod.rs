//! Utility functions for the converter
//!
//! This module provides common utility functions used across the codebase.

mod ids;

pub use ids::{clean_id, format_id, is_valid_id};
