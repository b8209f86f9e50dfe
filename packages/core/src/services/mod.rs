//! Conversion Services
//!
//! This module contains the conversion pipeline:
//!
//! - `tree_builder` - Recursive tree builder and the self-handling coordinators
//! - `color_inheritance` - Quote/toggle color propagation into children
//! - `page_assembler` - Document root assembly
//! - `PageInfoCache` - Page title/icon lookup for mention resolution
//! - `PageConverter` - Page-level orchestration on top of a `BlockProvider`
//!
//! Services coordinate between the provider seam and the pure transform layer.

pub mod color_inheritance;
pub mod converter;
pub mod error;
pub mod page_assembler;
pub mod page_cache;
pub mod tree_builder;

pub use color_inheritance::apply_color_inheritance;
pub use converter::{PageConversion, PageConverter};
pub use error::ConvertError;
pub use page_assembler::{assemble_document, extract_title};
pub use page_cache::{PageInfo, PageInfoCache};
pub use tree_builder::build_tree;
