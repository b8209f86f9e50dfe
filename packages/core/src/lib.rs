//! Blocktree Core: Block Tree Conversion
//!
//! This crate converts a page of nested content blocks, fetched lazily from a
//! remote content API, into a normalized intermediate tree that downstream
//! renderers (Markdown, typesetting) consume.
//!
//! # Architecture
//!
//! - **Lazy Fetching**: children are requested level by level through the
//!   [`provider::BlockProvider`] seam, only for blocks that carry them
//! - **Partial Failure**: a failed fetch or malformed block is recorded and
//!   isolated to its own subtree; the conversion always completes
//! - **Table-Driven Dispatch**: one static behavior row per block kind decides
//!   transformer, color support and child handling
//! - **Color Inheritance**: quotes and toggles pass their color down one level
//!
//! # Modules
//!
//! - [`models`] - Raw input types, intermediate nodes, rich text, document root
//! - [`behaviors`] - Block classifier and per-kind dispatch table
//! - [`transform`] - Pure per-kind transformers and rich-text resolution
//! - [`provider`] - `BlockProvider` trait, in-memory provider, batched lookups
//! - [`services`] - Tree builder, coordinators, page assembly, `PageConverter`
//! - [`traversal`] - Read-only helpers over built trees
//! - [`config`] - Converter configuration and build options
//! - [`logging`] - Tracing subscriber setup

pub mod behaviors;
pub mod config;
pub mod logging;
pub mod models;
pub mod provider;
pub mod services;
pub mod transform;
pub mod traversal;
pub mod utils;

// Re-export commonly used types
pub use behaviors::{classify, Eligibility};
pub use config::{BuildOptions, ConverterConfig};
pub use models::*;
pub use provider::{BlockProvider, MemoryProvider};
pub use services::{
    apply_color_inheritance, assemble_document, build_tree, ConvertError, PageConversion,
    PageConverter, PageInfo, PageInfoCache,
};
pub use transform::TransformError;
