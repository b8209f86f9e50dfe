//! Build Bookkeeping
//!
//! Result and error records produced by one tree-builder invocation. Nothing
//! here is thrown: errors and warnings are accumulated and returned alongside
//! the nodes that were built successfully.

use crate::models::Node;
use serde::{Deserialize, Serialize};

/// A per-block failure recorded during a build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_type: Option<String>,

    pub message: String,

    /// Underlying error rendered with its context chain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl ProcessError {
    /// Error scoped to one block
    pub fn for_block(
        block_id: impl Into<String>,
        block_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            block_id: Some(block_id.into()),
            block_type: Some(block_type.into()),
            message: message.into(),
            cause: None,
        }
    }

    /// Attach the underlying cause
    pub fn with_cause(mut self, cause: impl std::fmt::Display) -> Self {
        self.cause = Some(format!("{:#}", cause));
        self
    }
}

impl std::fmt::Display for ProcessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.block_id, &self.block_type) {
            (Some(id), Some(kind)) => write!(f, "{} ({}): {}", id, kind, self.message)?,
            (Some(id), None) => write!(f, "{}: {}", id, self.message)?,
            _ => write!(f, "{}", self.message)?,
        }
        if let Some(cause) = &self.cause {
            write!(f, ": {}", cause)?;
        }
        Ok(())
    }
}

/// Counters and diagnostics of one build
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessMetadata {
    /// Blocks turned into nodes, at every depth
    pub processed_count: usize,

    /// Length of the top-level input sequence
    pub total_count: usize,

    pub errors: Vec<ProcessError>,

    pub warnings: Vec<String>,

    pub elapsed_ms: u64,
}

impl ProcessMetadata {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Output of one tree-builder invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub nodes: Vec<Node>,
    pub metadata: ProcessMetadata,
}
