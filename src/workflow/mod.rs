/// Workflow Management Layer
///
/// This module handles workflows and their ordered DNA-process sequences:
/// - Type definitions (Workflow, WorkflowStep, WorkflowDetail)
/// - SQLite persistence for workflow rows
/// - Sequence operations: atomic replacement and legacy single append

// Core workflow type definitions
pub mod types;

// SQLite persistence layer for workflow storage
pub mod storage;

// Ordered process sequence: replace-all and append
pub mod sequence;

// Re-export commonly used types
pub use storage::WorkflowStorage;
pub use types::{NewWorkflow, Workflow, WorkflowDetail, WorkflowStep};
