/// dnaflow: administration backend for laboratory DNA-processing workflows
///
/// This library provides the storage layer, the ordered workflow sequencing
/// logic and the REST API for users, DNA processes, workflows, workflow groups,
/// worksheets and their measurements.

// Core configuration and setup
pub mod config;

// Error taxonomy shared by storage and HTTP handlers
pub mod error;

// Storage layer - SQLite pool, migrations, seed data and per-entity storage
pub mod store;

// Workflow management layer - workflow rows and their ordered process sequences
pub mod workflow;

// HTTP API layer - REST endpoints for every entity
pub mod api;

// Server setup and initialization
pub mod server;

// Re-export commonly used types for external consumers
pub use api::AppState;
pub use error::{ApiError, ApiResult};
pub use server::{build_router, start_server};
pub use store::Database;
pub use workflow::{Workflow, WorkflowDetail};
