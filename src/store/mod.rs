/// Storage layer
///
/// Owns the SQLite pool, the schema migrations and the default fixture, plus one
/// storage type per entity family. Workflows and their ordered process
/// sequences live in `crate::workflow`.

pub mod database;
pub mod dna_processes;
pub mod groups;
pub mod measurements;
pub mod types;
pub mod users;
pub mod worksheets;

pub use database::Database;
pub use dna_processes::DnaProcessStorage;
pub use groups::WorkflowGroupStorage;
pub use measurements::MeasurementStorage;
pub use users::UserStorage;
pub use worksheets::WorksheetStorage;
