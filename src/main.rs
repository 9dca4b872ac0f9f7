/// dnaflow: DNA-processing workflow administration server
///
/// Main entry point. Loads configuration and starts the HTTP server.

use dnaflow::{config::Config, server::start_server};

/// Application entry point
///
/// Reads an optional `.env` file, builds the configuration from DNAFLOW_*
/// variables and starts listening for requests. The server provides:
/// - Entity CRUD at /api/{users,dnaprocesses,workflows,workflowgroups,worksheets,...}
/// - Sequence replacement at PUT /api/workflows/{id}/processes
/// - Group report at GET /api/workflowgroups/{id}/report
/// - Health check at /healthz
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration (defaults to 0.0.0.0:3004 and data/dnaflow.db)
    let config = Config::default();

    start_server(config).await?;

    Ok(())
}
