/// Ordered process sequence of a workflow
///
/// Two ways to change which DNA processes a workflow runs, and in which order:
/// - `replace_processes`: swap the whole sequence atomically (preferred)
/// - `append_process`: add one (process, order) entry without renumbering
///
/// Both take a connection borrowed for the duration of the request. The
/// replacement opens its own transaction on it; dropping that transaction
/// without committing rolls everything back, so every early return leaves the
/// stored sequence exactly as it was.

use crate::error::{ApiError, ApiResult};
use sqlx::{Acquire, QueryBuilder, Sqlite, SqliteConnection};
use std::collections::HashSet;

/// Replace the entire sequence of `workflow_id` with `process_ids`, in order
///
/// Checks, before anything is written:
/// 1. the workflow exists (NotFound)
/// 2. `process_ids` holds no duplicates (Validation, "duplicate ids")
/// 3. every id names an existing DNA process (Validation, "invalid id"; the
///    first missing id in input order is reported)
///
/// Then deletes the old rows and inserts one row per id with
/// `process_order` = 1-based position. Any storage error after that point
/// aborts the transaction and surfaces as `ApiError::Storage`.
pub async fn replace_processes(
    conn: &mut SqliteConnection,
    workflow_id: i64,
    process_ids: &[i64],
) -> ApiResult<()> {
    let mut tx = conn.begin().await?;

    // Writing first takes the database write lock, so concurrent replacements of
    // the same sequence queue up instead of interleaving their delete/insert pairs.
    let locked = sqlx::query("UPDATE workflows SET name = name WHERE id = ?")
        .bind(workflow_id)
        .execute(&mut *tx)
        .await?;
    if locked.rows_affected() == 0 {
        return Err(ApiError::not_found("workflow", workflow_id));
    }

    if let Some(dup) = first_duplicate(process_ids) {
        return Err(ApiError::Validation(format!(
            "duplicate ids: dna process {} appears more than once",
            dup
        )));
    }

    if let Some(missing) = first_missing_process(&mut *tx, process_ids).await? {
        return Err(ApiError::Validation(format!(
            "invalid id: dna process {} does not exist",
            missing
        )));
    }

    let removed = sqlx::query("DELETE FROM workflow_processes WHERE workflow_id = ?")
        .bind(workflow_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    for (position, process_id) in process_ids.iter().enumerate() {
        sqlx::query(
            "INSERT INTO workflow_processes (workflow_id, dna_process_id, process_order) VALUES (?, ?, ?)",
        )
        .bind(workflow_id)
        .bind(*process_id)
        .bind(position as i64 + 1)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        "🔁 Replaced sequence of workflow {}: {} steps removed, {} inserted",
        workflow_id,
        removed,
        process_ids.len()
    );
    Ok(())
}

/// Add a single `(process, order)` entry to a workflow
///
/// Existing entries keep their order values; keeping the numbering consistent
/// is up to the caller. Conflict when the process is already in the sequence.
pub async fn append_process(
    conn: &mut SqliteConnection,
    workflow_id: i64,
    dna_process_id: i64,
    process_order: i64,
) -> ApiResult<()> {
    if !exists(conn, "SELECT 1 FROM workflows WHERE id = ?", workflow_id).await? {
        return Err(ApiError::not_found("workflow", workflow_id));
    }
    if !exists(conn, "SELECT 1 FROM dna_processes WHERE id = ?", dna_process_id).await? {
        return Err(ApiError::Validation(format!(
            "invalid id: dna process {} does not exist",
            dna_process_id
        )));
    }

    let already = sqlx::query(
        "SELECT 1 FROM workflow_processes WHERE workflow_id = ? AND dna_process_id = ?",
    )
    .bind(workflow_id)
    .bind(dna_process_id)
    .fetch_optional(&mut *conn)
    .await?
    .is_some();
    if already {
        return Err(process_already_present(workflow_id, dna_process_id));
    }

    // The unique index still guards against a racing append between check and insert
    sqlx::query(
        "INSERT INTO workflow_processes (workflow_id, dna_process_id, process_order) VALUES (?, ?, ?)",
    )
    .bind(workflow_id)
    .bind(dna_process_id)
    .bind(process_order)
    .execute(&mut *conn)
    .await
    .map_err(|e| match ApiError::from_write(e, "workflow process") {
        ApiError::Conflict(_) => process_already_present(workflow_id, dna_process_id),
        other => other,
    })?;

    tracing::info!(
        "Appended dna process {} to workflow {} at order {}",
        dna_process_id,
        workflow_id,
        process_order
    );
    Ok(())
}

fn process_already_present(workflow_id: i64, dna_process_id: i64) -> ApiError {
    ApiError::Conflict(format!(
        "dna process {} is already in workflow {}",
        dna_process_id, workflow_id
    ))
}

fn first_duplicate(ids: &[i64]) -> Option<i64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().find(|id| !seen.insert(*id))
}

async fn first_missing_process(
    conn: &mut SqliteConnection,
    ids: &[i64],
) -> ApiResult<Option<i64>> {
    if ids.is_empty() {
        return Ok(None);
    }

    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT id FROM dna_processes WHERE id IN (");
    let mut separated = query.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let found: HashSet<i64> = query
        .build_query_scalar::<i64>()
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .collect();

    Ok(ids.iter().copied().find(|id| !found.contains(id)))
}

async fn exists(conn: &mut SqliteConnection, sql: &str, id: i64) -> ApiResult<bool> {
    let row = sqlx::query(sql).bind(id).fetch_optional(&mut *conn).await?;
    Ok(row.is_some())
}
