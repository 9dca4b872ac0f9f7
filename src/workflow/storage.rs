/// SQLite persistence layer for workflows
///
/// Handles workflow CRUD and reads the ordered process sequence attached to each
/// workflow. Changes to the sequence itself go through `workflow::sequence`.

use crate::error::{ApiError, ApiResult};
use crate::store::types::check_name;
use crate::workflow::types::{NewWorkflow, Workflow, WorkflowDetail, WorkflowStep};
use sqlx::sqlite::SqlitePool;
use std::collections::HashMap;

const STEP_SELECT: &str = r#"
    SELECT wp.id, wp.workflow_id, wp.dna_process_id, p.name AS process_name, wp.process_order
    FROM workflow_processes wp
    JOIN dna_processes p ON p.id = wp.dna_process_id
"#;

/// SQLite-based workflow storage manager
#[derive(Debug, Clone)]
pub struct WorkflowStorage {
    /// SQLite connection pool
    pool: SqlitePool,
}

/// Step row tagged with its owning workflow, used to bucket a bulk read
#[derive(sqlx::FromRow)]
struct StepRow {
    workflow_id: i64,
    #[sqlx(flatten)]
    step: WorkflowStep,
}

impl WorkflowStorage {
    /// Create new storage instance with database connection
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all workflows, each with its ordered sequence
    pub async fn list(&self) -> ApiResult<Vec<WorkflowDetail>> {
        let workflows =
            sqlx::query_as::<_, Workflow>("SELECT id, name, created_by FROM workflows ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        let sql = format!("{} ORDER BY wp.workflow_id, wp.process_order, wp.id", STEP_SELECT);
        let rows = sqlx::query_as::<_, StepRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        let mut steps: HashMap<i64, Vec<WorkflowStep>> = HashMap::new();
        for row in rows {
            steps.entry(row.workflow_id).or_default().push(row.step);
        }

        Ok(workflows
            .into_iter()
            .map(|workflow| {
                let sequence = steps.remove(&workflow.id).unwrap_or_default();
                WorkflowDetail::new(workflow, sequence)
            })
            .collect())
    }

    /// Retrieve a workflow by ID together with its ordered sequence
    pub async fn get(&self, id: i64) -> ApiResult<WorkflowDetail> {
        let workflow =
            sqlx::query_as::<_, Workflow>("SELECT id, name, created_by FROM workflows WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| ApiError::not_found("workflow", id))?;

        let steps = self.steps(id).await?;
        Ok(WorkflowDetail::new(workflow, steps))
    }

    /// Ordered sequence of one workflow (empty if it has none)
    pub async fn steps(&self, workflow_id: i64) -> ApiResult<Vec<WorkflowStep>> {
        let sql = format!("{} WHERE wp.workflow_id = ? ORDER BY wp.process_order, wp.id", STEP_SELECT);
        let steps = sqlx::query_as::<_, WorkflowStep>(&sql)
            .bind(workflow_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(steps)
    }

    /// Store a new workflow with an empty sequence
    pub async fn create(&self, workflow: &NewWorkflow) -> ApiResult<Workflow> {
        check_name("name", &workflow.name)?;

        let result = sqlx::query("INSERT INTO workflows (name, created_by) VALUES (?, ?)")
            .bind(&workflow.name)
            .bind(workflow.created_by)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_write(e, "workflow"))?;

        let created = Workflow {
            id: result.last_insert_rowid(),
            name: workflow.name.clone(),
            created_by: workflow.created_by,
        };
        tracing::info!("Created workflow: {} ({})", created.id, created.name);
        Ok(created)
    }

    /// Update name and creator; the sequence is left untouched
    pub async fn update(&self, workflow: &Workflow) -> ApiResult<()> {
        check_name("name", &workflow.name)?;

        let result = sqlx::query("UPDATE workflows SET name = ?, created_by = ? WHERE id = ?")
            .bind(&workflow.name)
            .bind(workflow.created_by)
            .bind(workflow.id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_write(e, "workflow"))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("workflow", workflow.id));
        }
        Ok(())
    }

    /// Delete a workflow by ID
    ///
    /// Fails with Conflict while sequence rows or groups still reference it.
    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let result = sqlx::query("DELETE FROM workflows WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_delete(e, "workflow", id))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("workflow", id));
        }
        tracing::info!("Deleted workflow: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Database;

    async fn storage() -> WorkflowStorage {
        let db = Database::in_memory().await.unwrap();
        db.seed_if_empty().await.unwrap();
        WorkflowStorage::new(db.pool().clone())
    }

    #[tokio::test]
    async fn default_workflow_has_three_ordered_steps() {
        let detail = storage().await.get(1).await.unwrap();
        assert_eq!(detail.name, "Default Workflow");
        assert_eq!(detail.process_ids(), vec![1, 2, 3]);
        let orders: Vec<_> = detail.processes.iter().map(|s| s.process_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn list_buckets_steps_per_workflow() {
        let store = storage().await;
        let created = store
            .create(&NewWorkflow {
                name: "Quick check".into(),
                created_by: 2,
            })
            .await
            .unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].processes.len(), 3);
        assert_eq!(all[1].id, created.id);
        assert!(all[1].processes.is_empty());
    }

    #[tokio::test]
    async fn missing_workflow_is_not_found() {
        let store = storage().await;
        assert!(matches!(store.get(9).await, Err(ApiError::NotFound(_))));
        assert!(matches!(store.delete(9).await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn workflow_with_sequence_cannot_be_deleted() {
        let store = storage().await;
        assert!(matches!(store.delete(1).await, Err(ApiError::Conflict(_))));
        assert_eq!(store.get(1).await.unwrap().processes.len(), 3);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let store = storage().await;
        let err = store
            .create(&NewWorkflow {
                name: " ".into(),
                created_by: 1,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
