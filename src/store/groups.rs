/// Workflow group persistence, worksheet placements and the group report
///
/// A placement puts one worksheet at a step position inside a group; the pair
/// (worksheet, group) is unique. The report is a read-only projection over
/// placements joined with their worksheet, process, analyst and workflow.

use crate::error::{ApiError, ApiResult};
use crate::store::types::{
    GroupReportRow, NewWorkflowGroup, NewWorksheetPlacement, WorkflowGroup, WorksheetPlacement,
};
use sqlx::sqlite::SqlitePool;

#[derive(Debug, Clone)]
pub struct WorkflowGroupStorage {
    pool: SqlitePool,
}

impl WorkflowGroupStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> ApiResult<Vec<WorkflowGroup>> {
        let groups =
            sqlx::query_as::<_, WorkflowGroup>("SELECT id, workflow_id FROM workflow_groups ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(groups)
    }

    pub async fn get(&self, id: i64) -> ApiResult<WorkflowGroup> {
        sqlx::query_as::<_, WorkflowGroup>("SELECT id, workflow_id FROM workflow_groups WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::not_found("workflow group", id))
    }

    pub async fn create(&self, group: &NewWorkflowGroup) -> ApiResult<WorkflowGroup> {
        let result = sqlx::query("INSERT INTO workflow_groups (workflow_id) VALUES (?)")
            .bind(group.workflow_id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_write(e, "workflow group"))?;

        Ok(WorkflowGroup {
            id: result.last_insert_rowid(),
            workflow_id: group.workflow_id,
        })
    }

    pub async fn update(&self, group: &WorkflowGroup) -> ApiResult<()> {
        let result = sqlx::query("UPDATE workflow_groups SET workflow_id = ? WHERE id = ?")
            .bind(group.workflow_id)
            .bind(group.id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_write(e, "workflow group"))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("workflow group", group.id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let result = sqlx::query("DELETE FROM workflow_groups WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_delete(e, "workflow group", id))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("workflow group", id));
        }
        tracing::info!("Deleted workflow group {}", id);
        Ok(())
    }

    pub async fn list_placements(&self) -> ApiResult<Vec<WorksheetPlacement>> {
        let placements = sqlx::query_as::<_, WorksheetPlacement>(
            "SELECT id, worksheet_id, workflow_group_id, step_order FROM worksheet_workflow_groups ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(placements)
    }

    pub async fn get_placement(&self, id: i64) -> ApiResult<WorksheetPlacement> {
        sqlx::query_as::<_, WorksheetPlacement>(
            "SELECT id, worksheet_id, workflow_group_id, step_order FROM worksheet_workflow_groups WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("worksheet placement", id))
    }

    /// Place a worksheet in a group; Conflict if it is already placed there
    pub async fn create_placement(
        &self,
        placement: &NewWorksheetPlacement,
    ) -> ApiResult<WorksheetPlacement> {
        let result = sqlx::query(
            "INSERT INTO worksheet_workflow_groups (worksheet_id, workflow_group_id, step_order) VALUES (?, ?, ?)",
        )
        .bind(placement.worksheet_id)
        .bind(placement.workflow_group_id)
        .bind(placement.step_order)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_write(e, "worksheet placement"))?;

        Ok(WorksheetPlacement {
            id: result.last_insert_rowid(),
            worksheet_id: placement.worksheet_id,
            workflow_group_id: placement.workflow_group_id,
            step_order: placement.step_order,
        })
    }

    pub async fn update_placement(&self, placement: &WorksheetPlacement) -> ApiResult<()> {
        let result = sqlx::query(
            "UPDATE worksheet_workflow_groups SET worksheet_id = ?, workflow_group_id = ?, step_order = ? WHERE id = ?",
        )
        .bind(placement.worksheet_id)
        .bind(placement.workflow_group_id)
        .bind(placement.step_order)
        .bind(placement.id)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_write(e, "worksheet placement"))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("worksheet placement", placement.id));
        }
        Ok(())
    }

    pub async fn delete_placement(&self, id: i64) -> ApiResult<()> {
        let result = sqlx::query("DELETE FROM worksheet_workflow_groups WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_delete(e, "worksheet placement", id))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("worksheet placement", id));
        }
        Ok(())
    }

    /// Ordered report for one group
    ///
    /// Rows come back by ascending step order; equal steps keep insertion order.
    /// NotFound when no worksheet is placed in the group.
    pub async fn report(&self, group_id: i64) -> ApiResult<Vec<GroupReportRow>> {
        let rows = sqlx::query_as::<_, GroupReportRow>(
            r#"
            SELECT w.name AS workflow_name,
                   wwg.step_order AS step_order,
                   p.name AS process_name,
                   ws.name AS worksheet_name,
                   u.user_name AS analyst_name
            FROM worksheet_workflow_groups wwg
            JOIN workflow_groups g ON g.id = wwg.workflow_group_id
            JOIN workflows w ON w.id = g.workflow_id
            JOIN worksheets ws ON ws.id = wwg.worksheet_id
            JOIN dna_processes p ON p.id = ws.dna_process_id
            JOIN users u ON u.id = ws.analyst_id
            WHERE wwg.workflow_group_id = ?
            ORDER BY wwg.step_order ASC, wwg.id ASC
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Err(ApiError::NotFound(format!(
                "workflow group {} has no worksheets",
                group_id
            )));
        }
        Ok(rows)
    }
}
