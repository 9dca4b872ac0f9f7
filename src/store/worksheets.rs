/// Worksheet persistence

use crate::error::{ApiError, ApiResult};
use crate::store::types::{check_name, NewWorksheet, Worksheet};
use sqlx::sqlite::SqlitePool;

#[derive(Debug, Clone)]
pub struct WorksheetStorage {
    pool: SqlitePool,
}

impl WorksheetStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> ApiResult<Vec<Worksheet>> {
        let worksheets = sqlx::query_as::<_, Worksheet>(
            "SELECT id, name, analyst_id, dna_process_id FROM worksheets ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(worksheets)
    }

    pub async fn get(&self, id: i64) -> ApiResult<Worksheet> {
        sqlx::query_as::<_, Worksheet>(
            "SELECT id, name, analyst_id, dna_process_id FROM worksheets WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ApiError::not_found("worksheet", id))
    }

    pub async fn create(&self, worksheet: &NewWorksheet) -> ApiResult<Worksheet> {
        check_name("name", &worksheet.name)?;

        let result = sqlx::query(
            "INSERT INTO worksheets (name, analyst_id, dna_process_id) VALUES (?, ?, ?)",
        )
        .bind(&worksheet.name)
        .bind(worksheet.analyst_id)
        .bind(worksheet.dna_process_id)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_write(e, "worksheet"))?;

        Ok(Worksheet {
            id: result.last_insert_rowid(),
            name: worksheet.name.clone(),
            analyst_id: worksheet.analyst_id,
            dna_process_id: worksheet.dna_process_id,
        })
    }

    pub async fn update(&self, worksheet: &Worksheet) -> ApiResult<()> {
        check_name("name", &worksheet.name)?;

        let result = sqlx::query(
            "UPDATE worksheets SET name = ?, analyst_id = ?, dna_process_id = ? WHERE id = ?",
        )
        .bind(&worksheet.name)
        .bind(worksheet.analyst_id)
        .bind(worksheet.dna_process_id)
        .bind(worksheet.id)
        .execute(&self.pool)
        .await
        .map_err(|e| ApiError::from_write(e, "worksheet"))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("worksheet", worksheet.id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let result = sqlx::query("DELETE FROM worksheets WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_delete(e, "worksheet", id))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("worksheet", id));
        }
        tracing::info!("Deleted worksheet {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Database;

    async fn storage() -> WorksheetStorage {
        let db = Database::in_memory().await.unwrap();
        db.seed_if_empty().await.unwrap();
        WorksheetStorage::new(db.pool().clone())
    }

    #[tokio::test]
    async fn seeded_worksheets_belong_to_analyst() {
        let worksheets = storage().await.list().await.unwrap();
        assert_eq!(worksheets.len(), 3);
        assert!(worksheets.iter().all(|w| w.analyst_id == 4));
        assert_eq!(worksheets[2].name, "Process 3 Worksheet");
    }

    #[tokio::test]
    async fn worksheet_with_measurements_cannot_be_deleted() {
        let store = storage().await;
        assert!(matches!(store.delete(1).await, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn update_moves_worksheet_to_other_process() {
        let store = storage().await;
        let mut sheet = store.get(1).await.unwrap();
        sheet.dna_process_id = 3;
        store.update(&sheet).await.unwrap();
        assert_eq!(store.get(1).await.unwrap().dna_process_id, 3);

        sheet.dna_process_id = 77;
        assert!(matches!(store.update(&sheet).await, Err(ApiError::Validation(_))));
    }
}
