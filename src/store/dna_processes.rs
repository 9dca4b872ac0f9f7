/// DNA process persistence
///
/// Reads join the creator's user name so list views need no second lookup.

use crate::error::{ApiError, ApiResult};
use crate::store::types::{check_name, DnaProcess, DnaProcessView, NewDnaProcess};
use sqlx::sqlite::SqlitePool;

const VIEW_SELECT: &str = r#"
    SELECT p.id, p.name, p.created_by, u.user_name AS created_by_name
    FROM dna_processes p
    JOIN users u ON u.id = p.created_by
"#;

#[derive(Debug, Clone)]
pub struct DnaProcessStorage {
    pool: SqlitePool,
}

impl DnaProcessStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> ApiResult<Vec<DnaProcessView>> {
        let sql = format!("{} ORDER BY p.id", VIEW_SELECT);
        let processes = sqlx::query_as::<_, DnaProcessView>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(processes)
    }

    pub async fn get(&self, id: i64) -> ApiResult<DnaProcessView> {
        let sql = format!("{} WHERE p.id = ?", VIEW_SELECT);
        sqlx::query_as::<_, DnaProcessView>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::not_found("dna process", id))
    }

    pub async fn create(&self, process: &NewDnaProcess) -> ApiResult<DnaProcess> {
        check_name("name", &process.name)?;

        let result = sqlx::query("INSERT INTO dna_processes (name, created_by) VALUES (?, ?)")
            .bind(&process.name)
            .bind(process.created_by)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_write(e, "dna process"))?;

        Ok(DnaProcess {
            id: result.last_insert_rowid(),
            name: process.name.clone(),
            created_by: process.created_by,
        })
    }

    pub async fn update(&self, process: &DnaProcess) -> ApiResult<()> {
        check_name("name", &process.name)?;

        let result = sqlx::query("UPDATE dna_processes SET name = ?, created_by = ? WHERE id = ?")
            .bind(&process.name)
            .bind(process.created_by)
            .bind(process.id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_write(e, "dna process"))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("dna process", process.id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let result = sqlx::query("DELETE FROM dna_processes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_delete(e, "dna process", id))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("dna process", id));
        }
        tracing::info!("Deleted dna process {}", id);
        Ok(())
    }
}
