/// Per-step measurement persistence
///
/// Extractions, amplifications and quantifications share one row shape, so a
/// single storage type serves all three; `MeasurementKind` picks the table.

use crate::error::{ApiError, ApiResult};
use crate::store::types::{Measurement, MeasurementKind, NewMeasurement};
use sqlx::sqlite::SqlitePool;

#[derive(Debug, Clone)]
pub struct MeasurementStorage {
    pool: SqlitePool,
}

impl MeasurementStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, kind: MeasurementKind) -> ApiResult<Vec<Measurement>> {
        let sql = format!(
            "SELECT id, worksheet_id, prop1, prop2 FROM {} ORDER BY id",
            kind.table()
        );
        let rows = sqlx::query_as::<_, Measurement>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, kind: MeasurementKind, id: i64) -> ApiResult<Measurement> {
        let sql = format!(
            "SELECT id, worksheet_id, prop1, prop2 FROM {} WHERE id = ?",
            kind.table()
        );
        sqlx::query_as::<_, Measurement>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::not_found(kind.label(), id))
    }

    pub async fn create(
        &self,
        kind: MeasurementKind,
        measurement: &NewMeasurement,
    ) -> ApiResult<Measurement> {
        let sql = format!(
            "INSERT INTO {} (worksheet_id, prop1, prop2) VALUES (?, ?, ?)",
            kind.table()
        );
        let result = sqlx::query(&sql)
            .bind(measurement.worksheet_id)
            .bind(measurement.prop1)
            .bind(measurement.prop2)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_write(e, kind.label()))?;

        Ok(Measurement {
            id: result.last_insert_rowid(),
            worksheet_id: measurement.worksheet_id,
            prop1: measurement.prop1,
            prop2: measurement.prop2,
        })
    }

    pub async fn update(&self, kind: MeasurementKind, measurement: &Measurement) -> ApiResult<()> {
        let sql = format!(
            "UPDATE {} SET worksheet_id = ?, prop1 = ?, prop2 = ? WHERE id = ?",
            kind.table()
        );
        let result = sqlx::query(&sql)
            .bind(measurement.worksheet_id)
            .bind(measurement.prop1)
            .bind(measurement.prop2)
            .bind(measurement.id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_write(e, kind.label()))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found(kind.label(), measurement.id));
        }
        Ok(())
    }

    pub async fn delete(&self, kind: MeasurementKind, id: i64) -> ApiResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = ?", kind.table());
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_delete(e, kind.label(), id))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found(kind.label(), id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Database;

    async fn storage() -> MeasurementStorage {
        let db = Database::in_memory().await.unwrap();
        db.seed_if_empty().await.unwrap();
        MeasurementStorage::new(db.pool().clone())
    }

    #[tokio::test]
    async fn each_kind_reads_its_own_table() {
        let store = storage().await;
        let extraction = store.get(MeasurementKind::Extraction, 1).await.unwrap();
        let amplification = store.get(MeasurementKind::Amplification, 1).await.unwrap();
        let quantification = store.get(MeasurementKind::Quantification, 1).await.unwrap();

        assert_eq!((extraction.worksheet_id, extraction.prop1, extraction.prop2), (1, 2, 4));
        assert_eq!((amplification.worksheet_id, amplification.prop1), (2, 5));
        assert_eq!((quantification.worksheet_id, quantification.prop2), (3, 20));
    }

    #[tokio::test]
    async fn measurement_for_unknown_worksheet_is_rejected() {
        let err = storage()
            .await
            .create(
                MeasurementKind::Quantification,
                &NewMeasurement {
                    worksheet_id: 50,
                    prop1: 1,
                    prop2: 2,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn second_measurement_of_a_kind_for_a_worksheet_conflicts() {
        let store = storage().await;
        let second = NewMeasurement {
            worksheet_id: 1,
            prop1: 3,
            prop2: 6,
        };
        let err = store
            .create(MeasurementKind::Extraction, &second)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));

        // Other kinds are independent slots on the same worksheet
        let amplification = store
            .create(MeasurementKind::Amplification, &second)
            .await
            .unwrap();
        assert_eq!(amplification.worksheet_id, 1);

        // Moving an existing record onto an occupied worksheet is refused too
        let mut moved = store.get(MeasurementKind::Amplification, 1).await.unwrap();
        moved.worksheet_id = 1;
        assert!(matches!(
            store.update(MeasurementKind::Amplification, &moved).await,
            Err(ApiError::Conflict(_))
        ));
        assert_eq!(store.list(MeasurementKind::Extraction).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = storage().await;
        store.delete(MeasurementKind::Amplification, 1).await.unwrap();
        assert!(matches!(
            store.get(MeasurementKind::Amplification, 1).await,
            Err(ApiError::NotFound(_))
        ));
        assert_eq!(store.list(MeasurementKind::Extraction).await.unwrap().len(), 1);
    }
}
