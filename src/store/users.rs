/// User persistence
///
/// Plain CRUD over the `users` table. Deleting a user who still owns processes,
/// workflows or worksheets is refused by the foreign keys and reported as a conflict.

use crate::error::{ApiError, ApiResult};
use crate::store::types::{check_name, NewUser, User, MAX_NAME_LEN};
use sqlx::sqlite::SqlitePool;

#[derive(Debug, Clone)]
pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> ApiResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT id, user_name, email, role FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn get(&self, id: i64) -> ApiResult<User> {
        sqlx::query_as::<_, User>("SELECT id, user_name, email, role FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ApiError::not_found("user", id))
    }

    pub async fn create(&self, user: &NewUser) -> ApiResult<User> {
        validate(&user.user_name, user.email.as_deref())?;

        let result = sqlx::query("INSERT INTO users (user_name, email, role) VALUES (?, ?, ?)")
            .bind(&user.user_name)
            .bind(&user.email)
            .bind(user.role)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_write(e, "user"))?;

        Ok(User {
            id: result.last_insert_rowid(),
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            role: user.role,
        })
    }

    /// Overwrite every column of an existing user; NotFound if the row is gone
    pub async fn update(&self, user: &User) -> ApiResult<()> {
        validate(&user.user_name, user.email.as_deref())?;

        let result = sqlx::query("UPDATE users SET user_name = ?, email = ?, role = ? WHERE id = ?")
            .bind(&user.user_name)
            .bind(&user.email)
            .bind(user.role)
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_write(e, "user"))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("user", user.id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| ApiError::from_delete(e, "user", id))?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("user", id));
        }
        tracing::info!("Deleted user {}", id);
        Ok(())
    }
}

fn validate(user_name: &str, email: Option<&str>) -> ApiResult<()> {
    check_name("userName", user_name)?;
    if let Some(email) = email {
        if email.chars().count() > MAX_NAME_LEN {
            return Err(ApiError::Validation(format!(
                "email must be at most {} characters",
                MAX_NAME_LEN
            )));
        }
    }
    Ok(())
}
