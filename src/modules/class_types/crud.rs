use sqlx::{MySql, Pool};
use thiserror::Error;

use super::model::ClassType;
use crate::modules::auth::crud::is_duplicate_entry;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Class type with this name already exists")]
    DuplicateName,
    #[error("Class type not found")]
    NotFound,
    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        CatalogError::Database(err.to_string())
    }
}

pub struct ClassTypeCrud {
    pool: Pool<MySql>,
}

impl ClassTypeCrud {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<ClassType>, CatalogError> {
        let class_types =
            sqlx::query_as::<_, ClassType>("SELECT * FROM class_types ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(class_types)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<ClassType, CatalogError> {
        sqlx::query_as::<_, ClassType>("SELECT * FROM class_types WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(CatalogError::NotFound)
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        difficulty_level: Option<&str>,
        base_price: f64,
    ) -> Result<ClassType, CatalogError> {
        let existing: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM class_types WHERE name = ?")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        if existing.0 > 0 {
            return Err(CatalogError::DuplicateName);
        }

        let result = sqlx::query(
            "INSERT INTO class_types (name, description, difficulty_level, base_price) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(description)
        .bind(difficulty_level)
        .bind(base_price)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_duplicate_entry(&e) {
                CatalogError::DuplicateName
            } else {
                CatalogError::Database(e.to_string())
            }
        })?;

        self.find_by_id(result.last_insert_id() as i64).await
    }
}
