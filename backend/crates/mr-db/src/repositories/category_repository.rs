use crate::Result as DbErrorResult;
use crate::row::{timestamp_column, uuid_column};

use mr_core::Category;

use sqlx::Row;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteRow;

pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> DbErrorResult<Category> {
        Ok(Category {
            id: uuid_column(row, "id")?,
            name: row.try_get("name")?,
            icon: row.try_get("icon")?,
            description: row.try_get("description")?,
            created_at: timestamp_column(row, "created_at")?,
        })
    }

    pub async fn find_all(&self) -> DbErrorResult<Vec<Category>> {
        let rows = sqlx::query(
            "SELECT id, name, icon, description, created_at FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    pub async fn find_by_name(&self, name: &str) -> DbErrorResult<Option<Category>> {
        let row = sqlx::query(
            "SELECT id, name, icon, description, created_at FROM categories WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(Self::map_row).transpose()
    }
}
