use crate::Result as DbErrorResult;
use crate::row::{opt_timestamp_column, timestamp_column, uuid_column};

use mr_core::CourseProgress;

use chrono::Utc;
use sqlx::Row;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

pub struct ProgressRepository {
    pool: SqlitePool,
}

impl ProgressRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> DbErrorResult<CourseProgress> {
        Ok(CourseProgress {
            user_id: uuid_column(row, "user_id")?,
            course_id: row.try_get("course_id")?,
            completed: row.try_get("completed")?,
            completed_at: opt_timestamp_column(row, "completed_at")?,
            created_at: timestamp_column(row, "created_at")?,
        })
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> DbErrorResult<Vec<CourseProgress>> {
        let rows = sqlx::query(
            r#"
                SELECT user_id, course_id, completed, completed_at, created_at
                FROM user_progress
                WHERE user_id = ?
                ORDER BY course_id
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    /// Upsert one course's completion state. The primary key on
    /// `(user_id, course_id)` makes concurrent updates converge on a single
    /// row; `created_at` keeps its original value on conflict.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        course_id: i64,
        completed: bool,
    ) -> DbErrorResult<CourseProgress> {
        let now = Utc::now();
        let completed_at = completed.then(|| now.timestamp());

        sqlx::query(
            r#"
                INSERT INTO user_progress (user_id, course_id, completed, completed_at, created_at)
                VALUES (?, ?, ?, ?, ?)
                ON CONFLICT(user_id, course_id) DO UPDATE SET
                    completed = excluded.completed,
                    completed_at = excluded.completed_at
            "#,
        )
        .bind(user_id.to_string())
        .bind(course_id)
        .bind(completed)
        .bind(completed_at)
        .bind(now.timestamp())
        .execute(&self.pool)
        .await?;

        let row = sqlx::query(
            r#"
                SELECT user_id, course_id, completed, completed_at, created_at
                FROM user_progress
                WHERE user_id = ? AND course_id = ?
            "#,
        )
        .bind(user_id.to_string())
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;

        Self::map_row(&row)
    }
}
