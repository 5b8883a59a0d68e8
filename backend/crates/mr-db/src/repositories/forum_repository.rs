//! Forum storage: posts, replies, helpful marks.
//!
//! The helpful count is always derived from `helpful_marks` so the counter
//! cannot drift from the marks; the UNIQUE primary key on
//! `(reply_id, user_id)` makes the toggle race-safe.

use crate::Result as DbErrorResult;
use crate::row::{opt_uuid_column, timestamp_column, uuid_column};

use mr_core::{ForumPost, ForumReply, PostSummary, ReplyView};

use chrono::Utc;
use sqlx::Row;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

const POST_SELECT: &str = r#"
    SELECT p.id, p.user_id, p.category_id, p.title, p.content, p.views,
           p.created_at, p.updated_at,
           u.username, u.profile_picture,
           c.name AS category_name,
           (SELECT COUNT(*) FROM forum_replies r WHERE r.post_id = p.id) AS reply_count
    FROM forum_posts p
    JOIN users u ON u.id = p.user_id
    LEFT JOIN categories c ON c.id = p.category_id
"#;

const REPLY_SELECT: &str = r#"
    SELECT r.id, r.post_id, r.user_id, r.content, r.created_at, r.updated_at,
           u.username, u.profile_picture,
           (SELECT COUNT(*) FROM helpful_marks h WHERE h.reply_id = r.id) AS helpful_count,
           EXISTS(
               SELECT 1 FROM helpful_marks h
               WHERE h.reply_id = r.id AND h.user_id = ?
           ) AS marked_helpful_by_user
    FROM forum_replies r
    JOIN users u ON u.id = r.user_id
"#;

pub struct ForumRepository {
    pool: SqlitePool,
}

impl ForumRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_post_row(row: &SqliteRow) -> DbErrorResult<PostSummary> {
        Ok(PostSummary {
            post: ForumPost {
                id: uuid_column(row, "id")?,
                user_id: uuid_column(row, "user_id")?,
                category_id: opt_uuid_column(row, "category_id")?,
                title: row.try_get("title")?,
                content: row.try_get("content")?,
                views: row.try_get("views")?,
                created_at: timestamp_column(row, "created_at")?,
                updated_at: timestamp_column(row, "updated_at")?,
            },
            username: row.try_get("username")?,
            profile_picture: row.try_get("profile_picture")?,
            category_name: row.try_get("category_name")?,
            reply_count: row.try_get("reply_count")?,
        })
    }

    fn map_reply_row(row: &SqliteRow) -> DbErrorResult<ReplyView> {
        Ok(ReplyView {
            reply: ForumReply {
                id: uuid_column(row, "id")?,
                post_id: uuid_column(row, "post_id")?,
                user_id: uuid_column(row, "user_id")?,
                content: row.try_get("content")?,
                created_at: timestamp_column(row, "created_at")?,
                updated_at: timestamp_column(row, "updated_at")?,
            },
            username: row.try_get("username")?,
            profile_picture: row.try_get("profile_picture")?,
            helpful_count: row.try_get("helpful_count")?,
            marked_helpful_by_user: row.try_get("marked_helpful_by_user")?,
        })
    }

    /// Paginated post listing, newest first, optionally filtered by
    /// category name. `page` is 1-based.
    pub async fn list_posts(
        &self,
        category: Option<&str>,
        page: i64,
        per_page: i64,
    ) -> DbErrorResult<(Vec<PostSummary>, i64)> {
        let offset = (page.max(1) - 1) * per_page;

        let (posts, total) = if let Some(name) = category {
            let sql = format!(
                "{} WHERE c.name = ? ORDER BY p.created_at DESC, p.id LIMIT ? OFFSET ?",
                POST_SELECT
            );
            let rows = sqlx::query(&sql)
                .bind(name)
                .bind(per_page)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

            let total: i64 = sqlx::query_scalar(
                r#"
                    SELECT COUNT(*) FROM forum_posts p
                    JOIN categories c ON c.id = p.category_id
                    WHERE c.name = ?
                "#,
            )
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

            (rows, total)
        } else {
            let sql = format!("{} ORDER BY p.created_at DESC, p.id LIMIT ? OFFSET ?", POST_SELECT);
            let rows = sqlx::query(&sql)
                .bind(per_page)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM forum_posts")
                .fetch_one(&self.pool)
                .await?;

            (rows, total)
        };

        let posts = posts
            .iter()
            .map(Self::map_post_row)
            .collect::<DbErrorResult<Vec<_>>>()?;
        Ok((posts, total))
    }

    pub async fn find_post(&self, id: Uuid) -> DbErrorResult<Option<PostSummary>> {
        let sql = format!("{} WHERE p.id = ?", POST_SELECT);
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::map_post_row).transpose()
    }

    /// Replies for a post, oldest first. The viewer id drives the
    /// `marked_helpful_by_user` flag; guests pass `None` and always see
    /// false.
    pub async fn list_replies(
        &self,
        post_id: Uuid,
        viewer: Option<Uuid>,
    ) -> DbErrorResult<Vec<ReplyView>> {
        let sql = format!("{} WHERE r.post_id = ? ORDER BY r.created_at ASC, r.id", REPLY_SELECT);
        let viewer_id = viewer.map(|v| v.to_string()).unwrap_or_default();
        let rows = sqlx::query(&sql)
            .bind(viewer_id)
            .bind(post_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::map_reply_row).collect()
    }

    pub async fn bump_views(&self, id: Uuid) -> DbErrorResult<()> {
        sqlx::query("UPDATE forum_posts SET views = views + 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn create_post(
        &self,
        user_id: Uuid,
        category_id: Option<Uuid>,
        title: &str,
        content: &str,
    ) -> DbErrorResult<ForumPost> {
        let now = Utc::now();
        let post = ForumPost {
            id: Uuid::new_v4(),
            user_id,
            category_id,
            title: title.to_string(),
            content: content.to_string(),
            views: 0,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
                INSERT INTO forum_posts (
                    id, user_id, category_id, title, content, views,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(post.id.to_string())
        .bind(post.user_id.to_string())
        .bind(post.category_id.map(|c| c.to_string()))
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.views)
        .bind(post.created_at.timestamp())
        .bind(post.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(post)
    }

    /// Create a reply. Returns `None` when the post does not exist.
    pub async fn create_reply(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> DbErrorResult<Option<ForumReply>> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM forum_posts WHERE id = ?)")
            .bind(post_id.to_string())
            .fetch_one(&self.pool)
            .await?;
        if !exists {
            return Ok(None);
        }

        let now = Utc::now();
        let reply = ForumReply {
            id: Uuid::new_v4(),
            post_id,
            user_id,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
                INSERT INTO forum_replies (
                    id, post_id, user_id, content, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(reply.id.to_string())
        .bind(reply.post_id.to_string())
        .bind(reply.user_id.to_string())
        .bind(&reply.content)
        .bind(reply.created_at.timestamp())
        .bind(reply.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(Some(reply))
    }

    /// Toggle a helpful mark. Returns `None` when the reply does not exist,
    /// otherwise `(now_marked, helpful_count)`.
    pub async fn toggle_helpful(
        &self,
        reply_id: Uuid,
        user_id: Uuid,
    ) -> DbErrorResult<Option<(bool, i64)>> {
        let reply = reply_id.to_string();
        let user = user_id.to_string();

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM forum_replies WHERE id = ?)")
                .bind(&reply)
                .fetch_one(&self.pool)
                .await?;
        if !exists {
            return Ok(None);
        }

        let inserted = sqlx::query(
            "INSERT OR IGNORE INTO helpful_marks (reply_id, user_id, created_at) VALUES (?, ?, ?)",
        )
        .bind(&reply)
        .bind(&user)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await?
        .rows_affected();

        // Already marked: this request is the un-mark half of the toggle.
        let now_marked = if inserted == 0 {
            sqlx::query("DELETE FROM helpful_marks WHERE reply_id = ? AND user_id = ?")
                .bind(&reply)
                .bind(&user)
                .execute(&self.pool)
                .await?;
            false
        } else {
            true
        };

        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM helpful_marks WHERE reply_id = ?")
                .bind(&reply)
                .fetch_one(&self.pool)
                .await?;

        Ok(Some((now_marked, count)))
    }
}
