//! Post database repository

use anyhow::Result;
use uuid::Uuid;

#[cfg(feature = "postgres")]
use sqlx::PgPool;
#[cfg(feature = "sqlite")]
use sqlx::SqlitePool;

#[cfg(feature = "sqlite")]
use crate::db::sqlite_helpers::{str_to_datetime, str_to_uuid, uuid_to_str};

#[cfg(feature = "postgres")]
type DbPool = PgPool;
#[cfg(feature = "sqlite")]
type DbPool = SqlitePool;

/// Post record from database
#[derive(Debug, Clone)]
pub struct PostRecord {
    pub id: Uuid,
    pub title: Option<String>,
    pub username: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(feature = "postgres")]
impl sqlx::FromRow<'_, sqlx::postgres::PgRow> for PostRecord {
    fn from_row(row: &sqlx::postgres::PgRow) -> sqlx::Result<Self> {
        use sqlx::Row;
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            username: row.try_get("username")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[cfg(feature = "sqlite")]
impl sqlx::FromRow<'_, sqlx::sqlite::SqliteRow> for PostRecord {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> sqlx::Result<Self> {
        use sqlx::Row;

        let id_str: String = row.try_get("id")?;
        let created_str: String = row.try_get("created_at")?;
        let updated_str: String = row.try_get("updated_at")?;

        Ok(Self {
            id: str_to_uuid(&id_str).map_err(|e| sqlx::Error::Decode(e.into()))?,
            title: row.try_get("title")?,
            username: row.try_get("username")?,
            created_at: str_to_datetime(&created_str).map_err(|e| sqlx::Error::Decode(e.into()))?,
            updated_at: str_to_datetime(&updated_str).map_err(|e| sqlx::Error::Decode(e.into()))?,
        })
    }
}

/// Input for creating a post
#[derive(Debug, Default)]
pub struct CreatePost {
    pub title: Option<String>,
    pub username: Option<String>,
}

/// Input for updating a post
///
/// A `None` field keeps the stored value.
#[derive(Debug, Default)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub username: Option<String>,
}

pub struct PostRepository {
    pool: DbPool,
}

impl PostRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get all posts, newest first
    #[cfg(feature = "postgres")]
    pub async fn list(&self) -> Result<Vec<PostRecord>> {
        let records = sqlx::query_as::<_, PostRecord>(
            r#"
            SELECT id, title, username, created_at, updated_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    #[cfg(feature = "sqlite")]
    pub async fn list(&self) -> Result<Vec<PostRecord>> {
        let records = sqlx::query_as::<_, PostRecord>(
            r#"
            SELECT id, title, username, created_at, updated_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Get a post by ID
    #[cfg(feature = "postgres")]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<PostRecord>> {
        let record = sqlx::query_as::<_, PostRecord>(
            r#"
            SELECT id, title, username, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    #[cfg(feature = "sqlite")]
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<PostRecord>> {
        let record = sqlx::query_as::<_, PostRecord>(
            r#"
            SELECT id, title, username, created_at, updated_at
            FROM posts
            WHERE id = ?1
            "#,
        )
        .bind(uuid_to_str(id))
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Create a new post
    #[cfg(feature = "postgres")]
    pub async fn create(&self, input: CreatePost) -> Result<PostRecord> {
        let record = sqlx::query_as::<_, PostRecord>(
            r#"
            INSERT INTO posts (id, title, username)
            VALUES ($1, $2, $3)
            RETURNING id, title, username, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.title)
        .bind(&input.username)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    #[cfg(feature = "sqlite")]
    pub async fn create(&self, input: CreatePost) -> Result<PostRecord> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO posts (id, title, username, created_at, updated_at)
            VALUES (?1, ?2, ?3, datetime('now'), datetime('now'))
            "#,
        )
        .bind(uuid_to_str(id))
        .bind(&input.title)
        .bind(&input.username)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to retrieve post after insert"))
    }

    /// Update a post, keeping stored values for fields that are `None`.
    /// Returns `None` when the post does not exist.
    #[cfg(feature = "postgres")]
    pub async fn update(&self, id: Uuid, input: UpdatePost) -> Result<Option<PostRecord>> {
        let record = sqlx::query_as::<_, PostRecord>(
            r#"
            UPDATE posts SET
                title = COALESCE($2, title),
                username = COALESCE($3, username),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, username, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    #[cfg(feature = "sqlite")]
    pub async fn update(&self, id: Uuid, input: UpdatePost) -> Result<Option<PostRecord>> {
        sqlx::query(
            r#"
            UPDATE posts SET
                title = COALESCE(?2, title),
                username = COALESCE(?3, username),
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
        )
        .bind(uuid_to_str(id))
        .bind(&input.title)
        .bind(&input.username)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Delete a post
    #[cfg(feature = "postgres")]
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[cfg(feature = "sqlite")]
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?1")
            .bind(uuid_to_str(id))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
