use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::instrument;

use crate::models::{Comment, Link};
use crate::store::{RecordStore, StoreError};

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgStore {
    #[instrument(name = "Saving new link to database", skip(self))]
    async fn create_link(&self, url: &str, description: &str) -> Result<Link, StoreError> {
        let link = sqlx::query_as::<_, Link>(
            "INSERT INTO links (url, description) VALUES ($1, $2) \
             RETURNING id, created_at, description, url",
        )
        .bind(url)
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert link: {:?}", e);
            e
        })?;
        Ok(link)
    }

    #[instrument(name = "Saving new comment to database", skip(self, body))]
    async fn create_comment(&self, body: &str, link_id: i64) -> Result<Comment, StoreError> {
        sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (body, link_id) VALUES ($1, $2) \
             RETURNING id, created_at, body, link_id",
        )
        .bind(body)
        .bind(link_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_foreign_key_violation() {
                    return StoreError::ForeignKeyViolation;
                }
            }
            tracing::error!("Failed to insert comment: {:?}", e);
            StoreError::Database(e)
        })
    }

    #[instrument(name = "Fetching link by id", skip(self))]
    async fn find_link_by_id(&self, id: i64) -> Result<Option<Link>, StoreError> {
        let link = sqlx::query_as::<_, Link>(
            "SELECT id, created_at, description, url FROM links WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(link)
    }

    #[instrument(name = "Fetching comment by id", skip(self))]
    async fn find_comment_by_id(&self, id: i64) -> Result<Option<Comment>, StoreError> {
        let comment = sqlx::query_as::<_, Comment>(
            "SELECT id, created_at, body, link_id FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(comment)
    }

    #[instrument(name = "Listing feed links", skip(self))]
    async fn list_links(
        &self,
        filter: Option<&str>,
        skip: i64,
        take: i64,
    ) -> Result<Vec<Link>, StoreError> {
        let links = sqlx::query_as::<_, Link>(
            "SELECT id, created_at, description, url FROM links \
             WHERE $1::text IS NULL \
                OR description ILIKE '%' || $1 || '%' \
                OR url ILIKE '%' || $1 || '%' \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(filter)
        .bind(take)
        .bind(skip)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list links: {:?}", e);
            e
        })?;
        Ok(links)
    }

    #[instrument(name = "Listing comments for link", skip(self))]
    async fn list_comments_for_link(&self, link_id: i64) -> Result<Vec<Comment>, StoreError> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT id, created_at, body, link_id FROM comments \
             WHERE link_id = $1 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(link_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }

    #[instrument(name = "Resolving parent link of comment", skip(self))]
    async fn find_link_of_comment(&self, link_id: i64) -> Result<Link, StoreError> {
        let link = sqlx::query_as::<_, Link>(
            "SELECT id, created_at, description, url FROM links WHERE id = $1",
        )
        .bind(link_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(link)
    }
}
