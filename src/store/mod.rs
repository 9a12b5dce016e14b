//! The record store adapter: typed create/find operations over the two
//! persisted tables. Handlers only ever talk to the [`RecordStore`] trait,
//! so tests can swap the Postgres backend for [`InMemoryStore`].

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Comment, Link};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced parent row does not exist. Only ever inspected when
    /// creating a comment; every other store failure propagates opaquely.
    #[error("referenced row does not exist")]
    ForeignKeyViolation,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a new link; the store assigns id and creation time.
    async fn create_link(&self, url: &str, description: &str) -> Result<Link, StoreError>;

    /// Persist a new comment. Fails with [`StoreError::ForeignKeyViolation`]
    /// when `link_id` references no existing link; the constraint is
    /// enforced by the store, never re-checked locally.
    async fn create_comment(&self, body: &str, link_id: i64) -> Result<Comment, StoreError>;

    async fn find_link_by_id(&self, id: i64) -> Result<Option<Link>, StoreError>;

    async fn find_comment_by_id(&self, id: i64) -> Result<Option<Comment>, StoreError>;

    /// The feed: newest first, optionally restricted to links whose
    /// description or url contains `filter` (case-insensitive), then
    /// paginated with `skip`/`take`.
    async fn list_links(
        &self,
        filter: Option<&str>,
        skip: i64,
        take: i64,
    ) -> Result<Vec<Link>, StoreError>;

    /// All comments on one link, newest first.
    async fn list_comments_for_link(&self, link_id: i64) -> Result<Vec<Comment>, StoreError>;

    /// Resolve a comment's parent link. Always present given the
    /// foreign-key invariant.
    async fn find_link_of_comment(&self, link_id: i64) -> Result<Link, StoreError>;
}
