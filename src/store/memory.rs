use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::models::{Comment, Link};
use crate::store::{RecordStore, StoreError};

/// Substitute backend holding everything in process memory. Used by the
/// test suites to exercise handlers without a running Postgres; mirrors
/// the ordering and foreign-key behavior of [`super::PgStore`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    links: Vec<Link>,
    comments: Vec<Comment>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn create_link(&self, url: &str, description: &str) -> Result<Link, StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let link = Link {
            id: inner.links.len() as i64 + 1,
            created_at: Utc::now(),
            description: description.to_string(),
            url: url.to_string(),
        };
        inner.links.push(link.clone());
        Ok(link)
    }

    async fn create_comment(&self, body: &str, link_id: i64) -> Result<Comment, StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        if !inner.links.iter().any(|l| l.id == link_id) {
            return Err(StoreError::ForeignKeyViolation);
        }
        let comment = Comment {
            id: inner.comments.len() as i64 + 1,
            created_at: Utc::now(),
            body: body.to_string(),
            link_id,
        };
        inner.comments.push(comment.clone());
        Ok(comment)
    }

    async fn find_link_by_id(&self, id: i64) -> Result<Option<Link>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.links.iter().find(|l| l.id == id).cloned())
    }

    async fn find_comment_by_id(&self, id: i64) -> Result<Option<Comment>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn list_links(
        &self,
        filter: Option<&str>,
        skip: i64,
        take: i64,
    ) -> Result<Vec<Link>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        let needle = filter.map(|f| f.to_lowercase());
        let mut links: Vec<Link> = inner
            .links
            .iter()
            .filter(|l| match &needle {
                Some(needle) => {
                    l.description.to_lowercase().contains(needle)
                        || l.url.to_lowercase().contains(needle)
                }
                None => true,
            })
            .cloned()
            .collect();
        links.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(links
            .into_iter()
            .skip(skip as usize)
            .take(take as usize)
            .collect())
    }

    async fn list_comments_for_link(&self, link_id: i64) -> Result<Vec<Comment>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        let mut comments: Vec<Comment> = inner
            .comments
            .iter()
            .filter(|c| c.link_id == link_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(comments)
    }

    async fn find_link_of_comment(&self, link_id: i64) -> Result<Link, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        // a comment pointing at a missing link means the invariant broke upstream
        inner
            .links
            .iter()
            .find(|l| l.id == link_id)
            .cloned()
            .ok_or(StoreError::ForeignKeyViolation)
    }
}
