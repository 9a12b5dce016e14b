use std::sync::Arc;

use tracing::instrument;

use crate::errors::ApiError;
use crate::models::{Comment, Link};
use crate::store::{RecordStore, StoreError};
use crate::validation::parse_strict_integer;

#[derive(Clone)]
pub struct CommentService {
    store: Arc<dyn RecordStore>,
}

impl CommentService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    fn non_existing_link(link_id: &str) -> ApiError {
        ApiError::Validation(format!(
            "Cannot post comment on non-existing link with id '{link_id}'."
        ))
    }

    /// Fetch one comment. Same miss policy as link lookups: a non-numeric
    /// id is absent, not an error.
    #[instrument(name = "Service: Fetch comment", skip(self))]
    pub async fn comment(&self, id: &str) -> Result<Option<Comment>, ApiError> {
        let Some(id) = parse_strict_integer(id) else {
            return Ok(None);
        };
        Ok(self.store.find_comment_by_id(id).await?)
    }

    /// Attach a comment to a link. The target id must be a strict digit
    /// string, and the database's foreign-key check is translated into the
    /// same client-facing message instead of leaking a storage error.
    #[instrument(name = "Service: Submit comment", skip(self, body))]
    pub async fn post_comment(&self, link_id: &str, body: &str) -> Result<Comment, ApiError> {
        let id = parse_strict_integer(link_id).ok_or_else(|| Self::non_existing_link(link_id))?;
        if body.is_empty() {
            return Err(ApiError::Validation("Cannot post empty comment.".into()));
        }
        match self.store.create_comment(body, id).await {
            Ok(comment) => Ok(comment),
            Err(StoreError::ForeignKeyViolation) => Err(Self::non_existing_link(link_id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Resolve the parent link; the foreign-key invariant guarantees it
    /// exists.
    #[instrument(name = "Service: Resolve comment's link", skip(self))]
    pub async fn link_of(&self, comment: &Comment) -> Result<Link, ApiError> {
        Ok(self.store.find_link_of_comment(comment.link_id).await?)
    }
}
