use std::sync::Arc;

use tracing::instrument;

use crate::errors::ApiError;
use crate::models::{Comment, Link};
use crate::store::RecordStore;
use crate::validation::{clamp_skip, clamp_take, normalize_url, parse_strict_integer};

const FEED_DEFAULT_SKIP: i64 = 0;
const FEED_DEFAULT_TAKE: i64 = 30;
const FEED_MIN_TAKE: i64 = 1;
const FEED_MAX_TAKE: i64 = 50;

#[derive(Clone)]
pub struct LinkService {
    store: Arc<dyn RecordStore>,
}

impl LinkService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// The paginated, optionally filtered feed. Bounds are validated
    /// before the store is touched; out-of-range values fail rather than
    /// silently truncate.
    #[instrument(name = "Service: List feed", skip(self))]
    pub async fn feed(
        &self,
        filter_needle: Option<&str>,
        skip: Option<i64>,
        take: Option<i64>,
    ) -> Result<Vec<Link>, ApiError> {
        let take = clamp_take(FEED_MIN_TAKE, FEED_MAX_TAKE, take.unwrap_or(FEED_DEFAULT_TAKE))?;
        let skip = clamp_skip(skip.unwrap_or(FEED_DEFAULT_SKIP))?;
        Ok(self.store.list_links(filter_needle, skip, take).await?)
    }

    /// Fetch one link. An id that is not a plain digit string is a lookup
    /// miss, not an error.
    #[instrument(name = "Service: Fetch link", skip(self))]
    pub async fn link(&self, id: &str) -> Result<Option<Link>, ApiError> {
        let Some(id) = parse_strict_integer(id) else {
            return Ok(None);
        };
        Ok(self.store.find_link_by_id(id).await?)
    }

    #[instrument(name = "Service: Submit link", skip(self))]
    pub async fn post_link(&self, url: &str, description: &str) -> Result<Link, ApiError> {
        if description.is_empty() {
            return Err(ApiError::Validation(
                "Cannot post link with empty description.".into(),
            ));
        }
        let url = normalize_url(url)?;
        Ok(self.store.create_link(&url, description).await?)
    }

    /// All comments on one link, newest first.
    #[instrument(name = "Service: List comments of link", skip(self))]
    pub async fn comments_of(&self, link_id: i64) -> Result<Vec<Comment>, ApiError> {
        Ok(self.store.list_comments_for_link(link_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn service() -> (Arc<InMemoryStore>, LinkService) {
        let store = Arc::new(InMemoryStore::new());
        (store.clone(), LinkService::new(store))
    }

    #[tokio::test]
    async fn posting_a_bare_domain_stores_the_normalized_url() {
        let (_, links) = service();

        let link = links.post_link("graphql-yoga.com", "desc").await.unwrap();

        assert!(link.id > 0);
        assert_eq!(link.url, "https://graphql-yoga.com");
        assert_eq!(link.description, "desc");
    }

    #[tokio::test]
    async fn empty_description_is_rejected_before_the_store_is_touched() {
        let (_, links) = service();

        let err = links.post_link("x", "").await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Cannot post link with empty description."
        );
        assert!(links.feed(None, None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_urls_are_rejected_and_nothing_is_stored() {
        let (_, links) = service();

        let err = links.post_link("not a url", "desc").await.unwrap_err();

        assert!(err.to_string().contains("Invalid domain format."));
        assert!(links.feed(None, None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn feed_filters_on_description_or_url() {
        let (_, links) = service();
        links.post_link("example.com", "all about yoga").await.unwrap();
        links.post_link("graphql-yoga.com", "a server").await.unwrap();
        links.post_link("rust-lang.org", "unrelated").await.unwrap();

        let feed = links.feed(Some("yoga"), Some(0), Some(10)).await.unwrap();

        assert_eq!(feed.len(), 2);
        assert!(feed.iter().all(|l| {
            l.description.contains("yoga") || l.url.contains("yoga")
        }));
    }

    #[tokio::test]
    async fn feed_matching_is_case_insensitive() {
        let (_, links) = service();
        links.post_link("example.com", "Yoga weekly").await.unwrap();

        let feed = links.feed(Some("yoga"), None, None).await.unwrap();

        assert_eq!(feed.len(), 1);
    }

    #[tokio::test]
    async fn feed_rejects_out_of_range_bounds() {
        let (_, links) = service();

        assert!(links.feed(None, None, Some(0)).await.is_err());
        assert!(links.feed(None, None, Some(51)).await.is_err());
        assert!(links.feed(None, Some(-1), None).await.is_err());
    }

    #[tokio::test]
    async fn feed_paginates_newest_first() {
        let (_, links) = service();
        links.post_link("one.com", "first").await.unwrap();
        links.post_link("two.com", "second").await.unwrap();
        links.post_link("three.com", "third").await.unwrap();

        let page = links.feed(None, Some(1), Some(1)).await.unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page[0].description, "second");
    }

    #[tokio::test]
    async fn link_lookup_misses_on_unknown_or_non_numeric_id() {
        let (_, links) = service();
        links.post_link("example.com", "desc").await.unwrap();

        assert!(links.link("999").await.unwrap().is_none());
        assert!(links.link("abc").await.unwrap().is_none());
        assert!(links.link("-1").await.unwrap().is_none());
        assert!(links.link("1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn link_lookup_is_a_pure_read() {
        let (_, links) = service();
        links.post_link("example.com", "desc").await.unwrap();

        let first = links.link("1").await.unwrap();
        let second = links.link("1").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn comments_of_a_link_come_newest_first() {
        let (store, links) = service();
        let link = links.post_link("example.com", "desc").await.unwrap();
        store.create_comment("first", link.id).await.unwrap();
        store.create_comment("second", link.id).await.unwrap();

        let comments = links.comments_of(link.id).await.unwrap();

        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].body, "second");
        assert_eq!(comments[1].body, "first");
    }
}
