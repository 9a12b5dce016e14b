use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::errors::ApiError;
use crate::models::{Comment, Link};
use crate::startup::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedParams {
    pub filter_needle: Option<String>,
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PostLinkBody {
    pub url: String,
    pub description: String,
}

/// Wire shape of a link: its comments ride along, newest first, without
/// their back-reference.
#[derive(Serialize)]
pub struct LinkBody {
    id: i64,
    description: String,
    url: String,
    comments: Vec<CommentItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CommentItem {
    id: i64,
    created_at: chrono::DateTime<chrono::Utc>,
    body: String,
}

impl LinkBody {
    fn new(link: Link, comments: Vec<Comment>) -> Self {
        Self {
            id: link.id,
            description: link.description,
            url: link.url,
            comments: comments
                .into_iter()
                .map(|c| CommentItem {
                    id: c.id,
                    created_at: c.created_at,
                    body: c.body,
                })
                .collect(),
        }
    }
}

#[instrument(name = "HTTP: Feed request", skip(state))]
pub async fn feed(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Json<Vec<LinkBody>>, ApiError> {
    let links = state
        .link_service
        .feed(params.filter_needle.as_deref(), params.skip, params.take)
        .await?;

    let mut feed = Vec::with_capacity(links.len());
    for link in links {
        let comments = state.link_service.comments_of(link.id).await?;
        feed.push(LinkBody::new(link, comments));
    }
    Ok(Json(feed))
}

#[instrument(name = "HTTP: Fetch link", skip(state))]
pub async fn get_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    match state.link_service.link(&id).await? {
        Some(link) => {
            let comments = state.link_service.comments_of(link.id).await?;
            Ok(Json(LinkBody::new(link, comments)).into_response())
        }
        None => {
            tracing::info!(link_id = %id, "Link not found");
            Ok((StatusCode::NOT_FOUND, Json(serde_json::Value::Null)).into_response())
        }
    }
}

#[instrument(name = "HTTP: Submit link", skip(state, payload))]
pub async fn post_link(
    State(state): State<AppState>,
    Json(payload): Json<PostLinkBody>,
) -> Result<impl IntoResponse, ApiError> {
    let link = state
        .link_service
        .post_link(&payload.url, &payload.description)
        .await?;
    Ok((StatusCode::CREATED, Json(LinkBody::new(link, Vec::new()))))
}
