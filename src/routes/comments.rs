use axum::{
    Json,
    extract::{Path, State},
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
pub struct PostCommentBody {
    pub link_id: String,
    pub body: String,
}

/// Wire shape of a comment: its parent link rides along without that
/// link's comments.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentBody {
    id: i64,
    created_at: chrono::DateTime<chrono::Utc>,
    body: String,
    link: LinkItem,
}

#[derive(Serialize)]
struct LinkItem {
    id: i64,
    description: String,
    url: String,
}

impl CommentBody {
    fn new(comment: Comment, link: Link) -> Self {
        Self {
            id: comment.id,
            created_at: comment.created_at,
            body: comment.body,
            link: LinkItem {
                id: link.id,
                description: link.description,
                url: link.url,
            },
        }
    }
}

#[instrument(name = "HTTP: Fetch comment", skip(state))]
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    match state.comment_service.comment(&id).await? {
        Some(comment) => {
            let link = state.comment_service.link_of(&comment).await?;
            Ok(Json(CommentBody::new(comment, link)).into_response())
        }
        None => {
            tracing::info!(comment_id = %id, "Comment not found");
            Ok((StatusCode::NOT_FOUND, Json(serde_json::Value::Null)).into_response())
        }
    }
}

#[instrument(name = "HTTP: Submit comment", skip(state, payload))]
pub async fn post_comment(
    State(state): State<AppState>,
    Json(payload): Json<PostCommentBody>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = state
        .comment_service
        .post_comment(&payload.link_id, &payload.body)
        .await?;
    let link = state.comment_service.link_of(&comment).await?;
    Ok((StatusCode::CREATED, Json(CommentBody::new(comment, link))))
}
