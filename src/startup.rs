use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use sqlx::postgres::PgPoolOptions;
use tower_http::timeout::TimeoutLayer;

use crate::configuration::get_configuration;
use crate::routes::comments::{get_comment, post_comment};
use crate::routes::info;
use crate::routes::links::{feed, get_link, post_link};
use crate::services::{CommentService, LinkService};
use crate::store::{PgStore, RecordStore};

#[derive(Clone)]
pub struct AppState {
    pub link_service: LinkService,
    pub comment_service: CommentService,
}

impl AppState {
    /// One store handle per process; every request reaches it through the
    /// services held here. No other mutable state is shared between
    /// requests.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            link_service: LinkService::new(store.clone()),
            comment_service: CommentService::new(store),
        }
    }
}

/// Build the router separately from `run` so tests can drive it with a
/// substitute store.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/info", get(info))
        .route("/feed", get(feed))
        .route("/links", post(post_link))
        .route("/links/{id}", get(get_link))
        .route("/comments", post(post_comment))
        .route("/comments/{id}", get(get_comment))
        .layer(TimeoutLayer::new(Duration::from_secs(10)))
        .with_state(state)
}

pub async fn run() {
    let cfg = get_configuration().expect("could not get config");

    let pg_pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy_with(cfg.database.connect_options());

    let state = AppState::new(Arc::new(PgStore::new(pg_pool)));

    let address = cfg.application.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .expect("could not bind listener");
    tracing::info!("Listening on {}", address);
    axum::serve(listener, app(state))
        .await
        .expect("could not start server");
}
