/*
 * Responsibility
 * - /api 配下の URL 構造を定義
 * - /posts/search は /posts/{id} より先に static segment として解決される
 */
use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

use crate::api::handlers::{
    docs::swagger_ui,
    posts::{create_post, delete_post, like_post, list_posts, search, update_post},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/docs", get(swagger_ui))
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/search", get(search))
        .route("/posts/{id}", put(update_post).delete(delete_post))
        .route("/posts/{id}/like", post(like_post))
}
