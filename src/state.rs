/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc で cheap)
 * - storage 呼び出しを blocking pool に逃がす
 */
use std::sync::Arc;

use crate::{error::AppError, repos::post_repo::PostRepo};

#[derive(Clone, Debug)]
pub struct AppState {
    pub posts: Arc<PostRepo>,
}

impl AppState {
    pub fn new(posts: PostRepo) -> Self {
        Self {
            posts: Arc::new(posts),
        }
    }

    /// Runs a storage call on the blocking pool; the store does synchronous file I/O.
    pub async fn with_posts<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&PostRepo) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let repo = Arc::clone(&self.posts);
        tokio::task::spawn_blocking(move || f(&repo))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "storage task panicked");
                AppError::Internal
            })?
    }
}
