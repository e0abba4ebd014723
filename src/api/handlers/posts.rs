/*
 * Responsibility
 * - /posts 系 handler (list / create / update / delete / search / like)
 * - Path の {id} は PostId extractor で検証済みの u64 として受け取る
 * - 毎回 collection 全体を読み直し、書き込みは全体を上書き
 */
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::{
    api::{
        dto::posts::{
            CreatePostRequest, DeletePostResponse, ListPostsQuery, PostResponse,
            SearchPostsQuery, UpdatePostRequest,
        },
        extractors::{JsonBody, PostId},
    },
    error::AppError,
    repos::post_repo::Post,
    services::post_query::{SearchQuery, next_free_id, search_posts, sort_posts},
    state::AppState,
};

fn post_not_found(id: u64) -> AppError {
    AppError::not_found(format!("post with id {id}"))
}

fn to_responses(posts: Vec<Post>) -> Vec<PostResponse> {
    posts.into_iter().map(PostResponse::from).collect()
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let posts = state.with_posts(|repo| Ok(repo.load())).await?;
    if posts.is_empty() {
        return Err(AppError::empty_collection());
    }

    let posts = match query.order()? {
        Some((field, direction)) => sort_posts(posts, field, direction),
        None => posts,
    };

    Ok(Json(to_responses(posts)))
}

pub async fn create_post(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    req.validate()?;

    let created = state
        .with_posts(move |repo| {
            let id = next_free_id(&repo.load());
            repo.create(req.into_post(id))?
                .ok_or_else(|| AppError::bad_request("MISSING_FIELDS", "post is incomplete"))
        })
        .await?;

    tracing::info!(id = created.id, "post created");
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn update_post(
    State(state): State<AppState>,
    PostId(id): PostId,
    JsonBody(req): JsonBody<UpdatePostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    let updated = state
        .with_posts(move |repo| {
            let posts = repo.load();
            if posts.is_empty() {
                return Err(AppError::empty_collection());
            }
            let index = posts
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| post_not_found(id))?;

            let post = req.apply(&posts[index])?;
            repo.update_at(index, post)?
                .ok_or_else(|| post_not_found(id))
        })
        .await?;

    tracing::info!(id, "post updated");
    Ok(Json(updated.into()))
}

pub async fn delete_post(
    State(state): State<AppState>,
    PostId(id): PostId,
) -> Result<Json<DeletePostResponse>, AppError> {
    let deleted = state
        .with_posts(move |repo| Ok(repo.delete_by_id(id)?))
        .await?
        .ok_or_else(|| post_not_found(id))?;

    tracing::info!(id = deleted, "post deleted");
    Ok(Json(DeletePostResponse {
        message: format!("Post with id {deleted} has been deleted successfully."),
    }))
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchPostsQuery>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let posts = state.with_posts(|repo| Ok(repo.load())).await?;
    if posts.is_empty() {
        return Err(AppError::empty_collection());
    }

    let query = SearchQuery::from(query);
    Ok(Json(to_responses(search_posts(posts, &query))))
}

pub async fn like_post(
    State(state): State<AppState>,
    PostId(id): PostId,
) -> Result<Json<PostResponse>, AppError> {
    let liked = state
        .with_posts(move |repo| Ok(repo.like(id)?))
        .await?
        .ok_or_else(|| post_not_found(id))?;

    Ok(Json(liked.into()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::{
        app::build_router,
        config::{AppEnv, Config},
        repos::post_repo::{Post, PostRepo},
        state::AppState,
    };

    fn test_app(dir: &TempDir) -> (Router, PostRepo) {
        let repo = PostRepo::new(dir.path().join("storage.json"));
        let config = Config {
            addr: ([127, 0, 0, 1], 0).into(),
            app_env: AppEnv::Development,
            storage_path: repo.path().to_path_buf(),
            cors_allowed_origins: Vec::new(),
        };
        (build_router(AppState::new(repo.clone()), &config), repo)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn seed(repo: &PostRepo, posts: &[(u64, &str, &str, &str)]) {
        let posts: Vec<Post> = posts
            .iter()
            .map(|(id, title, author, date)| Post {
                id: *id,
                title: title.to_string(),
                content: format!("About {title}"),
                author: author.to_string(),
                date: date.to_string(),
                likes: 0,
            })
            .collect();
        repo.save(&posts).unwrap();
    }

    fn new_post() -> Value {
        json!({
            "title": "First",
            "content": "Hello world",
            "author": "Jane Doe",
            "date": "2024-01-15"
        })
    }

    #[tokio::test]
    async fn listing_an_empty_store_is_not_found() {
        let dir = TempDir::new().unwrap();
        let (app, _) = test_app(&dir);

        let (status, body) = send(&app, Method::GET, "/api/posts", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn create_assigns_smallest_free_id_and_zero_likes() {
        let dir = TempDir::new().unwrap();
        let (app, repo) = test_app(&dir);
        seed(&repo, &[(2, "Existing", "John", "2024-01-01")]);

        let (status, body) = send(&app, Method::POST, "/api/posts", Some(new_post())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);
        assert_eq!(body["likes"], 0);
        assert_eq!(body["title"], "First");

        let stored = repo.load();
        let created = stored.iter().find(|p| p.id == 1).unwrap();
        assert_eq!(created.author, "Jane Doe");
        assert_eq!(created.likes, 0);
    }

    #[tokio::test]
    async fn create_reports_missing_fields() {
        let dir = TempDir::new().unwrap();
        let (app, repo) = test_app(&dir);

        let body = json!({ "author": "Jane", "date": "2024-01-15", "title": "" });
        let (status, body) = send(&app, Method::POST, "/api/posts", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "MISSING_FIELDS");
        assert_eq!(body["error"]["message"], "title, content are necessary.");
        assert!(repo.load().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_invalid_date() {
        let dir = TempDir::new().unwrap();
        let (app, repo) = test_app(&dir);
        let mut post = new_post();
        post["date"] = json!("2024-13-40");

        let (status, body) = send(&app, Method::POST, "/api/posts", Some(post)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_DATE");
        assert!(repo.load().is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request() {
        let dir = TempDir::new().unwrap();
        let (app, _) = test_app(&dir);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/posts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_sorts_by_date() {
        let dir = TempDir::new().unwrap();
        let (app, repo) = test_app(&dir);
        seed(
            &repo,
            &[
                (1, "March", "Jane", "2024-03-01"),
                (2, "January", "John", "2024-01-15"),
            ],
        );

        let (status, body) = send(&app, Method::GET, "/api/posts?sort=date&direction=asc", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["date"], "2024-01-15");
        assert_eq!(body[1]["date"], "2024-03-01");

        let (_, body) = send(&app, Method::GET, "/api/posts?sort=date&direction=descending", None).await;
        assert_eq!(body[0]["id"], 1);

        let (_, body) = send(&app, Method::GET, "/api/posts", None).await;
        assert_eq!(body[0]["id"], 1);
    }

    #[tokio::test]
    async fn list_rejects_unknown_sort_parameters() {
        let dir = TempDir::new().unwrap();
        let (app, repo) = test_app(&dir);
        seed(&repo, &[(1, "Only", "Jane", "2024-03-01")]);

        let (status, body) = send(&app, Method::GET, "/api/posts?sort=likes&direction=asc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_SORT");

        let (status, body) = send(&app, Method::GET, "/api/posts?sort=title&direction=up", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_DIRECTION");
    }

    #[tokio::test]
    async fn delete_removes_the_post() {
        let dir = TempDir::new().unwrap();
        let (app, repo) = test_app(&dir);
        seed(&repo, &[(1, "a", "Jane", "2024-01-01"), (2, "b", "John", "2024-01-02")]);

        let (status, body) = send(&app, Method::DELETE, "/api/posts/1", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Post with id 1 has been deleted successfully.");
        assert_eq!(repo.load().len(), 1);
    }

    #[tokio::test]
    async fn delete_of_unknown_id_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let (app, repo) = test_app(&dir);
        seed(&repo, &[(1, "a", "Jane", "2024-01-01")]);

        let (status, _) = send(&app, Method::DELETE, "/api/posts/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::DELETE, "/api/posts/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_POST_ID");

        assert_eq!(repo.load().len(), 1);
    }

    #[tokio::test]
    async fn update_replaces_supplied_fields() {
        let dir = TempDir::new().unwrap();
        let (app, repo) = test_app(&dir);
        seed(&repo, &[(1, "Old", "Jane", "2024-01-01")]);

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/posts/1",
            Some(json!({ "title": "New", "date": "2024-02-02" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "New");
        assert_eq!(body["author"], "Jane");
        let stored = &repo.load()[0];
        assert_eq!((stored.title.as_str(), stored.date.as_str()), ("New", "2024-02-02"));
    }

    #[tokio::test]
    async fn update_with_invalid_date_leaves_record_unchanged() {
        let dir = TempDir::new().unwrap();
        let (app, repo) = test_app(&dir);
        seed(&repo, &[(1, "Old", "Jane", "2024-01-01")]);
        let before = repo.load();

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/posts/1",
            Some(json!({ "title": "New", "date": "2024-13-40" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_DATE");
        assert_eq!(repo.load(), before);
    }

    #[tokio::test]
    async fn update_error_cases() {
        let dir = TempDir::new().unwrap();
        let (app, repo) = test_app(&dir);

        let (status, _) = send(&app, Method::PUT, "/api/posts/1", Some(json!({ "title": "x" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        seed(&repo, &[(1, "Old", "Jane", "2024-01-01")]);
        let (status, _) = send(&app, Method::PUT, "/api/posts/5", Some(json!({ "title": "x" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::PUT, "/api/posts/1", Some(json!({ "title": "" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "NOTHING_TO_UPDATE");
    }

    #[tokio::test]
    async fn like_increments_only_likes() {
        let dir = TempDir::new().unwrap();
        let (app, repo) = test_app(&dir);
        seed(&repo, &[(1, "Liked", "Jane", "2024-01-01")]);
        let before = repo.load()[0].clone();

        let (status, body) = send(&app, Method::POST, "/api/posts/1/like", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["likes"], 1);

        let (_, body) = send(&app, Method::POST, "/api/posts/1/like", None).await;
        assert_eq!(body["likes"], 2);

        let after = repo.load()[0].clone();
        assert_eq!(Post { likes: before.likes, ..after }, before);

        let (status, _) = send(&app, Method::POST, "/api/posts/3/like", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // A stored record with an empty title makes every later write refuse.
    #[tokio::test]
    async fn refused_save_is_an_internal_error_and_keeps_the_file() {
        let dir = TempDir::new().unwrap();
        let (app, repo) = test_app(&dir);
        let stored = json!([
            { "id": 1, "title": "", "content": "c", "author": "Jane", "date": "2024-01-01", "likes": 0 },
            { "id": 2, "title": "Fine", "content": "c", "author": "John", "date": "2024-01-02", "likes": 0 }
        ]);
        fs::write(repo.path(), stored.to_string()).unwrap();
        let before = fs::read(repo.path()).unwrap();

        let (status, body) = send(&app, Method::POST, "/api/posts/2/like", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
        assert_eq!(fs::read(repo.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn search_matches_author_substring_case_insensitively() {
        let dir = TempDir::new().unwrap();
        let (app, repo) = test_app(&dir);
        seed(
            &repo,
            &[(1, "Rust", "Jane Doe", "2024-01-01"), (2, "Go", "John Roe", "2024-02-01")],
        );

        let (status, body) = send(&app, Method::GET, "/api/posts/search?author=jane", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["author"], "Jane Doe");

        let (_, body) = send(&app, Method::GET, "/api/posts/search", None).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let dir = TempDir::new().unwrap();
        let (app, _) = test_app(&dir);

        let (status, body) = send(&app, Method::GET, "/nope", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
