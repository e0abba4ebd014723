/*
 * Responsibility
 * - Posts の request/response DTO
 * - presence / date format の validation (storage に渡る前に弾く)
 */
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    error::AppError,
    repos::post_repo::Post,
    services::{
        post_date::parse_post_date,
        post_query::{SearchQuery, SortDirection, SortField},
    },
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PostInputError {
    #[error("{} are necessary.", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("Date format is invalid. please use format \"YYYY-MM-DD\"")]
    InvalidDate,
    #[error("no valid field to update, supply one of title, content, author, date")]
    NothingToUpdate,
}

// Fields are optional so that absence surfaces as a validation message
// instead of a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
}

impl CreatePostRequest {
    /// Presence first, then date format.
    pub fn validate(&self) -> Result<(), PostInputError> {
        let missing: Vec<&'static str> = [
            ("title", &self.title),
            ("content", &self.content),
            ("author", &self.author),
            ("date", &self.date),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect();
        if !missing.is_empty() {
            return Err(PostInputError::Missing(missing));
        }

        if let Some(date) = &self.date
            && parse_post_date(date).is_none()
        {
            return Err(PostInputError::InvalidDate);
        }

        Ok(())
    }

    /// New posts always start with zero likes.
    pub fn into_post(self, id: u64) -> Post {
        Post {
            id,
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            date: self.date.unwrap_or_default(),
            likes: 0,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
}

impl UpdatePostRequest {
    /// Returns `current` with every non-empty supplied field replaced.
    pub fn apply(self, current: &Post) -> Result<Post, PostInputError> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let title = non_empty(self.title);
        let content = non_empty(self.content);
        let author = non_empty(self.author);
        let date = non_empty(self.date);

        if title.is_none() && content.is_none() && author.is_none() && date.is_none() {
            return Err(PostInputError::NothingToUpdate);
        }
        if let Some(date) = &date
            && parse_post_date(date).is_none()
        {
            return Err(PostInputError::InvalidDate);
        }

        let mut updated = current.clone();
        if let Some(title) = title {
            updated.title = title;
        }
        if let Some(content) = content {
            updated.content = content;
        }
        if let Some(author) = author {
            updated.author = author;
        }
        if let Some(date) = date {
            updated.date = date;
        }
        Ok(updated)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    pub sort: Option<String>,
    pub direction: Option<String>,
}

impl ListPostsQuery {
    /// `None` when neither parameter is given; both must be valid otherwise.
    pub fn order(&self) -> Result<Option<(SortField, SortDirection)>, AppError> {
        let sort = self.sort.as_deref().filter(|s| !s.is_empty());
        let direction = self.direction.as_deref().filter(|s| !s.is_empty());
        if sort.is_none() && direction.is_none() {
            return Ok(None);
        }

        let field = sort.and_then(|s| s.parse::<SortField>().ok()).ok_or_else(|| {
            AppError::bad_request(
                "INVALID_SORT",
                format!("wrong input for sort: {}.", sort.unwrap_or("")),
            )
        })?;
        let direction = direction
            .and_then(|d| d.parse::<SortDirection>().ok())
            .ok_or_else(|| {
                AppError::bad_request(
                    "INVALID_DIRECTION",
                    format!("wrong input for direction: {}.", direction.unwrap_or("")),
                )
            })?;

        Ok(Some((field, direction)))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchPostsQuery {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
}

impl From<SearchPostsQuery> for SearchQuery {
    fn from(q: SearchPostsQuery) -> Self {
        SearchQuery {
            title: q.title,
            content: q.content,
            author: q.author,
            date: q.date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub date: String,
    pub likes: u64,
}

impl From<Post> for PostResponse {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            title: p.title,
            content: p.content,
            author: p.author,
            date: p.date,
            likes: p.likes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeletePostResponse {
    pub message: String,
}
