/*
 * Responsibility
 * - posts CRUD over a single JSON file (the whole collection lives in it)
 * - every call re-reads the file; writes replace the whole file
 * - no locking: overlapping writers are last-write-wins
 */
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::RepoError;
use crate::services::post_date::parse_post_date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub date: String,
    pub likes: u64,
}

impl Post {
    /// Names of the text fields that are empty (or whitespace only), in field order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("content", &self.content),
            ("author", &self.author),
            ("date", &self.date),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Empty text fields, plus `date` when it is not a real `YYYY-MM-DD` day.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let mut fields = self.missing_fields();
        if !fields.contains(&"date") && parse_post_date(&self.date).is_none() {
            fields.push("date");
        }
        fields
    }

    pub fn is_valid(&self) -> bool {
        self.invalid_fields().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct PostRepo {
    path: PathBuf,
}

impl PostRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the full collection in file order.
    ///
    /// Fail-open: a missing, unreadable or corrupted file is reset to `[]` and
    /// reported as an empty collection.
    pub fn load(&self) -> Vec<Post> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str::<Vec<Post>>(&raw) {
                Ok(posts) => return posts,
                Err(e) => tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "storage file is corrupted, resetting to an empty collection"
                ),
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => tracing::info!(
                path = %self.path.display(),
                "storage file not found, creating an empty collection"
            ),
            Err(e) => tracing::error!(
                path = %self.path.display(),
                error = %e,
                "failed to read storage file"
            ),
        }

        if let Err(e) = self.write_all(&[]) {
            tracing::error!(path = %self.path.display(), error = %e, "failed to reset storage file");
        }
        Vec::new()
    }

    /// Overwrites the file with `posts`.
    ///
    /// Refuses to write (leaving the file as it was) when any record has an
    /// empty text field or a malformed date.
    pub fn save(&self, posts: &[Post]) -> Result<(), RepoError> {
        if let Some(bad) = posts.iter().find(|p| !p.is_valid()) {
            tracing::error!(
                id = bad.id,
                invalid = ?bad.invalid_fields(),
                "storage file would be corrupted, save aborted"
            );
            return Err(RepoError::InvalidRecord { id: bad.id });
        }

        self.write_all(posts)
    }

    /// Appends `post`; `Ok(None)` when a text field is empty or the date is malformed.
    pub fn create(&self, post: Post) -> Result<Option<Post>, RepoError> {
        if !post.is_valid() {
            return Ok(None);
        }

        let mut posts = self.load();
        posts.push(post.clone());
        self.save(&posts)?;
        Ok(Some(post))
    }

    /// Removes the post with `id`; `Ok(None)` when there is none.
    pub fn delete_by_id(&self, id: u64) -> Result<Option<u64>, RepoError> {
        let mut posts = self.load();
        let Some(index) = posts.iter().position(|p| p.id == id) else {
            return Ok(None);
        };

        posts.remove(index);
        self.save(&posts)?;
        Ok(Some(id))
    }

    /// Replaces the post at `index`; `Ok(None)` when out of bounds or invalid.
    pub fn update_at(&self, index: usize, post: Post) -> Result<Option<Post>, RepoError> {
        let mut posts = self.load();
        if index >= posts.len() || !post.is_valid() {
            return Ok(None);
        }

        posts[index] = post.clone();
        self.save(&posts)?;
        Ok(Some(post))
    }

    /// Increments `likes` on the post with `id` by one.
    pub fn like(&self, id: u64) -> Result<Option<Post>, RepoError> {
        let mut posts = self.load();
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        post.likes = post.likes.saturating_add(1);
        let liked = post.clone();
        self.save(&posts)?;
        Ok(Some(liked))
    }

    fn write_all(&self, posts: &[Post]) -> Result<(), RepoError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // Not atomic: a crash mid-write can truncate the file.
        fs::write(&self.path, to_pretty_json(posts)?)?;
        Ok(())
    }
}

// 4-space indentation, trailing newline
fn to_pretty_json(posts: &[Post]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    posts.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}
