/*
 * Responsibility
 * - GET /posts の並び替え (sort / direction)
 * - GET /posts/search の絞り込み
 * - 新規 post の id 採番
 * - all linear scans over the loaded collection
 */
use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::repos::post_repo::Post;
use crate::services::post_date::parse_post_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Content,
    Author,
    Date,
}

impl FromStr for SortField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "content" => Ok(Self::Content),
            "author" => Ok(Self::Author),
            "date" => Ok(Self::Date),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = ();

    // Both the short and the long vocabulary are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(()),
        }
    }
}

/// Smallest id in `1..=len+1` that no post uses.
pub fn next_free_id(posts: &[Post]) -> u64 {
    (1..=posts.len() as u64 + 1)
        .find(|candidate| posts.iter().all(|p| p.id != *candidate))
        .unwrap_or(posts.len() as u64 + 1)
}

/// Stable sort by `field`. A date sort leaves the input order untouched when
/// any stored date does not parse.
pub fn sort_posts(mut posts: Vec<Post>, field: SortField, direction: SortDirection) -> Vec<Post> {
    let orient = |ord: Ordering| match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    };

    match field {
        SortField::Title => posts.sort_by(|a, b| orient(a.title.cmp(&b.title))),
        SortField::Content => posts.sort_by(|a, b| orient(a.content.cmp(&b.content))),
        SortField::Author => posts.sort_by(|a, b| orient(a.author.cmp(&b.author))),
        SortField::Date => {
            let dates: Option<Vec<NaiveDate>> =
                posts.iter().map(|p| parse_post_date(&p.date)).collect();
            let Some(dates) = dates else {
                tracing::warn!("unparseable post date, returning posts unsorted");
                return posts;
            };

            let mut keyed: Vec<(NaiveDate, Post)> = dates.into_iter().zip(posts).collect();
            keyed.sort_by(|(a, _), (b, _)| orient(a.cmp(b)));
            return keyed.into_iter().map(|(_, post)| post).collect();
        }
    }

    posts
}

#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
}

impl SearchQuery {
    fn needles(&self) -> [Option<String>; 4] {
        [&self.title, &self.content, &self.author, &self.date].map(|term| {
            term.as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_lowercase)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.needles().iter().all(Option::is_none)
    }
}

/// Keeps posts where any given term is a case-insensitive substring of the
/// matching field. No terms keeps everything.
pub fn search_posts(posts: Vec<Post>, query: &SearchQuery) -> Vec<Post> {
    if query.is_empty() {
        return posts;
    }

    let needles = query.needles();
    posts
        .into_iter()
        .filter(|post| {
            let haystacks = [&post.title, &post.content, &post.author, &post.date];
            needles
                .iter()
                .zip(haystacks)
                .any(|(needle, hay)| match needle {
                    Some(needle) => hay.to_lowercase().contains(needle.as_str()),
                    None => false,
                })
        })
        .collect()
}
