//! Posts and their comments.
//!
//! Held in a process-local map keyed by post id. Comments live with their
//! post, so appending under the entry lock keeps them in creation order.
//! Listings are ordered by a board-wide sequence number rather than by
//! timestamp, which may tie under a manual clock.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::auth::Clock;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;

/// Create-post payload. The author is never taken from the body.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub post_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub content: String,
    /// Attachments are not accepted; kept for clients that read the field.
    pub file_url: Option<String>,
    pub tags: Vec<String>,
    pub created_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
    pub post_id: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub comment_id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub created_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

struct StoredPost {
    seq: u64,
    post: Post,
    comments: Vec<Comment>,
}

pub struct PostBoard {
    posts: DashMap<Uuid, StoredPost>,
    next_seq: AtomicU64,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for PostBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostBoard")
            .field("posts", &self.posts.len())
            .field("clock", &self.clock)
            .finish()
    }
}

impl PostBoard {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            posts: DashMap::new(),
            next_seq: AtomicU64::new(0),
            clock,
        }
    }

    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::from(self.clock.now())
    }

    pub fn create_post(&self, new_post: NewPost, created_by: &str) -> Result<Post, AppError> {
        let kind = required(&new_post.kind, "Post type")?;
        let title = required(&new_post.title, "Title")?;
        let content = required(&new_post.content, "Content")?;

        let post = Post {
            post_id: Uuid::new_v4(),
            kind,
            title,
            content,
            file_url: None,
            tags: new_post
                .tags
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            created_by: created_by.to_string(),
            created_at: self.now(),
        };

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.posts.insert(
            post.post_id,
            StoredPost {
                seq,
                post: post.clone(),
                comments: Vec::new(),
            },
        );

        info!(post_id = %post.post_id, created_by = %Redacted(created_by), "Post created");
        Ok(post)
    }

    /// Posts written by `identity`, oldest first.
    pub fn posts_by(&self, identity: &str) -> Vec<Post> {
        self.collect(|post| post.created_by == identity)
    }

    /// Every post, oldest first.
    pub fn list(&self) -> Vec<Post> {
        self.collect(|_| true)
    }

    fn collect(&self, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
        let mut found: Vec<(u64, Post)> = self
            .posts
            .iter()
            .filter(|entry| keep(&entry.post))
            .map(|entry| (entry.seq, entry.post.clone()))
            .collect();
        found.sort_by_key(|(seq, _)| *seq);
        found.into_iter().map(|(_, post)| post).collect()
    }

    pub fn add_comment(
        &self,
        new_comment: NewComment,
        created_by: &str,
    ) -> Result<Comment, AppError> {
        let content = required(&new_comment.content, "Comment content")?;
        let post_id = parse_post_id(&new_comment.post_id)?;

        let mut stored = self.posts.get_mut(&post_id).ok_or_else(post_not_found)?;

        let comment = Comment {
            comment_id: Uuid::new_v4(),
            post_id,
            content,
            created_by: created_by.to_string(),
            created_at: self.now(),
        };
        stored.comments.push(comment.clone());

        Ok(comment)
    }

    /// Comments on a post, oldest first.
    pub fn comments_for(&self, post_id: &str) -> Result<Vec<Comment>, AppError> {
        let post_id = parse_post_id(post_id)?;
        self.posts
            .get(&post_id)
            .map(|stored| stored.comments.clone())
            .ok_or_else(post_not_found)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

fn required(value: &str, field: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::bad_request(
            ErrorCode::ValidationError,
            format!("{field} cannot be empty"),
        ));
    }
    Ok(value.to_string())
}

/// An id that is not a UUID cannot name a stored post.
fn parse_post_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| post_not_found())
}

fn post_not_found() -> AppError {
    AppError::not_found(ErrorCode::PostNotFound, "Post not found")
}
