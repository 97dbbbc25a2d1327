use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::{Id, Tag, non_blank};
use crate::error::DomainError;

/// Post entity - a blog post written by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Id,
    pub title: String,
    pub content: String,
    pub posted_by: Id,
    pub posted_at: DateTime<Utc>,
}

/// Fields for a post that does not exist yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub posted_by: Id,
    /// Defaults to the moment of creation.
    pub posted_at: Option<DateTime<Utc>>,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>, posted_by: Id) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            posted_by,
            posted_at: None,
        }
    }

    pub fn posted_at(mut self, at: DateTime<Utc>) -> Self {
        self.posted_at = Some(at);
        self
    }

    /// Check the required fields and stamp the post with its creation time.
    pub fn validate(self) -> Result<Self, DomainError> {
        let title = non_blank(Some(self.title))
            .ok_or_else(|| DomainError::Validation("title is required".to_string()))?;
        let content = non_blank(Some(self.content))
            .ok_or_else(|| DomainError::Validation("content is required".to_string()))?;

        // Postgres keeps microseconds; trimming here keeps reads equal to writes.
        let posted_at = self.posted_at.unwrap_or_else(Utc::now).trunc_subsecs(6);

        Ok(Self {
            title,
            content,
            posted_by: self.posted_by,
            posted_at: Some(posted_at),
        })
    }
}

/// Partial update of a post. `None` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostChanges {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn normalized(self) -> Self {
        Self {
            title: non_blank(self.title),
            content: non_blank(self.content),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Row of the post/tag association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostTag {
    pub post_id: Id,
    pub tag_id: Id,
}

/// A post together with its tags, as shown on the homepage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedPost {
    pub post: Post,
    pub tags: Vec<Tag>,
}
