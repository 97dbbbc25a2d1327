use serde::{Deserialize, Serialize};

use super::{Id, non_blank};
use crate::error::DomainError;

/// Tag entity - a globally unique label attached to posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Id,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTag {
    pub name: String,
}

impl NewTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(self) -> Result<Self, DomainError> {
        let name = non_blank(Some(self.name))
            .ok_or_else(|| DomainError::Validation("tag name is required".to_string()))?;
        Ok(Self { name })
    }
}

/// Rename of a tag. `None` keeps the stored name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagChanges {
    pub name: Option<String>,
}

impl TagChanges {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    pub fn normalized(self) -> Self {
        Self {
            name: non_blank(self.name),
        }
    }
}
