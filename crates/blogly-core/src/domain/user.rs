use serde::{Deserialize, Serialize};

use super::{Id, non_blank};
use crate::error::DomainError;

/// Profile picture used when a user does not supply one.
pub const DEFAULT_PROFILE_PIC: &str =
    "https://twirpz.files.wordpress.com/2015/06/twitter-avi-gender-balanced-figure.png?w=640";

/// Maximum length, in characters, of a first or last name.
pub const NAME_MAX_LEN: usize = 50;

/// User entity - an author of posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    pub profile_pic: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Fields for a user that does not exist yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub profile_pic: Option<String>,
}

impl NewUser {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            profile_pic: None,
        }
    }

    pub fn with_profile_pic(mut self, url: impl Into<String>) -> Self {
        self.profile_pic = Some(url.into());
        self
    }

    /// Trim every field, check the required ones and fill in the default picture.
    pub fn validate(self) -> Result<Self, DomainError> {
        let first_name = required_name("first_name", self.first_name)?;
        let last_name = required_name("last_name", self.last_name)?;
        let profile_pic =
            non_blank(self.profile_pic).unwrap_or_else(|| DEFAULT_PROFILE_PIC.to_string());

        Ok(Self {
            first_name,
            last_name,
            profile_pic: Some(profile_pic),
        })
    }
}

/// Partial update of a user. `None` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_pic: Option<String>,
}

impl UserChanges {
    /// Drop blank fields and check the length of the remaining names.
    pub fn validate(self) -> Result<Self, DomainError> {
        let first_name = non_blank(self.first_name)
            .map(|name| required_name("first_name", name))
            .transpose()?;
        let last_name = non_blank(self.last_name)
            .map(|name| required_name("last_name", name))
            .transpose()?;

        Ok(Self {
            first_name,
            last_name,
            profile_pic: non_blank(self.profile_pic),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.profile_pic.is_none()
    }
}

fn required_name(field: &str, value: String) -> Result<String, DomainError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    if value.chars().count() > NAME_MAX_LEN {
        return Err(DomainError::Validation(format!(
            "{field} must be at most {NAME_MAX_LEN} characters"
        )));
    }
    Ok(value)
}
