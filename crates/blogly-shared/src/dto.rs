//! Data Transfer Objects - request/response types for the API.
//!
//! Edit requests carry optional fields: an absent or blank field keeps the
//! stored value. Id lists, when present, replace the whole association set.

use serde::{Deserialize, Serialize};

/// Request to create a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub profile_pic: Option<String>,
}

/// Request to edit a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_pic: Option<String>,
}

/// Request to create a post for a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tag_ids: Vec<i32>,
}

/// Request to edit a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tag_ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
}

/// Request to rename a tag and optionally re-link its posts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTagRequest {
    pub name: Option<String>,
    pub post_ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub profile_pic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub posted_by: i32,
    /// RFC 3339 timestamp in UTC.
    pub posted_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: i32,
    pub name: String,
}

/// A post with the tags linked to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub tags: Vec<TagResponse>,
}

/// A tag with the posts linked to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagDetailResponse {
    #[serde(flatten)]
    pub tag: TagResponse,
    pub posts: Vec<PostResponse>,
}

/// Homepage: the most recent posts with their tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeResponse {
    pub posts: Vec<PostDetailResponse>,
}
