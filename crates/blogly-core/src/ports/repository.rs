use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::{
    Id, NewPost, NewTag, NewUser, Post, PostChanges, Tag, TagChanges, User, UserChanges,
};
use crate::error::RepoError;

/// Generic repository trait defining the reads and deletes every table shares.
#[async_trait]
pub trait BaseRepository<T>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: Id) -> Result<Option<T>, RepoError>;

    /// List every entity in the repository's natural order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Delete an entity by its ID, letting the schema cascade to dependents.
    async fn delete(&self, id: Id) -> Result<(), RepoError>;
}

/// User repository.
#[async_trait]
pub trait UserRepository: BaseRepository<User> {
    /// Insert an already validated user.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;

    /// Overwrite the supplied fields inside one transaction.
    async fn update(&self, id: Id, changes: UserChanges) -> Result<User, RepoError>;
}

/// Post repository with the post-side association queries.
#[async_trait]
pub trait PostRepository: BaseRepository<Post> {
    /// Insert a post and link it to `tag_ids` atomically.
    async fn create(&self, post: NewPost, tag_ids: Vec<Id>) -> Result<Post, RepoError>;

    /// Apply `changes` and, when given, replace the whole tag set atomically.
    async fn update(
        &self,
        id: Id,
        changes: PostChanges,
        tag_ids: Option<Vec<Id>>,
    ) -> Result<Post, RepoError>;

    /// Newest posts first, ties broken by ascending id.
    async fn find_recent(&self, limit: u64) -> Result<Vec<Post>, RepoError>;

    async fn find_by_user_id(&self, user_id: Id) -> Result<Vec<Post>, RepoError>;

    /// Tags linked to a single post.
    async fn find_tags(&self, post_id: Id) -> Result<Vec<Tag>, RepoError>;

    /// Tags for several posts at once, keyed by post id.
    async fn find_tags_for_posts(
        &self,
        post_ids: &[Id],
    ) -> Result<BTreeMap<Id, Vec<Tag>>, RepoError>;
}

/// Tag repository with the tag-side association queries.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag> {
    async fn create(&self, tag: NewTag) -> Result<Tag, RepoError>;

    /// Rename and, when given, replace the whole post set atomically.
    async fn update(
        &self,
        id: Id,
        changes: TagChanges,
        post_ids: Option<Vec<Id>>,
    ) -> Result<Tag, RepoError>;

    /// Posts linked to a tag, newest first.
    async fn find_posts(&self, tag_id: Id) -> Result<Vec<Post>, RepoError>;
}
