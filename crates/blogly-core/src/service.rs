//! The data-access handle used by the boundary layer.
//!
//! `BlogService` validates inputs, turns missing rows into
//! [`DomainError::NotFound`] and delegates persistence to the repository
//! ports. Every mutating call maps to exactly one repository transaction.

use std::sync::Arc;

use crate::domain::{
    Id, NewPost, NewTag, NewUser, Post, PostChanges, Tag, TagChanges, TaggedPost, User,
    UserChanges, unique_ids,
};
use crate::error::DomainError;
use crate::ports::{PostRepository, TagRepository, UserRepository};

/// Number of posts shown on the homepage when no limit is configured.
pub const DEFAULT_RECENT_POSTS: u64 = 5;

/// Blog operations over users, posts and tags.
#[derive(Clone)]
pub struct BlogService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    tags: Arc<dyn TagRepository>,
}

impl BlogService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        tags: Arc<dyn TagRepository>,
    ) -> Self {
        Self { users, posts, tags }
    }

    // Users

    pub async fn create_user(&self, user: NewUser) -> Result<User, DomainError> {
        let user = user.validate()?;
        let user = self.users.create(user).await?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    pub async fn get_user(&self, id: Id) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "user",
                id,
            })
    }

    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.find_all().await?)
    }

    pub async fn update_user(&self, id: Id, changes: UserChanges) -> Result<User, DomainError> {
        let changes = changes.validate()?;
        let user = self.users.update(id, changes).await?;
        tracing::info!(user_id = id, "User updated");
        Ok(user)
    }

    pub async fn delete_user(&self, id: Id) -> Result<(), DomainError> {
        self.users.delete(id).await?;
        tracing::info!(user_id = id, "User deleted with their posts");
        Ok(())
    }

    // Posts

    /// Create a post for an existing user and link it to `tag_ids`.
    pub async fn create_post(&self, post: NewPost, tag_ids: Vec<Id>) -> Result<Post, DomainError> {
        let post = post.validate()?;
        let author = post.posted_by;
        self.ensure_author(author).await?;

        let post = match self.posts.create(post, unique_ids(tag_ids)).await {
            Ok(post) => post,
            Err(err) => {
                // The author may have been deleted after the check above.
                self.ensure_author(author).await?;
                return Err(err.into());
            }
        };
        tracing::info!(post_id = post.id, user_id = post.posted_by, "Post created");
        Ok(post)
    }

    async fn ensure_author(&self, user_id: Id) -> Result<(), DomainError> {
        match self.users.find_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::Validation(format!(
                "posted_by refers to unknown user {user_id}"
            ))),
        }
    }

    pub async fn get_post(&self, id: Id) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "post",
                id,
            })
    }

    pub async fn list_recent_posts(&self, limit: u64) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_recent(limit).await?)
    }

    /// Recent posts paired with their tags, loaded with a single link query.
    pub async fn recent_posts_with_tags(&self, limit: u64) -> Result<Vec<TaggedPost>, DomainError> {
        let posts = self.posts.find_recent(limit).await?;
        let ids: Vec<Id> = posts.iter().map(|p| p.id).collect();
        let mut tags = self.posts.find_tags_for_posts(&ids).await?;

        Ok(posts
            .into_iter()
            .map(|post| TaggedPost {
                tags: tags.remove(&post.id).unwrap_or_default(),
                post,
            })
            .collect())
    }

    pub async fn list_posts_for_user(&self, user_id: Id) -> Result<Vec<Post>, DomainError> {
        self.get_user(user_id).await?;
        Ok(self.posts.find_by_user_id(user_id).await?)
    }

    /// Partial update; `Some(tag_ids)` replaces the whole tag set.
    pub async fn update_post(
        &self,
        id: Id,
        changes: PostChanges,
        tag_ids: Option<Vec<Id>>,
    ) -> Result<Post, DomainError> {
        let post = self
            .posts
            .update(id, changes.normalized(), tag_ids.map(unique_ids))
            .await?;
        tracing::info!(post_id = id, "Post updated");
        Ok(post)
    }

    pub async fn delete_post(&self, id: Id) -> Result<(), DomainError> {
        self.posts.delete(id).await?;
        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }

    // Tags

    pub async fn create_tag(&self, tag: NewTag) -> Result<Tag, DomainError> {
        let tag = self.tags.create(tag.validate()?).await?;
        tracing::info!(tag_id = tag.id, name = %tag.name, "Tag created");
        Ok(tag)
    }

    pub async fn get_tag(&self, id: Id) -> Result<Tag, DomainError> {
        self.tags
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "tag",
                id,
            })
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>, DomainError> {
        Ok(self.tags.find_all().await?)
    }

    /// Rename a tag; `Some(post_ids)` replaces the whole post set.
    pub async fn update_tag(
        &self,
        id: Id,
        changes: TagChanges,
        post_ids: Option<Vec<Id>>,
    ) -> Result<Tag, DomainError> {
        let tag = self
            .tags
            .update(id, changes.normalized(), post_ids.map(unique_ids))
            .await?;
        tracing::info!(tag_id = id, "Tag updated");
        Ok(tag)
    }

    pub async fn delete_tag(&self, id: Id) -> Result<(), DomainError> {
        self.tags.delete(id).await?;
        tracing::info!(tag_id = id, "Tag deleted");
        Ok(())
    }

    // Associations

    pub async fn list_tags_for_post(&self, post_id: Id) -> Result<Vec<Tag>, DomainError> {
        self.get_post(post_id).await?;
        Ok(self.posts.find_tags(post_id).await?)
    }

    pub async fn list_posts_for_tag(&self, tag_id: Id) -> Result<Vec<Post>, DomainError> {
        self.get_tag(tag_id).await?;
        Ok(self.tags.find_posts(tag_id).await?)
    }
}
