//! SQL repository implementations.

use std::collections::BTreeMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};

use blogly_core::domain::{
    DEFAULT_PROFILE_PIC, Id, NewPost, NewTag, NewUser, Post, PostChanges, Tag, TagChanges, User,
    UserChanges,
};
use blogly_core::error::RepoError;
use blogly_core::ports::{PostRepository, TagRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::links::{LinkAnchor, replace_links};
use super::sql_base::{RepoEntity, SqlBaseRepository, map_db_err};

/// SQL user repository.
pub type SqlUserRepository = SqlBaseRepository<UserEntity>;

/// SQL post repository.
pub type SqlPostRepository = SqlBaseRepository<PostEntity>;

/// SQL tag repository.
pub type SqlTagRepository = SqlBaseRepository<TagEntity>;

impl RepoEntity for UserEntity {
    const LABEL: &'static str = "user";

    fn ordered(select: Select<Self>) -> Select<Self> {
        select.order_by_asc(user::Column::Id)
    }
}

impl RepoEntity for PostEntity {
    const LABEL: &'static str = "post";

    fn ordered(select: Select<Self>) -> Select<Self> {
        newest_first(select)
    }
}

impl RepoEntity for TagEntity {
    const LABEL: &'static str = "tag";

    fn ordered(select: Select<Self>) -> Select<Self> {
        select.order_by_asc(tag::Column::Name)
    }
}

/// Most recent first; equal timestamps fall back to insertion order.
fn newest_first(select: Select<PostEntity>) -> Select<PostEntity> {
    select
        .order_by_desc(post::Column::PostedAt)
        .order_by_asc(post::Column::Id)
}

async fn begin<E>(repo: &SqlBaseRepository<E>) -> Result<DatabaseTransaction, RepoError>
where
    E: EntityTrait,
{
    repo.conn().begin().await.map_err(map_db_err)
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let model = user::ActiveModel {
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            profile_pic: Set(user
                .profile_pic
                .unwrap_or_else(|| DEFAULT_PROFILE_PIC.to_string())),
            ..Default::default()
        }
        .insert(self.conn())
        .await
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, id: Id, changes: UserChanges) -> Result<User, RepoError> {
        let txn = begin(self).await?;
        let existing = UserEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound {
                entity_type: "user",
                id,
            })?;

        let mut active = existing.clone().into_active_model();
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(profile_pic) = changes.profile_pic {
            active.profile_pic = Set(profile_pic);
        }

        let model = if active.is_changed() {
            active.update(&txn).await.map_err(map_db_err)?
        } else {
            existing
        };
        txn.commit().await.map_err(map_db_err)?;

        Ok(model.into())
    }
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn create(&self, post: NewPost, tag_ids: Vec<Id>) -> Result<Post, RepoError> {
        let txn = begin(self).await?;

        let mut active = post::ActiveModel {
            title: Set(post.title),
            content: Set(post.content),
            posted_by: Set(post.posted_by),
            ..Default::default()
        };
        if let Some(posted_at) = post.posted_at {
            active.posted_at = Set(posted_at);
        }
        let model = active.insert(&txn).await.map_err(map_db_err)?;

        replace_links(&txn, LinkAnchor::Post(model.id), &tag_ids).await?;
        txn.commit().await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(
        &self,
        id: Id,
        changes: PostChanges,
        tag_ids: Option<Vec<Id>>,
    ) -> Result<Post, RepoError> {
        let txn = begin(self).await?;
        let existing = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound {
                entity_type: "post",
                id,
            })?;

        let mut active = existing.clone().into_active_model();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(content) = changes.content {
            active.content = Set(content);
        }

        let model = if active.is_changed() {
            active.update(&txn).await.map_err(map_db_err)?
        } else {
            existing
        };

        if let Some(tag_ids) = tag_ids {
            replace_links(&txn, LinkAnchor::Post(id), &tag_ids).await?;
        }
        txn.commit().await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn find_recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let result = newest_first(PostEntity::find())
            .limit(limit)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_user_id(&self, user_id: Id) -> Result<Vec<Post>, RepoError> {
        let result = newest_first(PostEntity::find())
            .filter(post::Column::PostedBy.eq(user_id))
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_tags(&self, post_id: Id) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .inner_join(PostTagEntity)
            .filter(post_tag::Column::PostId.eq(post_id))
            .order_by_asc(tag::Column::Name)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_tags_for_posts(
        &self,
        post_ids: &[Id],
    ) -> Result<BTreeMap<Id, Vec<Tag>>, RepoError> {
        let mut by_post: BTreeMap<Id, Vec<Tag>> = BTreeMap::new();
        if post_ids.is_empty() {
            return Ok(by_post);
        }

        let rows = PostTagEntity::find()
            .filter(post_tag::Column::PostId.is_in(post_ids.iter().copied()))
            .find_also_related(TagEntity)
            .order_by_asc(tag::Column::Name)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        for (link, tag) in rows {
            if let Some(tag) = tag {
                by_post.entry(link.post_id).or_default().push(tag.into());
            }
        }

        Ok(by_post)
    }
}

#[async_trait]
impl TagRepository for SqlTagRepository {
    async fn create(&self, tag: NewTag) -> Result<Tag, RepoError> {
        let name = tag.name;
        let model = tag::ActiveModel {
            name: Set(name.clone()),
            ..Default::default()
        }
        .insert(self.conn())
        .await
        .map_err(|e| duplicate_name(map_db_err(e), &name))?;

        Ok(model.into())
    }

    async fn update(
        &self,
        id: Id,
        changes: TagChanges,
        post_ids: Option<Vec<Id>>,
    ) -> Result<Tag, RepoError> {
        let txn = begin(self).await?;
        let existing = TagEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound {
                entity_type: "tag",
                id,
            })?;

        let model = match changes.name {
            Some(name) if name != existing.name => {
                let mut active = existing.into_active_model();
                active.name = Set(name.clone());
                active
                    .update(&txn)
                    .await
                    .map_err(|e| duplicate_name(map_db_err(e), &name))?
            }
            _ => existing,
        };

        if let Some(post_ids) = post_ids {
            replace_links(&txn, LinkAnchor::Tag(id), &post_ids).await?;
        }
        txn.commit().await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn find_posts(&self, tag_id: Id) -> Result<Vec<Post>, RepoError> {
        let result = newest_first(PostEntity::find())
            .inner_join(PostTagEntity)
            .filter(post_tag::Column::TagId.eq(tag_id))
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

fn duplicate_name(err: RepoError, name: &str) -> RepoError {
    match err {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!("tag '{name}' already exists")),
        other => other,
    }
}
