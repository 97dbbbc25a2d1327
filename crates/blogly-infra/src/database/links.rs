//! Replacement of the post/tag association set inside a transaction.

use std::collections::BTreeSet;

use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QuerySelect};

use blogly_core::domain::{Id, PostTag};
use blogly_core::error::RepoError;

use super::entity::{post, post_tag, tag};
use super::sql_base::map_db_err;

/// The side of the link table an edit is anchored on.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LinkAnchor {
    Post(Id),
    Tag(Id),
}

impl LinkAnchor {
    fn id(self) -> Id {
        match self {
            LinkAnchor::Post(id) | LinkAnchor::Tag(id) => id,
        }
    }

    /// `(anchor column, opposite column)`.
    fn columns(self) -> (post_tag::Column, post_tag::Column) {
        match self {
            LinkAnchor::Post(_) => (post_tag::Column::PostId, post_tag::Column::TagId),
            LinkAnchor::Tag(_) => (post_tag::Column::TagId, post_tag::Column::PostId),
        }
    }

    fn link(self, other: Id) -> PostTag {
        match self {
            LinkAnchor::Post(post_id) => PostTag {
                post_id,
                tag_id: other,
            },
            LinkAnchor::Tag(tag_id) => PostTag {
                post_id: other,
                tag_id,
            },
        }
    }
}

/// Make the anchor linked to exactly `wanted`: stale links are removed,
/// missing ones inserted, existing ones left alone.
pub(crate) async fn replace_links(
    txn: &DatabaseTransaction,
    anchor: LinkAnchor,
    wanted: &[Id],
) -> Result<(), RepoError> {
    let wanted: BTreeSet<Id> = wanted.iter().copied().collect();
    ensure_opposite_exists(txn, anchor, &wanted).await?;

    let (anchor_col, other_col) = anchor.columns();
    let current: BTreeSet<Id> = post_tag::Entity::find()
        .select_only()
        .column(other_col)
        .filter(anchor_col.eq(anchor.id()))
        .into_tuple::<Id>()
        .all(txn)
        .await
        .map_err(map_db_err)?
        .into_iter()
        .collect();

    let stale: Vec<Id> = current.difference(&wanted).copied().collect();
    let fresh: Vec<Id> = wanted.difference(&current).copied().collect();

    if !stale.is_empty() {
        post_tag::Entity::delete_many()
            .filter(anchor_col.eq(anchor.id()))
            .filter(other_col.is_in(stale.iter().copied()))
            .exec(txn)
            .await
            .map_err(map_db_err)?;
    }

    if !fresh.is_empty() {
        let links = fresh
            .iter()
            .map(|&other| post_tag::ActiveModel::from(anchor.link(other)));
        post_tag::Entity::insert_many(links)
            .exec_without_returning(txn)
            .await
            .map_err(map_db_err)?;
    }

    tracing::debug!(
        ?anchor,
        added = fresh.len(),
        removed = stale.len(),
        "Links replaced"
    );

    Ok(())
}

/// Reject ids on the opposite side that have no row.
async fn ensure_opposite_exists(
    txn: &DatabaseTransaction,
    anchor: LinkAnchor,
    ids: &BTreeSet<Id>,
) -> Result<(), RepoError> {
    if ids.is_empty() {
        return Ok(());
    }

    let (label, found) = match anchor {
        LinkAnchor::Post(_) => (
            "tag",
            tag::Entity::find()
                .select_only()
                .column(tag::Column::Id)
                .filter(tag::Column::Id.is_in(ids.iter().copied()))
                .into_tuple::<Id>()
                .all(txn)
                .await,
        ),
        LinkAnchor::Tag(_) => (
            "post",
            post::Entity::find()
                .select_only()
                .column(post::Column::Id)
                .filter(post::Column::Id.is_in(ids.iter().copied()))
                .into_tuple::<Id>()
                .all(txn)
                .await,
        ),
    };
    let found: BTreeSet<Id> = found.map_err(map_db_err)?.into_iter().collect();

    match ids.difference(&found).next() {
        Some(missing) => Err(RepoError::ForeignKey(format!(
            "{label} {missing} does not exist"
        ))),
        None => Ok(()),
    }
}
