//! Domain entities - the core business objects.

mod post;
mod tag;
mod user;

pub use post::{NewPost, Post, PostChanges, PostTag, TaggedPost};
pub use tag::{NewTag, Tag, TagChanges};
pub use user::{DEFAULT_PROFILE_PIC, NAME_MAX_LEN, NewUser, User, UserChanges};

/// Surrogate key shared by every table.
pub type Id = i32;

/// Trim a submitted field, treating an empty result as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Collapse an id list into a sorted set with no repeats.
pub(crate) fn unique_ids(ids: Vec<Id>) -> Vec<Id> {
    let mut ids = ids;
    ids.sort_unstable();
    ids.dedup();
    ids
}
