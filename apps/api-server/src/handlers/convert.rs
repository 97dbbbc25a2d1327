//! Domain → DTO conversions.

use blogly_core::domain::{Post, Tag, TaggedPost, User};
use blogly_shared::dto::{
    PostDetailResponse, PostResponse, TagDetailResponse, TagResponse, UserResponse,
};

pub fn user(user: User) -> UserResponse {
    UserResponse {
        full_name: user.full_name(),
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        profile_pic: user.profile_pic,
    }
}

pub fn post(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        posted_by: post.posted_by,
        posted_at: post.posted_at.to_rfc3339(),
    }
}

pub fn tag(tag: Tag) -> TagResponse {
    TagResponse {
        id: tag.id,
        name: tag.name,
    }
}

pub fn post_detail(post: Post, tags: Vec<Tag>) -> PostDetailResponse {
    PostDetailResponse {
        post: self::post(post),
        tags: tags.into_iter().map(self::tag).collect(),
    }
}

pub fn tagged_post(tagged: TaggedPost) -> PostDetailResponse {
    post_detail(tagged.post, tagged.tags)
}

pub fn tag_detail(tag: Tag, posts: Vec<Post>) -> TagDetailResponse {
    TagDetailResponse {
        tag: self::tag(tag),
        posts: posts.into_iter().map(self::post).collect(),
    }
}
