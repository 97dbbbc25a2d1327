//! User handlers, including the per-user post routes.

use actix_web::{HttpResponse, web};

use blogly_core::domain::{NewPost, NewUser, UserChanges};
use blogly_shared::dto::{CreatePostRequest, CreateUserRequest, UpdateUserRequest};

use super::convert;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/users
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.blog.list_users().await?;
    Ok(HttpResponse::Ok().json(users.into_iter().map(convert::user).collect::<Vec<_>>()))
}

/// POST /api/users
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user = state
        .blog
        .create_user(NewUser {
            first_name: req.first_name,
            last_name: req.last_name,
            profile_pic: req.profile_pic,
        })
        .await?;

    Ok(HttpResponse::Created().json(convert::user(user)))
}

/// GET /api/users/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let user = state.blog.get_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(convert::user(user)))
}

/// PATCH /api/users/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user = state
        .blog
        .update_user(
            path.into_inner(),
            UserChanges {
                first_name: req.first_name,
                last_name: req.last_name,
                profile_pic: req.profile_pic,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(convert::user(user)))
}

/// DELETE /api/users/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    state.blog.delete_user(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/users/{id}/posts
pub async fn posts(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let posts = state.blog.list_posts_for_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(posts.into_iter().map(convert::post).collect::<Vec<_>>()))
}

/// POST /api/users/{id}/posts
pub async fn create_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .blog
        .create_post(
            NewPost::new(req.title, req.content, path.into_inner()),
            req.tag_ids,
        )
        .await?;
    let tags = state.blog.list_tags_for_post(post.id).await?;

    Ok(HttpResponse::Created().json(convert::post_detail(post, tags)))
}
