//! Post handlers.

use actix_web::{HttpResponse, web};

use blogly_core::domain::PostChanges;
use blogly_shared::dto::UpdatePostRequest;

use super::convert;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state.blog.get_post(id).await?;
    let tags = state.blog.list_tags_for_post(id).await?;

    Ok(HttpResponse::Ok().json(convert::post_detail(post, tags)))
}

/// PATCH /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title,
        content: req.content,
    };

    let post = state.blog.update_post(id, changes, req.tag_ids).await?;
    let tags = state.blog.list_tags_for_post(id).await?;

    Ok(HttpResponse::Ok().json(convert::post_detail(post, tags)))
}

/// DELETE /api/posts/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    state.blog.delete_post(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
