//! Tag handlers.

use actix_web::{HttpResponse, web};

use blogly_core::domain::{NewTag, TagChanges};
use blogly_shared::dto::{CreateTagRequest, UpdateTagRequest};

use super::convert;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/tags
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags = state.blog.list_tags().await?;
    Ok(HttpResponse::Ok().json(tags.into_iter().map(convert::tag).collect::<Vec<_>>()))
}

/// POST /api/tags
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreateTagRequest>,
) -> AppResult<HttpResponse> {
    let tag = state
        .blog
        .create_tag(NewTag::new(body.into_inner().name))
        .await?;
    Ok(HttpResponse::Created().json(convert::tag(tag)))
}

/// GET /api/tags/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let tag = state.blog.get_tag(id).await?;
    let posts = state.blog.list_posts_for_tag(id).await?;

    Ok(HttpResponse::Ok().json(convert::tag_detail(tag, posts)))
}

/// PATCH /api/tags/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateTagRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let tag = state
        .blog
        .update_tag(id, TagChanges { name: req.name }, req.post_ids)
        .await?;
    let posts = state.blog.list_posts_for_tag(id).await?;

    Ok(HttpResponse::Ok().json(convert::tag_detail(tag, posts)))
}

/// DELETE /api/tags/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    state.blog.delete_tag(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
