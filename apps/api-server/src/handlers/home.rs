//! Homepage handler.

use actix_web::{HttpResponse, web};
use blogly_shared::dto::HomeResponse;

use super::convert;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/ - the most recent posts with their tags.
pub async fn home(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state
        .blog
        .recent_posts_with_tags(state.recent_posts_limit)
        .await?;

    Ok(HttpResponse::Ok().json(HomeResponse {
        posts: posts.into_iter().map(convert::tagged_post).collect(),
    }))
}
