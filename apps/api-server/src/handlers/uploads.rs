//! Stored image retrieval.

use actix_web::{HttpResponse, web};
use recyclehub_core::domain::content_type_for;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /uploads/{filename}
pub async fn serve_upload(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let filename = path.into_inner();
    let bytes = state.listings.image(&filename).await?;

    Ok(HttpResponse::Ok()
        .content_type(content_type_for(&filename))
        .body(bytes))
}
