//! Listing handlers. Create and update accept either a JSON body or a
//! `multipart/form-data` form with an optional `image` file part.

use actix_multipart::{Field, Multipart};
use actix_web::{HttpRequest, HttpResponse, http::header, web};
use futures::StreamExt;
use recyclehub_core::domain::{ImageUpload, ListingDraft, ListingQuery};
use recyclehub_core::services::{ListingSubmission, ListingView};
use recyclehub_shared::MessageResponse;
use recyclehub_shared::dto::{ClaimedUserId, ListingRequest, ListingResponse, ListingsQuery, format_timestamp};

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const JSON_LIMIT: usize = 256 * 1024;

/// `scheme://host/uploads/` as seen by the client.
fn uploads_base(req: &HttpRequest) -> String {
    let conn = req.connection_info();
    format!("{}://{}/uploads/", conn.scheme(), conn.host())
}

fn listing_json(view: ListingView, uploads_base: &str) -> ListingResponse {
    let ListingView {
        listing,
        owner_username,
    } = view;

    ListingResponse {
        id: listing.id,
        title: listing.title,
        description: listing.description,
        location: listing.location,
        action: listing.action,
        material: listing.material,
        created_at: format_timestamp(&listing.created_at),
        image_url: listing
            .image_reference
            .map(|name| format!("{uploads_base}{name}")),
        user_id: listing.owner_id,
        username: owner_username,
    }
}

fn is_multipart(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.to_ascii_lowercase().starts_with("multipart/form-data"))
}

async fn read_json(mut payload: web::Payload) -> AppResult<ListingSubmission> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| AppError::BadRequest(e.to_string()))?;
        if body.len() + chunk.len() > JSON_LIMIT {
            return Err(AppError::BadRequest("JSON body too large".to_string()));
        }
        body.extend_from_slice(&chunk);
    }

    let request: ListingRequest = if body.iter().all(u8::is_ascii_whitespace) {
        ListingRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?
    };

    Ok(ListingSubmission {
        fields: ListingDraft {
            title: request.title,
            description: request.description,
            location: request.location,
            action: request.action,
            material: request.material,
        },
        claimed_owner: request.user_id.map(ClaimedUserId::into_text),
        image: None,
    })
}

async fn field_bytes(field: &mut Field) -> AppResult<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| AppError::BadRequest(format!("Malformed form data: {e}")))?;
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn read_multipart(req: &HttpRequest, payload: web::Payload) -> AppResult<ListingSubmission> {
    let mut form = Multipart::new(req.headers(), payload);
    let mut submission = ListingSubmission::default();

    while let Some(item) = form.next().await {
        let mut field =
            item.map_err(|e| AppError::BadRequest(format!("Malformed form data: {e}")))?;
        let Some(disposition) = field.content_disposition().cloned() else {
            continue;
        };
        let name = disposition.get_name().unwrap_or_default().to_string();
        let filename = disposition.get_filename().map(str::to_string);
        let bytes = field_bytes(&mut field).await?;

        if name == "image" {
            // A file input left empty still sends a part, with no filename.
            submission.image = filename
                .filter(|f| !f.is_empty())
                .map(|f| ImageUpload::new(f, bytes));
            continue;
        }

        let slot = match name.as_str() {
            "title" => &mut submission.fields.title,
            "description" => &mut submission.fields.description,
            "location" => &mut submission.fields.location,
            "action" => &mut submission.fields.action,
            "material" => &mut submission.fields.material,
            "user_id" => &mut submission.claimed_owner,
            _ => continue,
        };
        let text = String::from_utf8(bytes)
            .map_err(|_| AppError::BadRequest(format!("Field '{name}' is not valid UTF-8")))?;
        *slot = Some(text);
    }

    Ok(submission)
}

async fn read_submission(req: &HttpRequest, payload: web::Payload) -> AppResult<ListingSubmission> {
    if is_multipart(req) {
        read_multipart(req, payload).await
    } else {
        read_json(payload).await
    }
}

/// GET /listings
pub async fn list_listings(
    req: HttpRequest,
    state: web::Data<AppState>,
    params: web::Query<ListingsQuery>,
) -> AppResult<HttpResponse> {
    let params = params.into_inner();
    let query = ListingQuery::from_params(
        params.material.as_deref(),
        params.action.as_deref(),
        params.sort_by.as_deref(),
        params.order.as_deref(),
    )?;

    let base = uploads_base(&req);
    let listings: Vec<ListingResponse> = state
        .listings
        .list(&query)
        .await?
        .into_iter()
        .map(|view| listing_json(view, &base))
        .collect();

    Ok(HttpResponse::Ok().json(listings))
}

/// POST /listings
pub async fn create_listing(
    req: HttpRequest,
    payload: web::Payload,
    identity: OptionalIdentity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let submission = read_submission(&req, payload).await?;
    let view = state
        .listings
        .create(identity.user_id(), submission)
        .await?;

    Ok(HttpResponse::Created().json(listing_json(view, &uploads_base(&req))))
}

/// GET /listings/{id}
pub async fn get_listing(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let view = state.listings.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(listing_json(view, &uploads_base(&req))))
}

/// PUT /listings/{id}
pub async fn update_listing(
    req: HttpRequest,
    payload: web::Payload,
    identity: OptionalIdentity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let submission = read_submission(&req, payload).await?;
    let view = state
        .listings
        .update(identity.user_id(), &path.into_inner(), submission)
        .await?;

    Ok(HttpResponse::Ok().json(listing_json(view, &uploads_base(&req))))
}

/// DELETE /listings/{id}
pub async fn delete_listing(
    identity: OptionalIdentity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state
        .listings
        .delete(identity.user_id(), &path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Listing deleted")))
}
