//! Bearer token extraction.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use recyclehub_core::ports::{AuthError, TokenClaims};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated user identity, taken from a verified bearer token.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i32,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
        }
    }
}

/// Identity if the request carries an `Authorization` header, `None` otherwise.
///
/// A header that is present but malformed, or a token that fails
/// verification, rejects the request with 401.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<Identity>);

impl OptionalIdentity {
    pub fn user_id(&self) -> Option<i32> {
        self.0.as_ref().map(|identity| identity.user_id)
    }
}

fn auth_error(err: AuthError) -> AppError {
    let message = match err {
        AuthError::TokenExpired => "Token has expired".to_string(),
        AuthError::InvalidToken(reason) => format!("Invalid token: {reason}"),
        other => other.to_string(),
    };
    AppError::Unauthorized(message)
}

fn identify(req: &HttpRequest) -> Result<Option<Identity>, AppError> {
    let Some(auth_header) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AppError::Internal("Server configuration error".to_string())
    })?;

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::Unauthorized("Expected 'Authorization: Bearer <token>'".to_string())
        })?;

    let claims = state.tokens.validate_token(token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected bearer token");
        auth_error(e)
    })?;

    Ok(Some(Identity::from(claims)))
}

impl FromRequest for OptionalIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identify(req).map(OptionalIdentity))
    }
}
