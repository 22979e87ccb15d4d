//! Account handlers: signup, listing users, login.

use actix_web::{HttpResponse, web};
use recyclehub_core::domain::User;
use recyclehub_core::services::SignupInput;
use recyclehub_shared::dto::{AuthResponse, LoginRequest, SignupRequest, UserResponse, format_timestamp};

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn user_json(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        created_at: format_timestamp(&user.created_at),
    }
}

/// POST /signup
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user = state
        .users
        .signup(SignupInput {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(HttpResponse::Created().json(user_json(user)))
}

/// GET /users
pub async fn list_users(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users: Vec<UserResponse> = state.users.list().await?.into_iter().map(user_json).collect();
    Ok(HttpResponse::Ok().json(users))
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let token = state.users.login(req.username, req.password).await?;

    Ok(HttpResponse::Ok().json(AuthResponse::bearer(token.access_token, token.expires_in)))
}
