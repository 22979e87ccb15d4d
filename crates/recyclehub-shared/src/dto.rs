//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ISO-8601 UTC with microseconds and a `Z` suffix.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// `user_id` as sent by clients: a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimedUserId {
    Number(i64),
    Text(String),
}

impl ClaimedUserId {
    pub fn into_text(self) -> String {
        match self {
            ClaimedUserId::Number(n) => n.to_string(),
            ClaimedUserId::Text(s) => s,
        }
    }
}

/// JSON body for creating or updating a listing.
///
/// Every field is optional here; which ones are required depends on the operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub action: Option<String>,
    pub material: Option<String>,
    pub user_id: Option<ClaimedUserId>,
}

/// Query string of `GET /listings`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingsQuery {
    pub material: Option<String>,
    pub action: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// A listing as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub action: String,
    pub material: String,
    pub created_at: String,
    pub image_url: Option<String>,
    pub user_id: Option<i32>,
    pub username: Option<String>,
}

/// Request to register a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request to login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: String,
}

/// Response containing an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl AuthResponse {
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_timestamp_has_micros_and_z() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
        assert_eq!(format_timestamp(&at), "2024-03-01T12:30:05.000000Z");
    }

    #[test]
    fn test_user_id_accepts_number_or_string() {
        let body: ListingRequest = serde_json::from_str(r#"{"user_id": 7}"#).unwrap();
        assert_eq!(body.user_id.map(ClaimedUserId::into_text).as_deref(), Some("7"));

        let body: ListingRequest = serde_json::from_str(r#"{"user_id": "7"}"#).unwrap();
        assert_eq!(body.user_id.map(ClaimedUserId::into_text).as_deref(), Some("7"));

        let body: ListingRequest = serde_json::from_str(r#"{"title": "Jars"}"#).unwrap();
        assert!(body.user_id.is_none());
    }

    #[test]
    fn test_listing_response_keeps_null_fields() {
        let response = ListingResponse {
            id: Uuid::nil(),
            title: "Jars".into(),
            description: "Clean".into(),
            location: "Austin".into(),
            action: "donate".into(),
            material: "glass".into(),
            created_at: "2024-03-01T12:30:05.000000Z".into(),
            image_url: None,
            user_id: None,
            username: None,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["image_url"].is_null());
        assert!(json.get("username").is_some());
    }
}
