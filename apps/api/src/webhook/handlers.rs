//! Clerk webhook handler: verify, then upsert the user keyed by Clerk id.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
};
use bytes::Bytes;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::state::AppState;
use crate::webhook::signature;

#[derive(Debug, Deserialize)]
pub struct ClerkEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: ClerkUserData,
}

#[derive(Debug, Deserialize)]
pub struct ClerkUserData {
    pub id: String,
    #[serde(default)]
    pub email_addresses: Vec<ClerkEmail>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClerkEmail {
    pub email_address: String,
}

/// POST /api/v1/webhook/clerk
///
/// Signature-verified upsert on `user.created` / `user.updated`; every other
/// event type is acknowledged and ignored.
pub async fn handle_clerk_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let msg_id = svix_header(&headers, "svix-id")?;
    let timestamp = svix_header(&headers, "svix-timestamp")?;
    let signatures = svix_header(&headers, "svix-signature")?;

    signature::verify(
        &state.config.clerk_webhook_secret,
        msg_id,
        timestamp,
        &body,
        signatures,
        state.clock.now_utc().timestamp(),
    )
    .map_err(|e| {
        warn!("Webhook verification failed: {e}");
        AppError::Validation("Webhook verification failed".to_string())
    })?;

    let event: ClerkEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("Malformed webhook payload: {e}")))?;

    match event.event_type.as_str() {
        "user.created" | "user.updated" => upsert_user(&state.db, &event.data).await?,
        other => debug!("Ignoring webhook event type {other}"),
    }

    Ok(StatusCode::OK)
}

async fn upsert_user(pool: &PgPool, data: &ClerkUserData) -> Result<(), AppError> {
    let email = data.email_addresses.first().map(|e| e.email_address.as_str());
    let (Some(email), false) = (email, data.id.is_empty()) else {
        return Err(AppError::Validation(
            "Missing required user data".to_string(),
        ));
    };

    let full_name = display_name(data.first_name.as_deref(), data.last_name.as_deref());

    sqlx::query(
        "INSERT INTO users (clerk_id, email, full_name, experience)
         VALUES ($1, $2, $3, 'FRESHER')
         ON CONFLICT (clerk_id)
         DO UPDATE SET email = EXCLUDED.email, full_name = EXCLUDED.full_name, updated_at = now()",
    )
    .bind(&data.id)
    .bind(email)
    .bind(&full_name)
    .execute(pool)
    .await?;

    info!("Synced user {} from webhook", data.id);
    Ok(())
}

fn svix_header<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, AppError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Validation("Missing svix headers".to_string()))
}

fn display_name(first: Option<&str>, last: Option<&str>) -> String {
    let name = format!("{} {}", first.unwrap_or(""), last.unwrap_or(""));
    let name = name.trim();
    if name.is_empty() {
        "User".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_joins_and_trims() {
        assert_eq!(display_name(Some("Jane"), Some("Doe")), "Jane Doe");
        assert_eq!(display_name(Some("Jane"), None), "Jane");
        assert_eq!(display_name(None, Some("Doe")), "Doe");
    }

    #[test]
    fn test_display_name_falls_back_for_anonymous() {
        assert_eq!(display_name(None, None), "User");
        assert_eq!(display_name(Some("  "), Some("")), "User");
    }

    #[test]
    fn test_event_payload_parses() {
        let event: ClerkEvent = serde_json::from_str(
            r#"{
                "type": "user.created",
                "data": {
                    "id": "user_abc123",
                    "email_addresses": [{"email_address": "jane@example.com"}],
                    "first_name": "Jane",
                    "last_name": null
                }
            }"#,
        )
        .unwrap();
        assert_eq!(event.event_type, "user.created");
        assert_eq!(event.data.email_addresses[0].email_address, "jane@example.com");
    }
}
