//! Redis-backed session store: `ideck:session:{token}` -> user JSON.

use anyhow::Context;
use redis::{AsyncCommands, Client as RedisClient};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;

const SESSION_KEY_PREFIX: &str = "ideck:session:";

fn session_key(token: &str) -> String {
    format!("{SESSION_KEY_PREFIX}{token}")
}

/// Stores a fresh session for the user and returns its bearer token.
pub async fn create_session(
    redis: &RedisClient,
    ttl_secs: u64,
    user: &User,
) -> Result<String, AppError> {
    let token = Uuid::new_v4().simple().to_string();
    let payload = serde_json::to_string(user)
        .context("serializing session user")
        .map_err(AppError::Internal)?;

    let mut conn = redis.get_multiplexed_async_connection().await?;
    let _: () = conn.set_ex(session_key(&token), payload, ttl_secs).await?;
    Ok(token)
}

/// Looks up the user for a token. `None` means missing or expired.
pub async fn session_user(redis: &RedisClient, token: &str) -> Result<Option<User>, AppError> {
    let mut conn = redis.get_multiplexed_async_connection().await?;
    let payload: Option<String> = conn.get(session_key(token)).await?;
    match payload {
        Some(json) => {
            let user = serde_json::from_str(&json)
                .context("deserializing session user")
                .map_err(AppError::Internal)?;
            Ok(Some(user))
        }
        None => Ok(None),
    }
}

/// Removes a session. Deleting an already-gone token is not an error.
pub async fn destroy_session(redis: &RedisClient, token: &str) -> Result<(), AppError> {
    let mut conn = redis.get_multiplexed_async_connection().await?;
    let _: () = conn.del(session_key(token)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Provider;
    use chrono::Utc;

    #[test]
    fn test_session_key_shape() {
        assert_eq!(session_key("abc"), "ideck:session:abc");
    }

    /// The payload written by `create_session` must deserialize back to the
    /// same user in `session_user`.
    #[test]
    fn test_session_payload_round_trips() {
        let user = User {
            id: Uuid::new_v4(),
            email: "founder@example.com".to_string(),
            name: "Founder".to_string(),
            profile_picture: Some("https://example.com/avatar.png".to_string()),
            provider: Provider::Email,
            created_at: Utc::now(),
        };

        let payload = serde_json::to_string(&user).unwrap();
        let restored: User = serde_json::from_str(&payload).unwrap();
        assert_eq!(restored, user);
    }
}
