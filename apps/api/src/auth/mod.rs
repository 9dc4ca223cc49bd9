//! Email identity and bearer-token sessions.
//!
//! Users live in Postgres; active sessions live in redis as
//! `ideck:session:{token}` -> user JSON with a TTL. OAuth providers are out
//! of scope — the `provider` column exists so their users can share the
//! table later.

use axum::http::{header, HeaderMap};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{Provider, User, UserRow};
use crate::state::AppState;

pub mod handlers;
pub mod sessions;

/// Salted SHA-256 digest, hex encoded.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Creates an email-provider user. The email must not already be registered;
/// the `users.email` unique constraint is the single source of truth for
/// that, so concurrent signups of the same address cannot race past a
/// pre-check.
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    name: &str,
    password: &str,
) -> Result<User, AppError> {
    let salt = Uuid::new_v4().simple().to_string();
    let digest = hash_password(&salt, password);

    let row: UserRow = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, name, provider, password_digest, salt)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(name)
    .bind(Provider::Email.as_str())
    .bind(digest)
    .bind(salt)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Validation("An account with this email already exists".to_string())
        } else {
            AppError::Database(e)
        }
    })?;

    Ok(User::from(row))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Verifies email/password. Unknown emails and bad passwords are the same
/// `Unauthorized` to the caller.
pub async fn verify_credentials(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let row: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    let row = row.ok_or(AppError::Unauthorized)?;

    if hash_password(&row.salt, password) != row.password_digest {
        return Err(AppError::Unauthorized);
    }
    Ok(User::from(row))
}

/// Resolves the bearer token in the request headers to its session user.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_bearer)
        .ok_or(AppError::Unauthorized)?;

    sessions::session_user(&state.redis, token)
        .await?
        .ok_or(AppError::Unauthorized)
}

fn parse_bearer(value: &str) -> Option<&str> {
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}
