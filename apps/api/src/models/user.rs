use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Identity provider a user signed up through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    Linkedin,
    #[default]
    Email,
}

impl Provider {
    pub fn parse(key: &str) -> Self {
        match key {
            "google" => Provider::Google,
            "linkedin" => Provider::Linkedin,
            _ => Provider::Email,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Linkedin => "linkedin",
            Provider::Email => "email",
        }
    }
}

/// Database row for `users`. Credential material never leaves this type.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub profile_picture: Option<String>,
    pub provider: String,
    pub password_digest: String,
    pub salt: String,
    pub created_at: DateTime<Utc>,
}

/// Public user shape returned by the API and cached in sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub profile_picture: Option<String>,
    pub provider: Provider,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            name: row.name,
            profile_picture: row.profile_picture,
            provider: Provider::parse(&row.provider),
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse_defaults_to_email() {
        assert_eq!(Provider::parse("google"), Provider::Google);
        assert_eq!(Provider::parse("linkedin"), Provider::Linkedin);
        assert_eq!(Provider::parse("github"), Provider::Email);
    }

    #[test]
    fn test_user_serializes_without_credentials() {
        let user = User {
            id: Uuid::new_v4(),
            email: "founder@example.com".to_string(),
            name: "Founder".to_string(),
            profile_picture: None,
            provider: Provider::Email,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["provider"], "email");
        assert!(value.get("passwordDigest").is_none());
        assert!(value.get("salt").is_none());
    }
}
