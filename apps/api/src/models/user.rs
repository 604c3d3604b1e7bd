use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row of `users`. The password hash is never serialized.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub bio: Option<String>,
    pub level_of_study: Option<String>,
    pub cv_link: Option<String>,
    pub interests: Option<String>,
    pub company_description: Option<String>,
    pub company_logo: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            full_name: "Sara".to_string(),
            email: "sara@example.com".to_string(),
            password_hash: "abcd:ef01".to_string(),
            role: "student".to_string(),
            bio: None,
            level_of_study: Some("Master".to_string()),
            cv_link: None,
            interests: None,
            company_description: None,
            company_logo: None,
            profile_image: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "sara@example.com");
        assert_eq!(json["level_of_study"], "Master");
    }
}
