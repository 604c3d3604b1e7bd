use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::auth::validation::Role;
use crate::errors::AppError;
use crate::models::user::User;

/// Fields for a new account. `password_hash` is already hashed.
pub struct NewUser<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
    pub bio: Option<&'a str>,
    pub level_of_study: Option<&'a str>,
    pub company_description: Option<&'a str>,
}

/// Profile edit. `None` keeps the stored value.
#[derive(Debug, Default, serde::Deserialize, validator::Validate)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub level_of_study: Option<String>,
    pub cv_link: Option<String>,
    pub interests: Option<String>,
    pub company_description: Option<String>,
    pub company_logo: Option<String>,
}

impl ProfileUpdate {
    /// Trims a supplied `full_name` in place; a blank one is rejected.
    pub fn normalize_full_name(&mut self) -> Result<(), AppError> {
        if let Some(name) = self.full_name.as_mut() {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(AppError::Validation("full_name cannot be empty".to_string()));
            }
            *name = trimmed.to_string();
        }
        Ok(())
    }
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<User>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE lower(email) = lower($1)")
        .bind(email)
        .fetch_optional(executor)
        .await
}

pub async fn insert_user<'e, E>(executor: E, user: &NewUser<'_>) -> Result<Uuid, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar(
        r#"
        INSERT INTO users
            (full_name, email, password_hash, role, bio, level_of_study, company_description)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(user.full_name)
    .bind(user.email)
    .bind(user.password_hash)
    .bind(user.role.as_str())
    .bind(user.bio)
    .bind(user.level_of_study)
    .bind(user.company_description)
    .fetch_one(executor)
    .await
}

/// Returns the number of rows touched (0 when the user does not exist).
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    update: &ProfileUpdate,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE users SET
            full_name = COALESCE($1, full_name),
            bio = COALESCE($2, bio),
            level_of_study = COALESCE($3, level_of_study),
            cv_link = COALESCE($4, cv_link),
            interests = COALESCE($5, interests),
            company_description = COALESCE($6, company_description),
            company_logo = COALESCE($7, company_logo)
        WHERE id = $8
        "#,
    )
    .bind(update.full_name.as_deref())
    .bind(update.bio.as_deref())
    .bind(update.level_of_study.as_deref())
    .bind(update.cv_link.as_deref())
    .bind(update.interests.as_deref())
    .bind(update.company_description.as_deref())
    .bind(update.company_logo.as_deref())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn update_password_hash(
    pool: &PgPool,
    id: Uuid,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
        .bind(password_hash)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Stores an uploaded image URL as the company logo or the student's profile image.
pub async fn set_avatar(pool: &PgPool, id: Uuid, role: Role, url: &str) -> Result<(), sqlx::Error> {
    let sql = match role {
        Role::Company => "UPDATE users SET company_logo = $1 WHERE id = $2",
        Role::Student => "UPDATE users SET profile_image = $1 WHERE id = $2",
    };
    sqlx::query(sql).bind(url).bind(id).execute(pool).await?;
    Ok(())
}

/// Role of a user, `None` when the user does not exist.
pub async fn role_of(pool: &PgPool, id: Uuid) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT role FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
