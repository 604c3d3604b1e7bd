pub mod health;
#[cfg(test)]
mod tests;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use serde::Serialize;

use crate::media::MAX_UPLOAD_BYTES;
use crate::state::AppState;
use crate::{applications, auth, bookmarks, conversations, jobs, notifications, users};

/// `{ "message": ... }` body returned by write endpoints with nothing else to report.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/auth/register", post(auth::handlers::handle_register))
        .route("/api/auth/login", post(auth::handlers::handle_login))
        .route(
            "/api/auth/change-password",
            put(auth::handlers::handle_change_password),
        )
        // Users
        .route(
            "/api/users/:id",
            get(users::handlers::handle_get_user).put(users::handlers::handle_update_user),
        )
        .route(
            "/api/users/:id/applications",
            get(users::handlers::handle_student_applications),
        )
        .route(
            "/api/users/:id/avatar",
            post(users::handlers::handle_upload_avatar)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024)),
        )
        // Jobs
        .route(
            "/api/jobs",
            get(jobs::handlers::handle_list_jobs).post(jobs::handlers::handle_create_job),
        )
        .route(
            "/api/jobs/:id",
            get(jobs::handlers::handle_get_job)
                .put(jobs::handlers::handle_update_job)
                .delete(jobs::handlers::handle_delete_job),
        )
        .route(
            "/api/jobs/company/:id",
            get(jobs::handlers::handle_company_jobs),
        )
        .route("/api/jobs/:id/apply", post(jobs::handlers::handle_apply))
        .route(
            "/api/jobs/:id/applications",
            get(jobs::handlers::handle_job_applications),
        )
        // Applications
        .route(
            "/api/applications/:id/status",
            put(applications::handlers::handle_update_status),
        )
        // Bookmarks
        .route("/api/bookmarks", post(bookmarks::handlers::handle_add))
        .route("/api/bookmarks/:id", get(bookmarks::handlers::handle_list))
        .route(
            "/api/bookmarks/:id/:job_id",
            delete(bookmarks::handlers::handle_remove),
        )
        .route(
            "/api/bookmarks/check/:id/:job_id",
            get(bookmarks::handlers::handle_check),
        )
        // Notifications
        .route(
            "/api/notifications/:id",
            get(notifications::handlers::handle_list)
                .delete(notifications::handlers::handle_delete),
        )
        .route(
            "/api/notifications/:id/unread-count",
            get(notifications::handlers::handle_unread_count),
        )
        .route(
            "/api/notifications/:id/read",
            put(notifications::handlers::handle_mark_read),
        )
        .route(
            "/api/notifications/user/:id/read-all",
            put(notifications::handlers::handle_mark_all_read),
        )
        // Conversations
        .route(
            "/api/conversations",
            post(conversations::handlers::handle_create),
        )
        .route(
            "/api/conversations/messages",
            post(conversations::handlers::handle_send_message),
        )
        .route(
            "/api/conversations/:id",
            get(conversations::handlers::handle_list),
        )
        .route(
            "/api/conversations/:id/messages",
            get(conversations::handlers::handle_messages),
        )
        .route(
            "/api/conversations/:id/read",
            put(conversations::handlers::handle_mark_read),
        )
        .with_state(state)
}
