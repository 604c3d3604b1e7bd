//! Notification texts sent as side effects of auth, job and application changes.

use crate::applications::status::ApplicationStatus;

pub const WELCOME: &str = "Welcome to ForsaLink! Start exploring opportunities.";

/// Sent to the company when a student applies to one of its jobs.
pub fn application_received(student_name: &str, job_title: &str) -> String {
    format!("{student_name} applied to \"{job_title}\"")
}

/// Sent to the student when the company changes the status of an application.
pub fn application_status_changed(
    status: ApplicationStatus,
    job_title: &str,
    company_name: &str,
) -> String {
    match status {
        ApplicationStatus::Accepted => format!(
            "Congratulations! 🎉 Your application for \"{job_title}\" \
             has been accepted by {company_name}."
        ),
        other => format!(
            "Update on your application: \"{job_title}\" status has been changed to {}.",
            other.as_str()
        ),
    }
}
