use crate::errors::AppError;

/// Lifecycle state of a job application. Any state may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "pending" => Ok(ApplicationStatus::Pending),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            _ => Err(AppError::Validation("Invalid status".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_statuses() {
        let cases = [
            ("pending", ApplicationStatus::Pending),
            ("accepted", ApplicationStatus::Accepted),
            ("rejected", ApplicationStatus::Rejected),
        ];
        for (raw, expected) in cases {
            assert_eq!(ApplicationStatus::parse(raw).unwrap(), expected);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!(ApplicationStatus::parse("Accepted").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown() {
        match ApplicationStatus::parse("hired") {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Invalid status"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_as_str_matches_parse() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(ApplicationStatus::parse(status.as_str()).unwrap(), status);
        }
    }
}
