use std::fmt;

use thiserror::Error;

/// Failure of one list or form operation. None of these are fatal; the
/// affected list or form keeps its prior state and can be retried.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("admin access required")]
    Forbidden,
}

impl ApiError {
    pub fn transport(err: impl fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    pub fn decode(err: impl fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    /// Message suitable for showing next to the list or form.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => "Could not reach the server. Please try again.".to_string(),
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    Missing,
    NotANumber,
    NotAnEmail,
    NotATimestamp,
    NotAChoice,
    NotAFlag,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Problem::Missing => "is required",
            Problem::NotANumber => "must be a number",
            Problem::NotAnEmail => "must be an email address",
            Problem::NotATimestamp => "must be an RFC 3339 date-time",
            Problem::NotAChoice => "is not one of the allowed values",
            Problem::NotAFlag => "must be true or false",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub problem: Problem,
}

/// Client-side rejection raised before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn has_issue(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let missing: Vec<&str> = self
            .issues
            .iter()
            .filter(|issue| issue.problem == Problem::Missing)
            .map(|issue| issue.field)
            .collect();
        let mut first = true;
        if !missing.is_empty() {
            write!(f, "required fields missing: {}", missing.join(", "))?;
            first = false;
        }
        for issue in self
            .issues
            .iter()
            .filter(|issue| issue.problem != Problem::Missing)
        {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{} {}", issue.field, issue.problem)?;
            first = false;
        }
        Ok(())
    }
}
