use serde::{Deserialize, Serialize};

/// Category of an error reported to API clients
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    Invalid,
    NotFound,
    Throttled,
}

/// JSON error envelope returned by the API routes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: ErrorKind,
    pub message: String,
}

impl ErrorBody {
    pub fn new(error: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
        }
    }

    /// Create an error for malformed client input
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Invalid, message)
    }

    /// Create an error for a rejected request under rate limiting
    pub fn throttled() -> Self {
        Self::new(
            ErrorKind::Throttled,
            "Rate limit exceeded. Please try again later.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_kind_in_kebab_case() {
        let body = ErrorBody::new(ErrorKind::NotFound, "no such page");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "not-found");
        assert_eq!(json["message"], "no such page");
    }
}
