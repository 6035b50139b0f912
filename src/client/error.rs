//! Client-side error type and the uniform outcome shape handed to UI adapters

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Please log in first")]
    Unauthenticated,

    #[error("You can only manage your own reservations")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No copies of \"{0}\" are available")]
    NoCopiesAvailable(String),

    #[error("You already have an active reservation for \"{0}\"")]
    DuplicateReservation(String),

    #[error("Reservation {0} is already cancelled")]
    AlreadyCancelled(String),

    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Please enter a valid email address")]
    InvalidFormat,

    #[error("Missing or invalid fields: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Local storage error: {0}")]
    Storage(String),

    #[error("Server error: {0}")]
    Remote(String),
}

impl ClientError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Unauthenticated => "UNAUTHENTICATED",
            ClientError::Unauthorized => "UNAUTHORIZED",
            ClientError::NotFound(_) => "NOT_FOUND",
            ClientError::NoCopiesAvailable(_) => "NO_COPIES_AVAILABLE",
            ClientError::DuplicateReservation(_) => "DUPLICATE_RESERVATION",
            ClientError::AlreadyCancelled(_) => "ALREADY_CANCELLED",
            ClientError::MissingCredentials => "MISSING_CREDENTIALS",
            ClientError::InvalidFormat => "INVALID_FORMAT",
            ClientError::Validation(_) => "VALIDATION",
            ClientError::Storage(_) => "STORAGE",
            ClientError::Remote(_) => "REMOTE",
        }
    }
}

/// `{ success, data?, error?, code? }` shape for callers that check a flag
/// instead of matching on a `Result`. `data` may be any serializable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl<T> From<Result<T, ClientError>> for Outcome<T> {
    fn from(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(data) => Outcome {
                success: true,
                data: Some(data),
                error: None,
                code: None,
            },
            Err(e) => Outcome {
                success: false,
                data: None,
                error: Some(e.to_string()),
                code: Some(e.code()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Receipt {
        reservation_id: String,
    }

    #[test]
    fn test_outcome_success_nests_data() {
        let outcome: Outcome<Receipt> = Ok(Receipt {
            reservation_id: "r-1".into(),
        })
        .into();
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({ "success": true, "data": { "reservationId": "r-1" } })
        );
    }

    #[test]
    fn test_outcome_serializes_scalar_and_sequence_data() {
        let list: Outcome<Vec<&str>> = Ok(vec!["r-1", "r-2"]).into();
        assert_eq!(
            serde_json::to_value(&list).unwrap(),
            json!({ "success": true, "data": ["r-1", "r-2"] })
        );

        let flag: Outcome<bool> = Ok(true).into();
        assert_eq!(serde_json::to_value(&flag).unwrap(), json!({ "success": true, "data": true }));

        let count: Outcome<usize> = Ok(2).into();
        assert_eq!(serde_json::to_value(&count).unwrap(), json!({ "success": true, "data": 2 }));

        let unit: Outcome<()> = Ok(()).into();
        assert_eq!(serde_json::to_value(&unit).unwrap(), json!({ "success": true, "data": null }));
    }

    #[test]
    fn test_outcome_failure_carries_code() {
        let outcome: Outcome<Receipt> = Err(ClientError::DuplicateReservation("Dune".into())).into();
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["code"], "DUPLICATE_RESERVATION");
        assert!(value["error"].as_str().unwrap().contains("Dune"));
        assert!(value.get("data").is_none());
    }
}
