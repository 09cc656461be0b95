//! Failure classification for backend calls.
//!
//! Every rejected request is sorted by status into one variant, carrying
//! whatever error envelope the body held. [`ApiError::user_message`] turns
//! a variant into the one-line text a form or terminal shows; callers that
//! need to branch (retry, redirect) match on the variant instead.

use http::StatusCode;
use shared::models::ErrorBody;
use thiserror::Error;

/// A backend call that did not produce the expected success response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 422: one or more submitted fields were rejected.
    #[error("validation failed")]
    Validation(ErrorBody),

    /// 400: the request itself was malformed.
    #[error("bad request")]
    BadRequest(ErrorBody),

    /// 401: credentials rejected, or the session is no longer valid.
    #[error("unauthorized")]
    Unauthorized(ErrorBody),

    /// 404: the endpoint does not exist where we looked for it. Points at
    /// a wrong base URL or a backend serving different routes.
    #[error("endpoint not found")]
    Misconfigured,

    /// 500: the backend fell over.
    #[error("server error")]
    Server(ErrorBody),

    /// Any other rejection status.
    #[error("request rejected with status {status}")]
    Rejected {
        /// The status the backend answered with.
        status: StatusCode,
        /// Whatever error envelope came along.
        body: ErrorBody,
    },

    /// The request produced no response at all: connection refused, DNS,
    /// timeout, or the browser-side equivalent of a CORS rejection.
    #[error("network failure")]
    Network(#[source] reqwest::Error),

    /// The backend answered success but the body was not the expected
    /// payload.
    #[error("malformed response body")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// Classify a rejection by its status code and parsed error envelope.
    pub(crate) fn from_status(status: StatusCode, body: Option<ErrorBody>) -> Self {
        let body = body.unwrap_or_default();
        match status {
            StatusCode::UNPROCESSABLE_ENTITY => Self::Validation(body),
            StatusCode::BAD_REQUEST => Self::BadRequest(body),
            StatusCode::UNAUTHORIZED => Self::Unauthorized(body),
            StatusCode::NOT_FOUND => Self::Misconfigured,
            StatusCode::INTERNAL_SERVER_ERROR => Self::Server(body),
            status => Self::Rejected { status, body },
        }
    }

    /// The HTTP status behind this error, when there was a response.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Validation(_) => Some(StatusCode::UNPROCESSABLE_ENTITY),
            Self::BadRequest(_) => Some(StatusCode::BAD_REQUEST),
            Self::Unauthorized(_) => Some(StatusCode::UNAUTHORIZED),
            Self::Misconfigured => Some(StatusCode::NOT_FOUND),
            Self::Server(_) => Some(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Rejected { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Whether the backend explicitly rejected the session or credentials.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// The validation messages per field, for forms that highlight inputs.
    /// Empty for everything but [`ApiError::Validation`].
    #[must_use]
    pub fn field_errors(&self) -> Option<&ErrorBody> {
        match self {
            Self::Validation(body) => Some(body),
            _ => None,
        }
    }

    /// One line of text fit to show a person.
    ///
    /// Server-provided messages win when present; each variant falls back
    /// to a fixed phrase. Validation errors prefer the first field-specific
    /// message so the user sees what to fix.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(body) => body
                .first_field_message()
                .or_else(|| body.general_message())
                .unwrap_or("Validation failed. Please check your input.")
                .to_string(),
            Self::BadRequest(body) => body
                .general_message()
                .unwrap_or("Invalid request. Please check your input.")
                .to_string(),
            Self::Unauthorized(body) => body
                .general_message()
                .unwrap_or("Login failed. Check credentials.")
                .to_string(),
            Self::Misconfigured => {
                "Endpoint not found. Check that the backend is running and the base URL is configured correctly."
                    .to_string()
            }
            Self::Server(body) => body
                .general_message()
                .unwrap_or("Server error. Please try again later.")
                .to_string(),
            Self::Rejected { status, body } => body.general_message().map_or_else(
                || format!("Error {}: An unexpected error occurred.", status.as_u16()),
                ToString::to_string,
            ),
            Self::Network(_) => {
                "Network error. Check that the API server is running and CORS is configured correctly."
                    .to_string()
            }
            Self::Decode(_) => "An unexpected error occurred.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_from(json: &str) -> Option<ErrorBody> {
        ErrorBody::from_json(json)
    }

    #[test]
    fn validation_prefers_first_field_message() {
        let error = ApiError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            body_from(r#"{"errors":{"email":["The email field is required."]}}"#),
        );

        assert_eq!(error.user_message(), "The email field is required.");
        assert!(error.field_errors().is_some());
    }

    #[test]
    fn validation_without_fields_falls_back_to_message_then_fixed_text() {
        let with_message = ApiError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            body_from(r#"{"message":"The given data was invalid."}"#),
        );
        assert_eq!(with_message.user_message(), "The given data was invalid.");

        let bare = ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, None);
        assert_eq!(
            bare.user_message(),
            "Validation failed. Please check your input."
        );
    }

    #[test]
    fn unauthorized_uses_server_message_when_present() {
        let error = ApiError::from_status(
            StatusCode::UNAUTHORIZED,
            body_from(r#"{"message":"These credentials do not match our records."}"#),
        );

        assert!(error.is_unauthorized());
        assert_eq!(
            error.user_message(),
            "These credentials do not match our records."
        );

        let bare = ApiError::from_status(StatusCode::UNAUTHORIZED, None);
        assert_eq!(bare.user_message(), "Login failed. Check credentials.");
    }

    #[test]
    fn not_found_maps_to_configuration_guidance() {
        let error = ApiError::from_status(StatusCode::NOT_FOUND, None);

        assert!(matches!(error, ApiError::Misconfigured));
        assert!(error.user_message().contains("base URL"));
    }

    #[test]
    fn server_error_passes_message_through() {
        let error = ApiError::from_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            body_from(r#"{"error":"database unavailable"}"#),
        );

        assert_eq!(error.user_message(), "database unavailable");

        let bare = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, None);
        assert_eq!(bare.user_message(), "Server error. Please try again later.");
    }

    #[test]
    fn unlisted_statuses_fall_through_to_rejected() {
        let error = ApiError::from_status(
            StatusCode::from_u16(419).unwrap(),
            body_from(r#"{"message":"CSRF token mismatch."}"#),
        );

        assert_eq!(error.status(), StatusCode::from_u16(419).ok());
        assert_eq!(error.user_message(), "CSRF token mismatch.");

        let bare = ApiError::from_status(StatusCode::from_u16(418).unwrap(), None);
        assert_eq!(
            bare.user_message(),
            "Error 418: An unexpected error occurred."
        );
    }

    #[test]
    fn bad_request_uses_its_own_fallback() {
        let bare = ApiError::from_status(StatusCode::BAD_REQUEST, None);

        assert_eq!(
            bare.user_message(),
            "Invalid request. Please check your input."
        );
    }
}
