use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error envelope the backend attaches to rejected requests.
///
/// Validation failures (HTTP 422) fill `errors` with one message list per
/// offending field; most other rejections carry a top-level `message`, and
/// a few legacy routes use `error` instead. All fields are optional so a
/// partial or empty body still deserializes.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// The main human-readable error message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Alternate message field some routes use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Field name to validation messages, as 422 responses serialize it.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ErrorBody {
    /// Parse an error envelope out of a raw response body. Non-JSON and
    /// differently-shaped bodies yield `None` rather than an error.
    #[must_use]
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// First field-specific validation message, taking fields in
    /// lexicographic order so callers get a stable pick.
    #[must_use]
    pub fn first_field_message(&self) -> Option<&str> {
        self.errors
            .values()
            .flat_map(|messages| messages.iter())
            .map(String::as_str)
            .next()
    }

    /// Best general message: `message`, falling back to `error`.
    #[must_use]
    pub fn general_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .filter(|message| !message.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_envelope_deserialization() {
        let json = r#"{
            "message": "The given data was invalid.",
            "errors": {
                "email": ["The email field is required."],
                "password": ["The password must be at least 8 characters."]
            }
        }"#;

        let body = ErrorBody::from_json(json).unwrap();

        assert_eq!(
            body.general_message(),
            Some("The given data was invalid.")
        );
        assert_eq!(
            body.first_field_message(),
            Some("The email field is required.")
        );
    }

    #[test]
    fn test_first_field_message_orders_fields_lexicographically() {
        let json = r#"{
            "errors": {
                "password": ["The password confirmation does not match."],
                "email": ["The email has already been taken."]
            }
        }"#;

        let body = ErrorBody::from_json(json).unwrap();

        // "email" sorts before "password" regardless of payload order.
        assert_eq!(
            body.first_field_message(),
            Some("The email has already been taken.")
        );
    }

    #[test]
    fn test_general_message_falls_back_to_error_field() {
        let body = ErrorBody::from_json(r#"{"error":"Something broke."}"#).unwrap();

        assert_eq!(body.general_message(), Some("Something broke."));
    }

    #[test]
    fn test_empty_message_is_not_a_message() {
        let body = ErrorBody::from_json(r#"{"message":""}"#).unwrap();

        assert_eq!(body.general_message(), None);
    }

    #[test]
    fn test_non_json_body_yields_none() {
        assert_eq!(ErrorBody::from_json("<html>502</html>"), None);
    }

    #[test]
    fn test_empty_object_deserializes_to_default() {
        let body = ErrorBody::from_json("{}").unwrap();

        assert_eq!(body, ErrorBody::default());
        assert_eq!(body.first_field_message(), None);
        assert_eq!(body.general_message(), None);
    }
}
