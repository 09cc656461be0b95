use serde::{Deserialize, Serialize};

/// Credentials submitted to the sign-in endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// The user's email address.
    pub email: String,

    /// The user's password.
    pub password: String,
}

/// Payload for creating a new account. The backend validates every field
/// and re-checks that both password entries match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    /// The user's display name.
    pub name: String,

    /// The user's email address.
    pub email: String,

    /// The user's password.
    pub password: String,

    /// Second password entry, echoed for server-side confirmation.
    pub password_confirmation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_serialization() {
        let request = LoginRequest {
            email: "alex@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
        };

        let serialized = serde_json::to_value(&request).unwrap();

        assert_eq!(serialized["email"], "alex@example.com");
        assert_eq!(serialized["password"], "hunter2hunter2");
    }

    #[test]
    fn test_register_request_uses_snake_case_confirmation_field() {
        let request = RegisterRequest {
            name: "Alex".to_string(),
            email: "alex@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
            password_confirmation: "hunter2hunter2".to_string(),
        };

        let serialized = serde_json::to_value(&request).unwrap();

        // The backend expects exactly this field name.
        assert_eq!(serialized["password_confirmation"], "hunter2hunter2");
    }
}
