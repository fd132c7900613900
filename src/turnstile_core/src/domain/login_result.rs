use serde::Serialize;

use crate::domain::user::PublicUser;

pub const TOKEN_TYPE: &str = "Bearer";
pub const SUCCESS_MESSAGE: &str = "Login successful";

/// What a login attempt hands back to the transport layer.
///
/// Serializes to `{"success": true, "message", "access_token", "token_type", "user"}`
/// or `{"success": false, "error"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LoginResult {
    Success(LoginSuccess),
    Failure(LoginFailure),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginSuccess {
    success: bool,
    pub message: String,
    pub access_token: String,
    pub token_type: String,
    pub user: PublicUser,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginFailure {
    success: bool,
    pub error: String,
}

impl LoginResult {
    pub fn success(access_token: String, user: PublicUser) -> Self {
        Self::Success(LoginSuccess {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            user,
        })
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure(LoginFailure {
            success: false,
            error: error.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(&failure.error),
        }
    }

    pub fn as_success(&self) -> Option<&LoginSuccess> {
        match self {
            Self::Success(success) => Some(success),
            Self::Failure(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn success_serializes_with_bearer_type() {
        let id = Uuid::new_v4();
        let result = LoginResult::success(
            "1|abcdefghijklmnopqrstuvwxyz".to_string(),
            PublicUser {
                id,
                name: "Test User".to_string(),
                email: "test@example.com".to_string(),
            },
        );

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "success": true,
                "message": SUCCESS_MESSAGE,
                "access_token": "1|abcdefghijklmnopqrstuvwxyz",
                "token_type": "Bearer",
                "user": {"id": id, "name": "Test User", "email": "test@example.com"},
            })
        );
    }

    #[test]
    fn failure_serializes_error_only() {
        let result = LoginResult::failure("email format is invalid");

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"success": false, "error": "email format is invalid"})
        );
        assert_eq!(result.error(), Some("email format is invalid"));
    }
}
