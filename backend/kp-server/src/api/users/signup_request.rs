use crate::api::error::{ApiError, Result as ApiResult};

use serde::Deserialize;

const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
}

impl SignUpRequest {
    pub fn validate(&self) -> ApiResult<()> {
        let (local, domain) = self
            .email
            .split_once('@')
            .ok_or_else(|| ApiError::validation("Email must contain '@'", Some("email")))?;

        if local.is_empty() || !domain.contains('.') {
            return Err(ApiError::validation("Email is not valid", Some("email")));
        }

        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ApiError::validation(
                format!("Password must be at least {} characters", MIN_PASSWORD_CHARS),
                Some("password"),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SignUpRequest;

    fn request(email: &str, password: &str) -> SignUpRequest {
        SignUpRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request("test@email.com", "fsfsDSF@545AADFDGEWE3AR").validate().is_ok());
    }

    #[test]
    fn email_without_at_is_rejected() {
        assert!(request("not-an-email", "long-enough-pw").validate().is_err());
    }

    #[test]
    fn email_without_domain_dot_is_rejected() {
        assert!(request("user@localhost", "long-enough-pw").validate().is_err());
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(request("test@email.com", "short").validate().is_err());
    }
}
