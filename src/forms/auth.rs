use serde::Deserialize;
use validator::Validate;

/// Password bounds follow the usual 8..=128 character guidance.
const PASSWORD_MIN_LEN: u64 = 8;
const PASSWORD_MAX_LEN: u64 = 128;

/// JSON body accepted when registering a new account.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = PASSWORD_MIN_LEN, max = PASSWORD_MAX_LEN))]
    pub password: String,
}

/// JSON body accepted when logging in.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_form_accepts_valid_payload() {
        let form = RegisterForm {
            email: "user@example.com".to_string(),
            password: "a sensible passphrase".to_string(),
        };

        assert!(form.validate().is_ok());
    }

    #[test]
    fn register_form_rejects_bad_email() {
        let form = RegisterForm {
            email: "not-an-email".to_string(),
            password: "a sensible passphrase".to_string(),
        };

        assert!(form.validate().is_err());
    }

    #[test]
    fn register_form_rejects_short_password() {
        let form = RegisterForm {
            email: "user@example.com".to_string(),
            password: "short".to_string(),
        };

        assert!(form.validate().is_err());
    }
}
