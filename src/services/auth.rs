use chrono::NaiveDateTime;
use serde::Serialize;
use validator::Validate;

use crate::auth::{hash_password, issue_token, verify_password};
use crate::domain::user::{NewUser, User};
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

/// View model for a registered account. Never exposes the password hash.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: i32,
    pub email: String,
    pub created_at: NaiveDateTime,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Creates a new account with a hashed password. The email is normalized
/// before validation so padded or mixed-case input is accepted.
pub fn register_user<R>(repo: &R, mut form: RegisterForm) -> ServiceResult<UserView>
where
    R: UserReader + UserWriter + ?Sized,
{
    form.email = form.email.trim().to_lowercase();
    form.validate().map_err(ServiceError::Validation)?;

    if repo.get_user_by_email(&form.email)?.is_some() {
        return Err(ServiceError::Conflict);
    }

    let password_hash =
        hash_password(&form.password).map_err(|err| ServiceError::Internal(err.to_string()))?;

    let created = repo.create_user(&NewUser::new(form.email, password_hash))?;
    Ok(created.into())
}

/// Verifies credentials and issues a signed bearer token.
pub fn login_user<R>(repo: &R, secret: &str, mut form: LoginForm) -> ServiceResult<String>
where
    R: UserReader + ?Sized,
{
    form.email = form.email.trim().to_lowercase();
    form.validate().map_err(ServiceError::Validation)?;

    let user = repo
        .get_user_by_email(&form.email)?
        .ok_or(ServiceError::Unauthorized)?;

    if !verify_password(&form.password, &user.password_hash) {
        return Err(ServiceError::Unauthorized);
    }

    issue_token(user.id, &user.email, secret)
        .map_err(|err| ServiceError::Internal(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::auth::decode_token;
    use crate::repository::RepositoryResult;
    use crate::repository::mock::{MockUserReader, MockUserWriter};

    const SECRET: &str = "test-secret";

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    struct FakeRepo {
        user_reader: MockUserReader,
        user_writer: MockUserWriter,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                user_reader: MockUserReader::new(),
                user_writer: MockUserWriter::new(),
            }
        }
    }

    impl UserReader for FakeRepo {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
            self.user_reader.get_user_by_id(id)
        }

        fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
            self.user_reader.get_user_by_email(email)
        }
    }

    impl UserWriter for FakeRepo {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
            self.user_writer.create_user(new_user)
        }
    }

    #[test]
    fn register_normalizes_email_and_hashes_password() {
        let mut repo = FakeRepo::new();

        repo.user_reader
            .expect_get_user_by_email()
            .times(1)
            .withf(|email| email == "user@example.com")
            .returning(|_| Ok(None));
        repo.user_writer
            .expect_create_user()
            .times(1)
            .withf(|payload| {
                assert_eq!(payload.email, "user@example.com");
                assert_ne!(payload.password_hash, "a sensible passphrase");
                assert!(payload.password_hash.starts_with("$argon2"));
                true
            })
            .returning(|payload| {
                Ok(User {
                    id: 1,
                    email: payload.email.clone(),
                    password_hash: payload.password_hash.clone(),
                    created_at: datetime(),
                })
            });

        let form = RegisterForm {
            email: " User@Example.com ".to_string(),
            password: "a sensible passphrase".to_string(),
        };

        let view = register_user(&repo, form).expect("expected success");
        assert_eq!(view.id, 1);
        assert_eq!(view.email, "user@example.com");
    }

    #[test]
    fn register_rejects_duplicate_racing_past_the_check() {
        let mut repo = FakeRepo::new();

        repo.user_reader
            .expect_get_user_by_email()
            .times(1)
            .returning(|_| Ok(None));
        // The lookup missed, but the insert loses to the UNIQUE index.
        repo.user_writer
            .expect_create_user()
            .times(1)
            .returning(|_| {
                Err(crate::repository::RepositoryError::Database(
                    diesel::result::Error::DatabaseError(
                        diesel::result::DatabaseErrorKind::UniqueViolation,
                        Box::new("UNIQUE constraint failed: users.email".to_string()),
                    ),
                ))
            });

        let form = RegisterForm {
            email: "user@example.com".to_string(),
            password: "a sensible passphrase".to_string(),
        };

        let result = register_user(&repo, form);

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }

    #[test]
    fn register_rejects_duplicate_email() {
        let mut repo = FakeRepo::new();

        repo.user_reader
            .expect_get_user_by_email()
            .times(1)
            .returning(|email| {
                Ok(Some(User {
                    id: 1,
                    email: email.to_string(),
                    password_hash: "existing".to_string(),
                    created_at: datetime(),
                }))
            });

        let form = RegisterForm {
            email: "user@example.com".to_string(),
            password: "a sensible passphrase".to_string(),
        };

        let result = register_user(&repo, form);

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }

    #[test]
    fn login_issues_decodable_token() {
        let mut repo = FakeRepo::new();
        let stored_hash = hash_password("a sensible passphrase").expect("hash computed");

        repo.user_reader
            .expect_get_user_by_email()
            .times(1)
            .returning(move |_| {
                Ok(Some(User {
                    id: 7,
                    email: "user@example.com".to_string(),
                    password_hash: stored_hash.clone(),
                    created_at: datetime(),
                }))
            });

        let form = LoginForm {
            email: "user@example.com".to_string(),
            password: "a sensible passphrase".to_string(),
        };

        let token = login_user(&repo, SECRET, form).expect("expected success");
        let claims = decode_token(&token, SECRET).expect("token decodes");
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, "user@example.com");
    }

    #[test]
    fn login_accepts_padded_mixed_case_email() {
        let mut repo = FakeRepo::new();
        let stored_hash = hash_password("a sensible passphrase").expect("hash computed");

        repo.user_reader
            .expect_get_user_by_email()
            .times(1)
            .withf(|email| email == "user@example.com")
            .returning(move |email| {
                Ok(Some(User {
                    id: 7,
                    email: email.to_string(),
                    password_hash: stored_hash.clone(),
                    created_at: datetime(),
                }))
            });

        let form = LoginForm {
            email: " User@Example.com ".to_string(),
            password: "a sensible passphrase".to_string(),
        };

        let token = login_user(&repo, SECRET, form).expect("expected success");
        let claims = decode_token(&token, SECRET).expect("token decodes");
        assert_eq!(claims.email, "user@example.com");
    }

    #[test]
    fn login_rejects_wrong_password() {
        let mut repo = FakeRepo::new();
        let stored_hash = hash_password("a sensible passphrase").expect("hash computed");

        repo.user_reader
            .expect_get_user_by_email()
            .times(1)
            .returning(move |_| {
                Ok(Some(User {
                    id: 7,
                    email: "user@example.com".to_string(),
                    password_hash: stored_hash.clone(),
                    created_at: datetime(),
                }))
            });

        let form = LoginForm {
            email: "user@example.com".to_string(),
            password: "wrong password".to_string(),
        };

        let result = login_user(&repo, SECRET, form);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn login_rejects_unknown_email() {
        let mut repo = FakeRepo::new();

        repo.user_reader
            .expect_get_user_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let form = LoginForm {
            email: "nobody@example.com".to_string(),
            password: "whatever it was".to_string(),
        };

        let result = login_user(&repo, SECRET, form);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
