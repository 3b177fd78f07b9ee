//! Bearer-token authentication and password hashing.
//!
//! Tokens are compact JWTs signed with HMAC-SHA256 using the server secret.
//! Handlers take [`AuthenticatedUser`] for auth-required operations and
//! `Option<AuthenticatedUser>` where anonymous access is allowed.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::config::ServerConfig;

type HmacSha256 = Hmac<Sha256>;

/// Issued tokens stay valid for a day.
pub const TOKEN_TTL_SECS: i64 = 86_400;

const TOKEN_HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Claims carried by a verified bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Identifier of the authenticated user.
    pub sub: i32,
    /// Email of the authenticated user.
    pub email: String,
    /// Expiration as a unix timestamp.
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication credentials were not provided.")]
    MissingCredentials,
    #[error("Invalid authorization header.")]
    InvalidHeader,
    #[error("Invalid token.")]
    InvalidToken,
    #[error("Token has expired.")]
    Expired,
    #[error("Server configuration missing.")]
    Misconfigured,
    #[error("Password hashing failed.")]
    Hashing,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Misconfigured | AuthError::Hashing => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "detail": self.to_string() }))
    }
}

/// Issue a signed token for the given user.
pub fn issue_token(user_id: i32, email: &str, secret: &str) -> Result<String, AuthError> {
    let claims = AuthenticatedUser {
        sub: user_id,
        email: email.to_string(),
        exp: chrono::Utc::now().timestamp() + TOKEN_TTL_SECS,
    };
    let payload = serde_json::to_string(&claims).map_err(|_| AuthError::InvalidToken)?;

    let header_b64 = URL_SAFE_NO_PAD.encode(TOKEN_HEADER);
    let payload_b64 = URL_SAFE_NO_PAD.encode(payload);
    let signing_input = format!("{header_b64}.{payload_b64}");
    let signature = sign(&signing_input, secret)?;

    Ok(format!(
        "{signing_input}.{}",
        URL_SAFE_NO_PAD.encode(signature)
    ))
}

/// Verify the signature and expiration of a token and return its claims.
pub fn decode_token(token: &str, secret: &str) -> Result<AuthenticatedUser, AuthError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::InvalidToken);
    }

    let signing_input = format!("{}.{}", parts[0], parts[1]);
    let signature = URL_SAFE_NO_PAD
        .decode(parts[2])
        .map_err(|_| AuthError::InvalidToken)?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| AuthError::Misconfigured)?;
    mac.update(signing_input.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| AuthError::InvalidToken)?;

    let payload = URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|_| AuthError::InvalidToken)?;
    let claims: AuthenticatedUser =
        serde_json::from_slice(&payload).map_err(|_| AuthError::InvalidToken)?;

    if claims.exp < chrono::Utc::now().timestamp() {
        return Err(AuthError::Expired);
    }

    Ok(claims)
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn extract_bearer_token(authorization: &str) -> Result<&str, AuthError> {
    match authorization.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::InvalidHeader),
    }
}

/// Hash a password with Argon2id, returning a PHC format string.
pub fn hash_password(raw: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(OsRng);
    let hash = Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map_err(|_| AuthError::Hashing)?;

    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string.
pub fn verify_password(raw: &str, phc_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(phc_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(raw.as_bytes(), &parsed)
        .is_ok()
}

fn sign(input: &str, secret: &str) -> Result<Vec<u8>, AuthError> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| AuthError::Misconfigured)?;
    mac.update(input.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AuthError> {
    let config = req
        .app_data::<web::Data<ServerConfig>>()
        .ok_or(AuthError::Misconfigured)?;
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;
    let token = extract_bearer_token(authorization)?;

    decode_token(token, &config.secret)
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
