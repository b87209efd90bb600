use kp_core::{CoreError, TokenKind};

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Malformed token: {message} {location}")]
    Malformed {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token signature mismatch {location}")]
    SignatureInvalid { location: ErrorLocation },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("JWT encode failed: {source} {location}")]
    JwtEncode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Token type mismatch: expected {expected}, got {actual} {location}")]
    TypeMismatch {
        expected: TokenKind,
        actual: TokenKind,
        location: ErrorLocation,
    },

    #[error("Token no longer matches the stored pair {location}")]
    StaleToken { location: ErrorLocation },

    #[error("There are no linked tokens for this user {location}")]
    NoLinkedTokens { location: ErrorLocation },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("Password hashing failed: {message} {location}")]
    PasswordHash {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token store failure: {source} {location}")]
    Store {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Stable machine-readable code for logging and tests. Never sent to
    /// clients; the HTTP boundary collapses these to a generic response.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Malformed { .. } => "MALFORMED_TOKEN",
            Self::SignatureInvalid { .. } => "SIGNATURE_INVALID",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::JwtEncode { .. } => "JWT_ENCODE_FAILED",
            Self::JwtDecode { .. } => "JWT_DECODE_FAILED",
            Self::TypeMismatch { .. } => "TYPE_MISMATCH",
            Self::StaleToken { .. } => "STALE_OR_REVOKED",
            Self::NoLinkedTokens { .. } => "NO_LINKED_TOKENS",
            Self::InvalidClaim { .. } => "INVALID_CLAIM",
            Self::MissingHeader { .. } => "MISSING_AUTH_HEADER",
            Self::InvalidScheme { .. } => "INVALID_AUTH_SCHEME",
            Self::PasswordHash { .. } => "PASSWORD_HASH_FAILED",
            Self::Store { .. } => "TOKEN_STORE_FAILURE",
        }
    }
}

impl From<CoreError> for AuthError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Store {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
