pub mod claims;
pub mod error;
pub mod password;
pub mod token_codec;
pub mod token_issuer;
pub mod token_validator;

pub use claims::Claims;
pub use error::{AuthError, Result};
pub use password::{hash_password, verify_password};
pub use token_codec::TokenCodec;
pub use token_issuer::{IssuedTokens, TokenIssuer};
pub use token_validator::TokenValidator;

#[cfg(test)]
mod tests;
