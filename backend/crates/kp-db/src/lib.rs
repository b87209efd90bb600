pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::{connect, migrate};
pub use error::{DbError, Result};
pub use repositories::token_pair_repository::TokenPairRepository;
pub use repositories::user_repository::UserRepository;
