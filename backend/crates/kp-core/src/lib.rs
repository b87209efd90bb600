pub mod error;
pub mod models;
pub mod store;

pub use error::{CoreError, CoreResult};
pub use models::principal::Principal;
pub use models::token_kind::TokenKind;
pub use models::token_pair::TokenPair;
pub use models::user::User;
pub use store::TokenStore;
