pub mod principal;
pub mod token_kind;
pub mod token_pair;
pub mod user;
