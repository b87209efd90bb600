pub mod token_pair_repository;
pub mod user_repository;
