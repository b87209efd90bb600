pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

pub use api::{
    claim_context::ClaimContext,
    error::{ApiError, Result as ApiResult},
    extractors::current_user::CurrentUser,
    users::{
        login_request::LoginRequest,
        me_response::MeResponse,
        signup_request::SignUpRequest,
        users::{login, logout, me, refresh, register},
    },
};

pub use crate::routes::build_router;
pub use crate::state::AppState;
