pub mod login_request;
pub mod me_response;
pub mod signup_request;
pub mod users;

/// Response header carrying the refresh token (the access token rides in
/// the standard authorization header)
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";
