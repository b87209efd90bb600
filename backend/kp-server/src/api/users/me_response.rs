use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: Uuid,
    pub email: String,
    pub roles: Vec<String>,
    /// jti of the access token this request authenticated with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
}
