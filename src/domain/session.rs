use secrecy::Secret;
use serde::Deserialize;

/// Read-only view of the logged-in user, as serialized by the host shell.
#[derive(Clone, Debug, Deserialize)]
pub struct Session {
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub token: Secret<String>,
    #[serde(rename = "userId")]
    pub user_id: String,
}
