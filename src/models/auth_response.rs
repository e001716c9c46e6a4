use serde::{Deserialize, Serialize};

use super::user::User;

/// Wire response of the `/auth/login`, `/auth/register` and
/// `/auth/refresh` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// JWT access token for subsequent API calls
    pub access_token: String,
    /// Refresh token for obtaining new access tokens (longer-lived).
    /// Refresh responses may omit it, in which case the stored one is kept.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Authenticated user, when the endpoint returns one
    #[serde(default)]
    pub user: Option<User>,
}
