use serde::{Deserialize, Serialize};

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// The stored refresh token being exchanged
    pub refresh_token: String,
}
