use crate::token_store::TokenPair;

use super::user::User;

/// Outcome of a successful login or registration.
///
/// By the time a caller sees this value, the tokens have already been
/// persisted to the client's token store.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    /// The authenticated user, when the server returned one
    pub user: Option<User>,
    /// The issued token pair
    pub tokens: TokenPair,
}
