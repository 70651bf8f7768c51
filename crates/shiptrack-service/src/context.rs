//! Caller context carrying the authenticated identity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of the authenticated caller.
///
/// Extracted from the access cookie by the API layer and passed explicitly
/// into every service method, so each operation knows *who* is acting
/// without reaching for request-scoped state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The authenticated user's email.
    pub email: String,
    /// Whether this caller is the configured administrator.
    pub is_admin: bool,
}

impl CallerContext {
    /// Create a new caller context.
    pub fn new(user_id: Uuid, email: String, is_admin: bool) -> Self {
        Self {
            user_id,
            email,
            is_admin,
        }
    }
}
