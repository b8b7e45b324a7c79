use kernel::id::UserId;

use super::role::Role;

/// Authenticated caller, derived from the credential on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Token subject (the user's email)
    pub subject: String,
    pub user_id: UserId,
    /// First entry of the role list
    pub role: Role,
}
