use uuid::Uuid;

use super::Role;

/// Verified identity extracted from a session token.
///
/// The claim is trusted for the remainder of the request and never
/// re-fetched from storage, so a role change becomes visible only once the
/// token expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim {
    pub user_id: Uuid,
    pub role: Role,
}

impl Claim {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
