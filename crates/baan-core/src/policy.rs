//! Post access-control rules.
//!
//! Authorization is a pure function of the verified claim and the target
//! post, so the rules are unit-testable without storage or HTTP plumbing.
//! Handlers check existence first and only then consult these rules: a
//! missing id always reads as not-found, never as forbidden.

use crate::domain::{Claim, Post};
use crate::error::DomainError;

/// Whether `claim` may edit or delete `post`. Only the owner and admins
/// qualify; additive social actions (like, comment) are not gated here.
pub fn can_modify(claim: &Claim, post: &Post) -> bool {
    claim.is_admin() || post.owner_id == claim.user_id
}

/// Guard for edit/delete. Authenticated-but-unauthorized callers get
/// `Forbidden`, a distinct outcome from any credential failure.
pub fn ensure_can_modify(claim: &Claim, post: &Post) -> Result<(), DomainError> {
    if can_modify(claim, post) {
        Ok(())
    } else {
        Err(DomainError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::domain::Role;

    fn claim(user_id: Uuid, role: Role) -> Claim {
        Claim { user_id, role }
    }

    fn post_owned_by(owner_id: Uuid) -> Post {
        Post::new(
            owner_id,
            "title".to_string(),
            "content".to_string(),
            None,
            None,
        )
    }

    #[test]
    fn owner_may_modify() {
        let owner = Uuid::new_v4();
        let post = post_owned_by(owner);
        assert!(can_modify(&claim(owner, Role::User), &post));
    }

    #[test]
    fn admin_may_modify_any_post() {
        let post = post_owned_by(Uuid::new_v4());
        assert!(can_modify(&claim(Uuid::new_v4(), Role::Admin), &post));
    }

    #[test]
    fn other_users_are_forbidden() {
        let post = post_owned_by(Uuid::new_v4());
        let outsider = claim(Uuid::new_v4(), Role::User);
        assert!(!can_modify(&outsider, &post));
        assert!(matches!(
            ensure_can_modify(&outsider, &post),
            Err(DomainError::Forbidden)
        ));
    }

    #[test]
    fn ensure_passes_for_owner() {
        let owner = Uuid::new_v4();
        let post = post_owned_by(owner);
        assert!(ensure_can_modify(&claim(owner, Role::User), &post).is_ok());
    }
}
