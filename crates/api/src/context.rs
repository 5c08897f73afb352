use shopcore_auth::Role;
use shopcore_core::UserId;

/// Verified caller identity for a request.
///
/// Inserted by the gatekeeper middleware after token verification; this is
/// the only channel through which handlers learn who is calling. Handlers
/// never read identity from client-supplied headers or bodies.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AuthContext {
    user_id: UserId,
    role: Role,
}

impl AuthContext {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }
}
