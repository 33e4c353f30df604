//! Role model
//!
//! The finance role is the only authorization tier: any authenticated user
//! whose email starts with "finance", ignoring case. Every place that routes
//! on the role goes through [`is_finance_role`].

use super::user::User;

/// Email prefix granting the finance role
pub const FINANCE_PREFIX: &str = "finance";

/// Whether an email grants the finance role
pub fn is_finance_role(email: &str) -> bool {
    email.to_lowercase().starts_with(FINANCE_PREFIX)
}

/// Authorization tier of a signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// May use the billing dashboard
    Finance,
    /// Authenticated, but restricted
    Staff,
}

impl Role {
    /// Role of a user, derived from their email
    pub fn of(user: &User) -> Self {
        if is_finance_role(&user.email) {
            Role::Finance
        } else {
            Role::Staff
        }
    }
}
