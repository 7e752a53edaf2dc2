//! # Actor Context
//!
//! Who is performing an operation, and with which privileges.
//!
//! The source system kept the active user and moderator name in an ambient
//! session object. Here every privileged call receives an explicit [`Actor`]
//! value: the account being operated on, the role of the operator, and a
//! display label for audit-style descriptions. A moderator acts on the
//! admin's account data with reduced privileges — same data, fewer rights.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Role
// =============================================================================

/// Privilege level of the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// The shop owner. Full rights, including deletes and resets.
    Admin,
    /// A delegated operator. May sell, stock in, and record entries;
    /// may not delete transactions, delete variants, or reset the account.
    Moderator,
}

// =============================================================================
// Actor
// =============================================================================

/// The operator context threaded through every core call that mutates
/// account data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    /// The account whose data is being operated on (the admin's account,
    /// even when a moderator is the operator).
    pub account_id: String,
    /// Privilege level.
    pub role: Role,
    /// Display label, e.g. the shop name or the moderator's name.
    pub label: String,
}

impl Actor {
    /// Creates an admin actor for the given account.
    pub fn admin(account_id: impl Into<String>, label: impl Into<String>) -> Self {
        Actor {
            account_id: account_id.into(),
            role: Role::Admin,
            label: label.into(),
        }
    }

    /// Creates a moderator actor operating on the given admin account.
    pub fn moderator(account_id: impl Into<String>, name: impl Into<String>) -> Self {
        Actor {
            account_id: account_id.into(),
            role: Role::Moderator,
            label: name.into(),
        }
    }

    /// Fails with a permission error unless this actor is an admin.
    ///
    /// `action` names the refused operation for the error message,
    /// e.g. `"delete transactions"`.
    pub fn require_admin(&self, action: &'static str) -> CoreResult<()> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(CoreError::Permission {
                role: self.role,
                action,
            })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_passes_gate() {
        let actor = Actor::admin("acc-1", "My Shop");
        assert!(actor.require_admin("reset the account").is_ok());
    }

    #[test]
    fn test_moderator_rejected_at_gate() {
        let actor = Actor::moderator("acc-1", "Rahim");
        let err = actor.require_admin("delete transactions").unwrap_err();
        assert!(matches!(err, CoreError::Permission { .. }));
        assert_eq!(err.to_string(), "Moderator role may not delete transactions");
    }
}
