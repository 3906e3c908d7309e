//! Role enum shared by user accounts and project memberships.
//!
//! A user carries a default role, and each membership carries a role scoped
//! to that project. Authorization decisions use the membership role; the
//! account role only seeds new memberships.
//!
//! # Schema
//!
//! ```sql
//! CREATE TYPE project_role AS ENUM ('admin', 'manager', 'member');
//! ```

use serde::{Deserialize, Serialize};

/// Role of a user, globally or within a single project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full control over the project, including membership changes
    Admin,

    /// Can manage the board and its tasks
    Manager,

    /// Can work on tasks but not administer the project
    Member,
}

impl Role {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Member => "member",
        }
    }

    /// Whether this role may administer a project
    ///
    /// True for Admin and Manager, false for Member. Callers with no
    /// membership row at all are denied before this predicate is consulted.
    pub fn can_manage_project(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Member
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Manager.as_str(), "manager");
        assert_eq!(Role::Member.as_str(), "member");
    }

    #[test]
    fn test_can_manage_project() {
        assert!(Role::Admin.can_manage_project());
        assert!(Role::Manager.can_manage_project());
        assert!(!Role::Member.can_manage_project());
    }

    #[test]
    fn test_default_role_is_member() {
        assert_eq!(Role::default(), Role::Member);
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&Role::Manager).unwrap();
        assert_eq!(json, "\"manager\"");

        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}
