//! Authenticated identity resolved before any core operation runs.
//!
//! The engine trusts this value as given; resolving it from an inbound
//! credential is the job of the HTTP auth extractor.

use serde::{Deserialize, Serialize};

use super::{OrganizationId, UserId};

/// Role attached to a verified identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Parses a role from its wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Role::Student),
            "admin" => Some(Role::Admin),
            "super_admin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }
}

/// Verified identity of the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub role: Role,
    pub organization_id: Option<OrganizationId>,
    pub is_active: bool,
}

impl AuthenticatedUser {
    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_known_values() {
        assert_eq!(Role::parse("student"), Some(Role::Student));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("super_admin"), Some(Role::SuperAdmin));
        assert_eq!(Role::parse("owner"), None);
    }

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::Student, Role::Admin, Role::SuperAdmin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn student_check_matches_role() {
        let user = AuthenticatedUser {
            user_id: UserId::new(),
            role: Role::Student,
            organization_id: None,
            is_active: true,
        };
        assert!(user.is_student());
        assert!(!user.is_super_admin());
    }
}
