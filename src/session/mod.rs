//! Signed-in user, the stored session record and the sign-in boundary

mod auth;
mod store;

pub use auth::{AuthProvider, SimulatedAuth};
#[cfg(test)]
pub use auth::MockAuthProvider;
pub use store::{Session, SessionStore};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Member record linked to the demo member account
pub const DEMO_MEMBER_ID: &str = "M001";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Admin,
    LoanOfficer,
    Accountant,
    Member,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Admin,
        Role::LoanOfficer,
        Role::Accountant,
        Role::Member,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::LoanOfficer => "Loan Officer",
            Self::Accountant => "Accountant",
            Self::Member => "Member",
        }
    }

    /// Name given to a user signing in with this role
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Admin => "Admin User",
            Self::LoanOfficer => "Loan Officer",
            Self::Accountant => "Accountant",
            Self::Member => "John Doe",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Admin => Self::LoanOfficer,
            Self::LoanOfficer => Self::Accountant,
            Self::Accountant => Self::Member,
            Self::Member => Self::Admin,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Admin => Self::Member,
            Self::LoanOfficer => Self::Admin,
            Self::Accountant => Self::LoanOfficer,
            Self::Member => Self::Accountant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Set for member logins, links the user to their own accounts
    pub member_id: Option<String>,
    pub signed_in_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_cycle_visits_every_role() {
        let mut role = Role::default();
        for expected in Role::ALL.iter().skip(1) {
            role = role.next();
            assert_eq!(role, *expected);
        }
        assert_eq!(role.next(), Role::Admin);
        assert_eq!(Role::Admin.prev(), Role::Member);
    }

    #[test]
    fn test_role_serializes_snake_case() {
        let json = serde_json::to_string(&Role::LoanOfficer).unwrap();
        assert_eq!(json, "\"loan_officer\"");
    }
}
