//! Sign-in boundary

use super::{Role, User, DEMO_MEMBER_ID};
use crate::error::AuthError;
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use uuid::Uuid;

/// Trait for sign-in, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Sign in with the given credentials and role
    async fn login(&self, email: &str, password: &str, role: Role) -> Result<User, AuthError>;
}

/// Accepts any non-empty credentials after a fixed delay
#[derive(Debug, Clone)]
pub struct SimulatedAuth {
    delay: Duration,
}

impl SimulatedAuth {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl AuthProvider for SimulatedAuth {
    async fn login(&self, email: &str, password: &str, role: Role) -> Result<User, AuthError> {
        tokio::time::sleep(self.delay).await;

        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        Ok(User {
            id: Uuid::new_v4().to_string(),
            name: role.display_name().to_string(),
            email: email.trim().to_string(),
            role,
            member_id: (role == Role::Member).then(|| DEMO_MEMBER_ID.to_string()),
            signed_in_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_any_credentials_accepted() {
        let auth = SimulatedAuth::new(Duration::ZERO);
        let user = assert_ok!(auth.login("officer@sacco.test", "x", Role::LoanOfficer).await);
        assert_eq!(user.name, "Loan Officer");
        assert_eq!(user.role, Role::LoanOfficer);
        assert!(user.member_id.is_none());
    }

    #[tokio::test]
    async fn test_member_login_links_member_record() {
        let auth = SimulatedAuth::new(Duration::ZERO);
        let user = auth.login("jd@sacco.test", "pw", Role::Member).await.unwrap();
        assert_eq!(user.member_id.as_deref(), Some(DEMO_MEMBER_ID));
    }

    #[tokio::test]
    async fn test_empty_credentials_rejected() {
        let auth = SimulatedAuth::new(Duration::ZERO);
        assert_eq!(
            auth.login("  ", "pw", Role::Admin).await,
            Err(AuthError::MissingCredentials)
        );
        let err = assert_err!(auth.login("a@b.c", "", Role::Admin).await);
        assert_eq!(err, AuthError::MissingCredentials);
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_for_delay() {
        let auth = SimulatedAuth::new(Duration::from_secs(1));
        let start = tokio::time::Instant::now();
        assert_ok!(auth.login("a@b.c", "pw", Role::Admin).await);
        assert!(start.elapsed() >= Duration::from_secs(1));
    }
}
