//! Demo authentication. Credentials are checked against a fixed pair of mock
//! users and a shared demo password; there is no password storage or session
//! persistence. The service exists to supply the actor id that every
//! mutating buyer operation records.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use log::{info, warn};

use crate::backend::domain::errors::DomainError;
use crate::backend::domain::models::user::{User, UserRole};

const DEMO_PASSWORD: &str = "demo123";

/// Service tracking the signed-in user.
#[derive(Clone)]
pub struct AuthService {
    users: Vec<User>,
    current: Arc<Mutex<Option<User>>>,
}

impl AuthService {
    pub fn new() -> Self {
        Self {
            users: vec![
                User {
                    id: "user1".to_string(),
                    email: "admin@company.com".to_string(),
                    name: "Admin User".to_string(),
                    role: UserRole::Admin,
                },
                User {
                    id: "user2".to_string(),
                    email: "agent@company.com".to_string(),
                    name: "Sales Agent".to_string(),
                    role: UserRole::Agent,
                },
            ],
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// Check credentials and, on success, make the user current.
    pub fn sign_in(&self, email: &str, password: &str) -> Option<User> {
        let user = self.users.iter().find(|u| u.email == email);
        match user {
            Some(user) if password == DEMO_PASSWORD => {
                info!("Signed in: {} ({})", user.name, user.id);
                *self.current_slot() = Some(user.clone());
                Some(user.clone())
            }
            _ => {
                warn!("Sign-in rejected for {}", email);
                None
            }
        }
    }

    pub fn sign_out(&self) {
        *self.current_slot() = None;
    }

    pub fn current_user(&self) -> Option<User> {
        self.current_slot().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_slot().is_some()
    }

    /// Return the current user, failing if nobody is signed in.
    pub fn require_auth(&self) -> Result<User> {
        self.current_user()
            .ok_or_else(|| DomainError::Validation("Authentication required".to_string()).into())
    }

    fn current_slot(&self) -> std::sync::MutexGuard<'_, Option<User>> {
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_with_valid_credentials() {
        let service = AuthService::new();
        let user = service.sign_in("admin@company.com", "demo123").unwrap();
        assert_eq!(user.id, "user1");
        assert_eq!(user.role, UserRole::Admin);
        assert!(service.is_authenticated());
        assert_eq!(service.current_user().unwrap().id, "user1");
    }

    #[test]
    fn test_sign_in_rejects_bad_credentials() {
        let service = AuthService::new();
        assert!(service.sign_in("admin@company.com", "wrong").is_none());
        assert!(service.sign_in("nobody@company.com", "demo123").is_none());
        assert!(!service.is_authenticated());
    }

    #[test]
    fn test_sign_out_clears_current_user() {
        let service = AuthService::new();
        service.sign_in("agent@company.com", "demo123").unwrap();
        service.sign_out();
        assert!(service.current_user().is_none());
    }

    #[test]
    fn test_require_auth() {
        let service = AuthService::new();
        assert!(service.require_auth().is_err());
        service.sign_in("agent@company.com", "demo123").unwrap();
        assert_eq!(service.require_auth().unwrap().id, "user2");
    }
}
