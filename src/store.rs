// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory principal and clinic store.
//!
//! This is the storage collaborator the auth core depends on: user lookup by
//! id or case-insensitive email, race-safe user creation, and clinic
//! existence checks for tenant binding. Persistence behind these contracts
//! (database, migrations) lives outside this service.
//!
//! Email uniqueness is authoritative here: the lowercased-email index is
//! checked and written under the same `&mut self` borrow, so two concurrent
//! registrations for one email can never both succeed regardless of what the
//! caller pre-checked.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::auth::Role;

/// Store-level errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// The email is already bound to a principal (case-insensitive).
    #[error("email {0} is already registered")]
    EmailTaken(String),
    /// The referenced clinic does not exist.
    #[error("clinic {0} not found")]
    ClinicNotFound(i64),
}

/// A persisted principal.
///
/// Internal record only: it carries the password hash and is deliberately
/// not serializable. The outward projection is
/// [`UserResponse`](crate::models::UserResponse).
#[derive(Debug, Clone)]
pub struct StoredUser {
    /// Store-generated identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Email, globally unique (case-insensitive)
    pub email: String,
    /// Argon2 PHC string; never leaves the store layer except for verification
    pub password_hash: String,
    /// Authorization role
    pub role: Role,
    /// Clinic binding (staff only)
    pub clinic_id: Option<i64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a principal.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub clinic_id: Option<i64>,
}

/// A persisted clinic (tenant).
#[derive(Debug, Clone)]
pub struct StoredClinic {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// In-memory store for principals and clinics.
#[derive(Default)]
pub struct InMemoryStore {
    users: HashMap<i64, StoredUser>,
    /// Lowercased email -> user id. The authoritative uniqueness guard.
    email_index: HashMap<String, i64>,
    clinics: HashMap<i64, StoredClinic>,
    next_user_id: i64,
    next_clinic_id: i64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a principal by email, case-insensitively.
    ///
    /// The returned record includes the password hash for verification.
    pub fn find_user_by_email(&self, email: &str) -> Option<StoredUser> {
        let key = email.trim().to_lowercase();
        self.email_index
            .get(&key)
            .and_then(|id| self.users.get(id))
            .cloned()
    }

    /// Look up a principal by id.
    pub fn find_user_by_id(&self, id: i64) -> Option<StoredUser> {
        self.users.get(&id).cloned()
    }

    /// Create a principal, enforcing case-insensitive email uniqueness.
    ///
    /// Check and insert happen atomically under the caller's write lock;
    /// a duplicate email fails with [`StoreError::EmailTaken`] and leaves
    /// no record behind.
    pub fn create_user(&mut self, new_user: NewUser) -> Result<StoredUser, StoreError> {
        let key = new_user.email.trim().to_lowercase();
        if self.email_index.contains_key(&key) {
            return Err(StoreError::EmailTaken(new_user.email));
        }

        self.next_user_id += 1;
        let now = Utc::now();
        let user = StoredUser {
            id: self.next_user_id,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            clinic_id: new_user.clinic_id,
            created_at: now,
            updated_at: now,
        };

        self.email_index.insert(key, user.id);
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// All principals, ordered by id.
    pub fn list_users(&self) -> Vec<StoredUser> {
        let mut users: Vec<StoredUser> = self.users.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        users
    }

    /// Check whether a clinic exists.
    pub fn clinic_exists(&self, clinic_id: i64) -> bool {
        self.clinics.contains_key(&clinic_id)
    }

    /// Create a clinic.
    pub fn create_clinic(&mut self, name: impl Into<String>) -> StoredClinic {
        self.next_clinic_id += 1;
        let clinic = StoredClinic {
            id: self.next_clinic_id,
            name: name.into(),
            created_at: Utc::now(),
        };
        self.clinics.insert(clinic.id, clinic.clone());
        clinic
    }

    /// Staff (doctors and receptionists) bound to a clinic, ordered by id.
    pub fn list_staff(&self, clinic_id: i64) -> Result<Vec<StoredUser>, StoreError> {
        if !self.clinic_exists(clinic_id) {
            return Err(StoreError::ClinicNotFound(clinic_id));
        }

        let mut staff: Vec<StoredUser> = self
            .users
            .values()
            .filter(|u| u.role.is_staff() && u.clinic_id == Some(clinic_id))
            .cloned()
            .collect();
        staff.sort_by_key(|u| u.id);
        Ok(staff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str, role: Role, clinic_id: Option<i64>) -> NewUser {
        NewUser {
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$test".to_string(),
            role,
            clinic_id,
        }
    }

    #[test]
    fn create_user_assigns_sequential_ids() {
        let mut store = InMemoryStore::new();
        let a = store
            .create_user(new_user("a@x.com", Role::Patient, None))
            .unwrap();
        let b = store
            .create_user(new_user("b@x.com", Role::Patient, None))
            .unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[test]
    fn duplicate_email_is_rejected_case_insensitively() {
        let mut store = InMemoryStore::new();
        store
            .create_user(new_user("jane@x.com", Role::Patient, None))
            .unwrap();

        let err = store
            .create_user(new_user("Jane@X.COM", Role::Patient, None))
            .unwrap_err();
        assert!(matches!(err, StoreError::EmailTaken(_)));
        assert_eq!(store.list_users().len(), 1);
    }

    #[test]
    fn find_by_email_is_case_insensitive_and_includes_hash() {
        let mut store = InMemoryStore::new();
        store
            .create_user(new_user("jane@x.com", Role::Patient, None))
            .unwrap();

        let found = store.find_user_by_email("JANE@x.com").unwrap();
        assert_eq!(found.email, "jane@x.com");
        assert_eq!(found.password_hash, "$argon2id$test");
        assert!(store.find_user_by_email("missing@x.com").is_none());
    }

    #[test]
    fn find_by_id_returns_record() {
        let mut store = InMemoryStore::new();
        let created = store
            .create_user(new_user("jane@x.com", Role::Patient, None))
            .unwrap();
        assert_eq!(store.find_user_by_id(created.id).unwrap().id, created.id);
        assert!(store.find_user_by_id(999).is_none());
    }

    #[test]
    fn clinic_exists_and_create() {
        let mut store = InMemoryStore::new();
        assert!(!store.clinic_exists(1));
        let clinic = store.create_clinic("North Clinic");
        assert!(store.clinic_exists(clinic.id));
    }

    #[test]
    fn list_staff_filters_by_clinic_and_role() {
        let mut store = InMemoryStore::new();
        let clinic_a = store.create_clinic("A");
        let clinic_b = store.create_clinic("B");

        store
            .create_user(new_user("doc@x.com", Role::Doctor, Some(clinic_a.id)))
            .unwrap();
        store
            .create_user(new_user("rec@x.com", Role::Receptionist, Some(clinic_a.id)))
            .unwrap();
        store
            .create_user(new_user("other@x.com", Role::Doctor, Some(clinic_b.id)))
            .unwrap();
        store
            .create_user(new_user("pat@x.com", Role::Patient, None))
            .unwrap();

        let staff = store.list_staff(clinic_a.id).unwrap();
        assert_eq!(staff.len(), 2);
        assert!(staff.iter().all(|u| u.clinic_id == Some(clinic_a.id)));

        assert!(matches!(
            store.list_staff(99),
            Err(StoreError::ClinicNotFound(99))
        ));
    }
}
