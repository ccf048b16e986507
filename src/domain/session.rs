//! Read-only view of who is signed in.
//!
//! A [`Session`] is built once from the backend's `auth/me` answer and handed
//! to the components that gate on it. Nothing mutates it afterwards.

use lensclub_api_types::{CurrentUserRecord, RecordId};

use super::types::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: RecordId,
    pub username: String,
    pub role: Role,
}

impl From<CurrentUserRecord> for CurrentUser {
    fn from(record: CurrentUserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            role: Role::from_wire(&record.role),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<CurrentUser>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: CurrentUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| user.role == Role::Admin)
    }
}
