use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use serde::Serialize;
use uuid::Uuid;

use crate::models::UserId;

/// A logged-in user
#[derive(Debug, Clone, Serialize)]
pub struct UserSession {
    pub session_id: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Process-wide mapping from session id to logged-in user
#[derive(Default)]
pub struct SessionDirectory {
    sessions: DashMap<String, Arc<UserSession>>,
}

impl SessionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new session for `user_id` under a freshly generated id
    pub fn open(&self, user_id: UserId) -> Arc<UserSession> {
        loop {
            let session_id = Uuid::new_v4().to_string();
            match self.sessions.entry(session_id.clone()) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(entry) => {
                    let session = Arc::new(UserSession {
                        session_id,
                        user_id,
                        created_at: Utc::now(),
                    });
                    entry.insert(session.clone());
                    return session;
                }
            }
        }
    }

    pub fn get(&self, session_id: &str) -> Option<Arc<UserSession>> {
        self.sessions.get(session_id).map(|s| s.value().clone())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
