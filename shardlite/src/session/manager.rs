// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Registry of open sessions, looked up by id

use crate::catalog::PrincipalRef;
use crate::session::models::Session;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Session manager that maintains all open sessions of one database
pub struct SessionManager {
    /// Registry of all active sessions indexed by session id
    sessions: RwLock<HashMap<String, Arc<Session>>>,
    /// Case rule for session-local object names
    ignore_case: bool,
}

impl SessionManager {
    pub fn new(ignore_case: bool) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ignore_case,
        }
    }

    /// Open a new session for `user`
    pub fn create_session(&self, user: PrincipalRef) -> Arc<Session> {
        let session = Arc::new(Session::new(user, self.ignore_case));
        self.sessions
            .write()
            .insert(session.id().to_string(), session.clone());
        log::debug!("session {} opened for {}", session.id(), session.user().name);
        session
    }

    /// Get a session by id
    pub fn get_session(&self, session_id: &str) -> Option<Arc<Session>> {
        self.sessions.read().get(session_id).cloned()
    }

    /// Close and unregister a session. Returns false for unknown ids.
    pub fn remove_session(&self, session_id: &str) -> bool {
        let removed = self.sessions.write().remove(session_id);
        match removed {
            Some(session) => {
                session.close();
                true
            }
            None => false,
        }
    }

    pub fn active_session_ids(&self) -> Vec<String> {
        self.sessions.read().keys().cloned().collect()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_get_remove() {
        let manager = SessionManager::new(false);
        let user = PrincipalRef {
            id: 1,
            name: "SA".into(),
        };
        let session = manager.create_session(user);
        assert_eq!(manager.session_count(), 1);
        assert!(manager.get_session(session.id()).is_some());

        assert!(manager.remove_session(session.id()));
        assert!(!session.is_active());
        assert!(!manager.remove_session(session.id()));
        assert_eq!(manager.session_count(), 0);
    }
}
