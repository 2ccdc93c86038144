use uuid::Uuid;

/// Identifiers shared by every probe of one run, so the service sees a
/// single continuous client session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: String,
    session_id: String,
}

impl Session {
    /// Fresh `testuser_<uuid>` / `test_<uuid>` pair
    pub fn generate() -> Self {
        Self {
            user_id: format!("testuser_{}", Uuid::new_v4()),
            session_id: format!("test_{}", Uuid::new_v4()),
        }
    }

    pub fn from_parts(user_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: session_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}
