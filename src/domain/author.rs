/// Identity used to stamp a new tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorInfo {
    pub username: String,
    pub email: String,
}

impl AuthorInfo {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        AuthorInfo {
            username: username.into(),
            email: email.into(),
        }
    }

    /// Both fields set; only a complete identity may sign a tag
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.email.is_empty()
    }

    /// At least one field set
    pub fn is_partial(&self) -> bool {
        !self.username.is_empty() || !self.email.is_empty()
    }

    /// Replace fields with explicitly provided values
    pub fn overridden_by(mut self, username: Option<&str>, email: Option<&str>) -> Self {
        if let Some(username) = username.filter(|u| !u.is_empty()) {
            self.username = username.to_string();
        }
        if let Some(email) = email.filter(|e| !e.is_empty()) {
            self.email = email.to_string();
        }
        self
    }
}
