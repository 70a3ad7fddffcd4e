use crate::api::{LoginResponse, UserId};

/// Identity and role of the user currently using the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user_id: Option<UserId>,
    pub username: String,
    pub is_logged_in: bool,
    pub is_admin: bool,
}

impl Session {
    pub fn logged_in(username: &str, resp: &LoginResponse) -> Self {
        Self {
            user_id: resp.user_id.clone(),
            username: username.to_string(),
            is_logged_in: true,
            is_admin: resp.is_admin.unwrap_or(false),
        }
    }

    /// Recommendations and ratings exist only for logged-in non-admins.
    pub fn is_member(&self) -> bool {
        self.is_logged_in && !self.is_admin
    }
}
