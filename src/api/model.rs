use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Backend-issued user identifier.
///
/// The backend hands out integers, but the id is echoed back verbatim, so
/// whatever JSON form it arrived in is the form it is sent in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for UserId {
    fn from(n: i64) -> Self {
        UserId::Number(n)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        UserId::Text(s.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "userId", default)]
    pub user_id: Option<UserId>,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

/// Body of every response that only carries a status line for the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "movieId")]
    pub movie_id: i64,
    pub title: String,
    #[serde(default)]
    pub genres: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRating {
    #[serde(rename = "movieId")]
    pub movie_id: i64,
    pub title: String,
    #[serde(default)]
    pub genres: String,
    #[serde(deserialize_with = "deserialize_stars")]
    pub rating: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct RateMovieRequest {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "movieId")]
    pub movie_id: i64,
    pub rating: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddMovieRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<UserId>,
    pub title: String,
    pub genres: String,
}

// Ratings are stored as floats on the backend (4.0, 3.5).
fn deserialize_stars<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.round().clamp(1.0, 5.0) as u8)
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Http { status: u16, message: Option<String> },
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl ApiError {
    /// The `message` field of an error response, if the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
