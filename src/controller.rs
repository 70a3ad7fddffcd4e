use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::*;
use crate::session::Session;
use crate::star::{StarRating, MAX_STARS};

pub const LOGIN_REQUIRED: &str = "Please enter your username and password.";
pub const LOGIN_FAILED: &str = "Invalid username or password.";
pub const REGISTER_REQUIRED: &str = "Please provide a valid username and password.";
pub const REGISTER_FAILED: &str = "Error registering. Please try again later.";
pub const NO_USER_ID: &str = "User ID not available. Please try logging in again.";
pub const NO_RECOMMENDATIONS: &str = "No recommendations available at this time.";
pub const INVALID_RECOMMENDATIONS: &str = "Invalid recommendation data received.";
pub const RECOMMENDATIONS_FAILED: &str = "Error fetching recommendations.";
pub const RATING_OUT_OF_RANGE: &str = "Rating must be between 1 and 5.";
pub const RATING_FAILED: &str = "Error submitting rating";
pub const ADD_UNAUTHORIZED: &str = "Unauthorized. Only admins can add movies.";
pub const ADD_REQUIRED: &str = "Please provide both title and genres.";
pub const ADD_FAILED: &str = "Error adding movie. Please try again later.";
pub const DELETE_UNAUTHORIZED: &str = "Unauthorized. Only admins can delete movies.";
pub const DELETE_FAILED: &str = "Error deleting movie. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Inline status line of the recommendations section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: &str) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.to_string(),
        }
    }

    pub fn error(text: &str) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Admin add-movie form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMovieDraft {
    pub title: String,
    pub genres: String,
}

/// Owns the session and everything derived from it, and keeps it in step
/// with the backend.
///
/// Lists are only ever replaced as a whole. Nothing for recommendations or
/// ratings is fetched while the session is an admin session.
pub struct SessionController {
    backend: Arc<dyn Backend>,
    session: Session,
    message: Option<String>,
    recommendations: Vec<Recommendation>,
    recommendation_notice: Option<Notice>,
    user_ratings: Vec<UserRating>,
    rating_message: Option<String>,
    new_movie: NewMovieDraft,
    admin_message: Option<String>,
}

impl SessionController {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            session: Session::default(),
            message: None,
            recommendations: Vec::new(),
            recommendation_notice: None,
            user_ratings: Vec::new(),
            rating_message: None,
            new_movie: NewMovieDraft::default(),
            admin_message: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn recommendation_notice(&self) -> Option<&Notice> {
        self.recommendation_notice.as_ref()
    }

    pub fn user_ratings(&self) -> &[UserRating] {
        &self.user_ratings
    }

    pub fn rating_message(&self) -> Option<&str> {
        self.rating_message.as_deref()
    }

    pub fn new_movie(&self) -> &NewMovieDraft {
        &self.new_movie
    }

    pub fn admin_message(&self) -> Option<&str> {
        self.admin_message.as_deref()
    }

    /// The user's current rating for `movie_id`, 0 when unrated.
    pub fn rating_for(&self, movie_id: i64) -> u8 {
        self.user_ratings
            .iter()
            .find(|r| r.movie_id == movie_id)
            .map(|r| r.rating)
            .unwrap_or(0)
    }

    pub fn star_for(&self, movie_id: i64) -> StarRating {
        StarRating::new(movie_id, self.rating_for(movie_id))
    }

    pub async fn login(&mut self, username: &str, password: &str) {
        if username.is_empty() || password.is_empty() {
            self.message = Some(LOGIN_REQUIRED.to_string());
            return;
        }

        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        match self.backend.login(&req).await {
            Ok(resp) => {
                self.session = Session::logged_in(username, &resp);
                self.message = resp.message;
                info!(
                    username = %username,
                    is_admin = self.session.is_admin,
                    "Logged in"
                );
                self.on_session_changed().await;
            }
            Err(e) => {
                warn!(username = %username, error = %e, "Login failed");
                self.message = Some(e.server_message().unwrap_or(LOGIN_FAILED).to_string());
            }
        }
    }

    // Runs once per successful login.
    async fn on_session_changed(&mut self) {
        if self.session.is_member() {
            self.fetch_user_ratings().await;
        }
    }

    pub async fn register(&mut self, username: &str, password: &str, is_admin: bool) {
        if username.is_empty() || password.is_empty() {
            self.message = Some(REGISTER_REQUIRED.to_string());
            return;
        }

        let req = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            is_admin,
        };
        match self.backend.register(&req).await {
            Ok(resp) => {
                info!(username = %username, is_admin, "Registered");
                self.message = resp.message;
            }
            Err(e) => {
                warn!(username = %username, error = %e, "Registration failed");
                self.message = Some(REGISTER_FAILED.to_string());
            }
        }
    }

    pub fn logout(&mut self) {
        info!(username = %self.session.username, "Logged out");
        self.session = Session::default();
        self.message = None;
        self.recommendations.clear();
        self.recommendation_notice = None;
        self.user_ratings.clear();
        self.rating_message = None;
        self.new_movie = NewMovieDraft::default();
        self.admin_message = None;
    }

    pub async fn fetch_recommendations(&mut self) {
        if self.session.is_admin {
            debug!("Skipping recommendations for admin session");
            return;
        }
        let Some(user_id) = self.session.user_id.clone() else {
            self.recommendation_notice = Some(Notice::error(NO_USER_ID));
            return;
        };

        self.recommendation_notice = None;
        let result = self.backend.recommendations(&user_id).await;
        self.apply_recommendations(result);
    }

    fn apply_recommendations(&mut self, result: ApiResult<Vec<Recommendation>>) {
        match result {
            Ok(list) => {
                debug!(count = list.len(), "Received recommendations");
                if list.is_empty() {
                    self.recommendation_notice = Some(Notice::info(NO_RECOMMENDATIONS));
                }
                self.recommendations = list;
            }
            Err(ApiError::Protocol(detail)) => {
                warn!(error = %detail, "Malformed recommendations");
                self.recommendation_notice = Some(Notice::error(INVALID_RECOMMENDATIONS));
                self.recommendations.clear();
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch recommendations");
                let text = e.server_message().unwrap_or(RECOMMENDATIONS_FAILED);
                self.recommendation_notice = Some(Notice::error(text));
                self.recommendations.clear();
            }
        }
    }

    pub async fn fetch_user_ratings(&mut self) {
        if self.session.is_admin {
            return;
        }
        let Some(user_id) = self.session.user_id.clone() else {
            return;
        };
        let result = self.backend.user_ratings(&user_id).await;
        self.apply_user_ratings(result);
    }

    // Failures stay in the log; the previous list is kept.
    fn apply_user_ratings(&mut self, result: ApiResult<Vec<UserRating>>) {
        match result {
            Ok(list) => {
                debug!(count = list.len(), "Received user ratings");
                self.user_ratings = list;
            }
            Err(e) => warn!(error = %e, "Failed to fetch user ratings"),
        }
    }

    pub async fn submit_rating(&mut self, movie_id: i64, rating: u8) {
        if self.session.is_admin {
            return;
        }
        let Some(user_id) = self.session.user_id.clone() else {
            self.rating_message = Some(NO_USER_ID.to_string());
            return;
        };
        if !(1..=MAX_STARS).contains(&rating) {
            self.rating_message = Some(RATING_OUT_OF_RANGE.to_string());
            return;
        }

        let req = RateMovieRequest {
            user_id: user_id.clone(),
            movie_id,
            rating: f64::from(rating),
        };
        match self.backend.rate_movie(&req).await {
            Ok(resp) => {
                info!(movie_id, rating, "Rating submitted");
                self.rating_message = resp.message;
                self.refresh_after_rating(&user_id).await;
            }
            Err(e) => {
                warn!(movie_id, rating, error = %e, "Rating failed");
                self.rating_message = Some(e.server_message().unwrap_or(RATING_FAILED).to_string());
            }
        }
    }

    // Both lists are requested at once; neither result is applied until
    // both requests have finished.
    async fn refresh_after_rating(&mut self, user_id: &UserId) {
        self.recommendation_notice = None;
        let (ratings, recommendations) = tokio::join!(
            self.backend.user_ratings(user_id),
            self.backend.recommendations(user_id)
        );
        self.apply_user_ratings(ratings);
        self.apply_recommendations(recommendations);
    }

    pub fn set_new_movie_title(&mut self, title: &str) {
        self.new_movie.title = title.to_string();
    }

    pub fn set_new_movie_genres(&mut self, genres: &str) {
        self.new_movie.genres = genres.to_string();
    }

    pub async fn add_movie(&mut self) {
        if !self.session.is_admin {
            self.admin_message = Some(ADD_UNAUTHORIZED.to_string());
            return;
        }
        if self.new_movie.title.is_empty() || self.new_movie.genres.is_empty() {
            self.admin_message = Some(ADD_REQUIRED.to_string());
            return;
        }

        let req = AddMovieRequest {
            user_id: self.session.user_id.clone(),
            title: self.new_movie.title.clone(),
            genres: self.new_movie.genres.clone(),
        };
        match self.backend.add_movie(&req).await {
            Ok(resp) => {
                info!(title = %req.title, genres = %req.genres, "Movie added");
                self.admin_message = resp.message;
                self.new_movie = NewMovieDraft::default();
            }
            Err(e) => {
                warn!(title = %req.title, error = %e, "Adding movie failed");
                self.admin_message = Some(e.server_message().unwrap_or(ADD_FAILED).to_string());
            }
        }
    }

    pub async fn delete_movie(&mut self, movie_id: i64) {
        if !self.session.is_admin {
            self.admin_message = Some(DELETE_UNAUTHORIZED.to_string());
            return;
        }
        match self.backend.delete_movie(movie_id).await {
            Ok(resp) => {
                info!(movie_id, "Movie deleted");
                self.admin_message = resp.message;
            }
            Err(e) => {
                warn!(movie_id, error = %e, "Deleting movie failed");
                self.admin_message = Some(e.server_message().unwrap_or(DELETE_FAILED).to_string());
            }
        }
    }
}
