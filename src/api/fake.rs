//! In-memory `Backend` that records every call and answers with canned
//! responses.

use async_trait::async_trait;
use std::sync::Mutex;

use super::backend::Backend;
use super::model::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String),
    Register { username: String, is_admin: bool },
    Recommendations(UserId),
    RateMovie { user_id: UserId, movie_id: i64, rating: f64 },
    UserRatings(UserId),
    AddMovie { user_id: Option<UserId>, title: String, genres: String },
    DeleteMovie(i64),
}

#[derive(Debug, Clone)]
pub enum Canned<T> {
    Ok(T),
    Http(u16, Option<&'static str>),
    Protocol,
}

impl<T: Default> Default for Canned<T> {
    fn default() -> Self {
        Canned::Ok(T::default())
    }
}

impl<T: Clone> Canned<T> {
    fn answer(&self) -> ApiResult<T> {
        match self {
            Canned::Ok(value) => Ok(value.clone()),
            Canned::Http(status, message) => Err(ApiError::Http {
                status: *status,
                message: message.map(str::to_string),
            }),
            Canned::Protocol => Err(ApiError::Protocol("canned".to_string())),
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeBackend {
    pub calls: Mutex<Vec<Call>>,
    pub login: Canned<LoginResponse>,
    pub register: Canned<MessageResponse>,
    pub recommendations: Canned<Vec<Recommendation>>,
    pub rate_movie: Canned<MessageResponse>,
    pub user_ratings: Canned<Vec<UserRating>>,
    pub add_movie: Canned<MessageResponse>,
    pub delete_movie: Canned<MessageResponse>,
}

impl FakeBackend {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn message(text: &str) -> MessageResponse {
    MessageResponse {
        message: Some(text.to_string()),
    }
}

pub fn login_ok(user_id: UserId, is_admin: bool) -> Canned<LoginResponse> {
    Canned::Ok(LoginResponse {
        message: Some("Login successful".to_string()),
        user_id: Some(user_id),
        is_admin: Some(is_admin),
    })
}

pub fn recommendation(movie_id: i64, title: &str, predicted: Option<f64>) -> Recommendation {
    Recommendation {
        movie_id,
        title: title.to_string(),
        genres: "Drama".to_string(),
        predicted_rating: predicted,
    }
}

pub fn rating(movie_id: i64, title: &str, stars: u8) -> UserRating {
    UserRating {
        movie_id,
        title: title.to_string(),
        genres: "Drama".to_string(),
        rating: stars,
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn login(&self, req: &LoginRequest) -> ApiResult<LoginResponse> {
        self.push(Call::Login(req.username.clone()));
        self.login.answer()
    }

    async fn register(&self, req: &RegisterRequest) -> ApiResult<MessageResponse> {
        self.push(Call::Register {
            username: req.username.clone(),
            is_admin: req.is_admin,
        });
        self.register.answer()
    }

    async fn recommendations(&self, user_id: &UserId) -> ApiResult<Vec<Recommendation>> {
        self.push(Call::Recommendations(user_id.clone()));
        self.recommendations.answer()
    }

    async fn rate_movie(&self, req: &RateMovieRequest) -> ApiResult<MessageResponse> {
        self.push(Call::RateMovie {
            user_id: req.user_id.clone(),
            movie_id: req.movie_id,
            rating: req.rating,
        });
        self.rate_movie.answer()
    }

    async fn user_ratings(&self, user_id: &UserId) -> ApiResult<Vec<UserRating>> {
        self.push(Call::UserRatings(user_id.clone()));
        self.user_ratings.answer()
    }

    async fn add_movie(&self, req: &AddMovieRequest) -> ApiResult<MessageResponse> {
        self.push(Call::AddMovie {
            user_id: req.user_id.clone(),
            title: req.title.clone(),
            genres: req.genres.clone(),
        });
        self.add_movie.answer()
    }

    async fn delete_movie(&self, movie_id: i64) -> ApiResult<MessageResponse> {
        self.push(Call::DeleteMovie(movie_id));
        self.delete_movie.answer()
    }
}
