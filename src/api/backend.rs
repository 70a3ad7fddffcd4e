use async_trait::async_trait;

use super::model::*;

/// The movie recommendation service as seen by the client.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn login(&self, req: &LoginRequest) -> ApiResult<LoginResponse>;
    async fn register(&self, req: &RegisterRequest) -> ApiResult<MessageResponse>;
    async fn recommendations(&self, user_id: &UserId) -> ApiResult<Vec<Recommendation>>;
    async fn rate_movie(&self, req: &RateMovieRequest) -> ApiResult<MessageResponse>;
    async fn user_ratings(&self, user_id: &UserId) -> ApiResult<Vec<UserRating>>;
    async fn add_movie(&self, req: &AddMovieRequest) -> ApiResult<MessageResponse>;
    async fn delete_movie(&self, movie_id: i64) -> ApiResult<MessageResponse>;
}
