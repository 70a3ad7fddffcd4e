use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::backend::Backend;
use super::model::*;

const USER_AGENT: &str = concat!("movierec-client/", env!("CARGO_PKG_VERSION"));

/// `Backend` over the service's JSON/HTTP API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = build_url(&self.base_url, segments);
        debug!(method = %method, url = %url, "Backend request");
        self.client.request(method, url)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> ApiResult<T> {
        decode(req.send().await?).await
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn login(&self, req: &LoginRequest) -> ApiResult<LoginResponse> {
        self.send(self.request(Method::POST, &["login"]).json(req)).await
    }

    async fn register(&self, req: &RegisterRequest) -> ApiResult<MessageResponse> {
        self.send(self.request(Method::POST, &["register"]).json(req)).await
    }

    async fn recommendations(&self, user_id: &UserId) -> ApiResult<Vec<Recommendation>> {
        let id = user_id.to_string();
        let body: Value = self.send(self.request(Method::GET, &["recommend", id.as_str()])).await?;
        match body.get("recommendations") {
            Some(list @ Value::Array(_)) => decode_list(list),
            Some(_) => Err(ApiError::Protocol("recommendations is not a list".to_string())),
            None => Err(ApiError::Protocol("missing recommendations".to_string())),
        }
    }

    async fn rate_movie(&self, req: &RateMovieRequest) -> ApiResult<MessageResponse> {
        self.send(self.request(Method::POST, &["rate-movie"]).json(req)).await
    }

    async fn user_ratings(&self, user_id: &UserId) -> ApiResult<Vec<UserRating>> {
        let id = user_id.to_string();
        let body: Value = self.send(self.request(Method::GET, &["user-ratings", id.as_str()])).await?;
        match body.get("ratings") {
            Some(list @ Value::Array(_)) => decode_list(list),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(_) => Err(ApiError::Protocol("ratings is not a list".to_string())),
        }
    }

    async fn add_movie(&self, req: &AddMovieRequest) -> ApiResult<MessageResponse> {
        self.send(self.request(Method::POST, &["admin", "add-movie"]).json(req)).await
    }

    async fn delete_movie(&self, movie_id: i64) -> ApiResult<MessageResponse> {
        let id = movie_id.to_string();
        self.send(self.request(Method::DELETE, &["admin", "delete-movie", id.as_str()]))
            .await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        // Error bodies are optional, so anything unreadable means no message.
        let message = response
            .json::<MessageResponse>()
            .await
            .ok()
            .and_then(|body| body.message);
        return Err(ApiError::Http {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Protocol(e.to_string()))
}

fn decode_list<T: DeserializeOwned>(list: &Value) -> ApiResult<Vec<T>> {
    Vec::<T>::deserialize(list).map_err(|e| ApiError::Protocol(e.to_string()))
}

fn build_url(base: &str, segments: &[&str]) -> String {
    let path: Vec<String> = segments
        .iter()
        .map(|s| urlencoding::encode(s).to_string())
        .collect();
    format!("{}/{}", base, path.join("/"))
}
