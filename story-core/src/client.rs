use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// Shared HTTP client bound to one API base URL. All requests go through
/// the helpers here so status-to-error mapping lives in one place.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

/// `{token}` body used by delete and favorite calls.
#[derive(Debug, Serialize)]
pub(crate) struct TokenBody<'a> {
    pub token: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Response, ApiError> {
        let response = self.http.get(self.url(path)).query(query).send().await?;
        self.check(response).await
    }

    pub(crate) async fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, ApiError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        self.check(response).await
    }

    pub(crate) async fn patch_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, ApiError> {
        let response = self.http.patch(self.url(path)).json(body).send().await?;
        self.check(response).await
    }

    pub(crate) async fn delete_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response, ApiError> {
        let response = self.http.delete(self.url(path)).json(body).send().await?;
        self.check(response).await
    }

    /// Pass 2xx responses through; translate everything else into the
    /// matching error variant, keeping the server's message when it sends
    /// one.
    async fn check(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error.message)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_owned());
        debug!(status = status.as_u16(), %message, "request rejected");
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Auth(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::Validation(message)
            }
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            _ => ApiError::Server {
                status: status.as_u16(),
                message,
            },
        })
    }
}
