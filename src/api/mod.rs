//! REST collaborators.
//!
//! Every data view talks to the backend through one of these sources; all of
//! them share an [`ApiClient`] that carries the session's bearer token.

mod incidents;
mod users;

pub use incidents::*;
pub use users::*;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{AppError, ErrorResponse};
use crate::session::SessionProvider;

/// Response body: either the bare value or a `{"data": ...}` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Envelope { data: T },
    Bare(T),
}

impl<T> Payload<T> {
    fn into_inner(self) -> T {
        match self {
            Payload::Envelope { data } => data,
            Payload::Bare(value) => value,
        }
    }
}

/// HTTP client bound to one backend and one session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionProvider>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: Arc<dyn SessionProvider>,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn from_config(config: &Config, session: Arc<dyn SessionProvider>) -> Result<Self, AppError> {
        Self::new(config.api_url.clone(), config.request_timeout, session)
    }

    pub fn session(&self) -> &dyn SessionProvider {
        self.session.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.session.authorize(self.http.request(method, url))
    }

    /// Send a request and turn non-2xx answers into errors.
    async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "Backend responded");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = ErrorResponse::message_from_body(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
        Err(AppError::from_status(status.as_u16(), message))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        let body = response.text().await?;
        let payload: Payload<T> = serde_json::from_str(&body)?;
        Ok(payload.into_inner())
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), AppError> {
        self.send(self.request(Method::PUT, path).json(body)).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_accepts_bare_and_envelope() {
        let bare: Payload<Vec<i64>> = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(bare.into_inner(), vec![1, 2, 3]);

        let wrapped: Payload<Vec<i64>> =
            serde_json::from_str(r#"{"success":true,"data":[4],"revisionId":3}"#).unwrap();
        assert_eq!(wrapped.into_inner(), vec![4]);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new(
            "http://localhost:8080/",
            Duration::from_secs(5),
            Arc::new(crate::session::StaticSession::anonymous()),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
