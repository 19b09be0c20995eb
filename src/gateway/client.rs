use super::{
    config::ClientConfig,
    errors::{ApiError, RefreshError},
    flight::SingleFlight,
    navigator::Navigator,
    request::{ApiRequest, MultipartForm, RequestBody},
    session::SessionStore,
    tokens::{bearer, normalize_token_pair, TokenPair},
};
use reqwest::{header::AUTHORIZATION, Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, instrument, warn, Instrument};

/// Maximum number of error body characters kept in `ApiError::Http`.
const MAX_ERROR_CHARS: usize = 200;

type RefreshOutcome = Result<TokenPair, RefreshError>;

/// Authenticated client for the tracker API.
///
/// Every request carries the stored access token as a bearer credential. A
/// 401 on anything but the login and refresh endpoints triggers one shared
/// token refresh followed by a single replay of the request. If the refresh
/// fails the session is cleared and the navigator is sent to the login
/// location. Cloning is cheap; clones share the session and the refresh slot.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: Client,
    config: ClientConfig,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    refresh: SingleFlight<RefreshOutcome>,
}

impl ApiClient {
    /// # Errors
    /// Returns `ApiError::Config` if the configuration is invalid or the HTTP
    /// client cannot be built.
    pub fn new(
        config: ClientConfig,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        config.validate()?;

        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                config,
                session,
                navigator,
                refresh: SingleFlight::new(),
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn session(&self) -> &dyn SessionStore {
        self.inner.session.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.session.is_authenticated()
    }

    /// Replaces the stored session, used after login or registration.
    /// # Errors
    /// Returns `ApiError::Session` if the store cannot be written.
    pub fn start_session(&self, tokens: &TokenPair) -> Result<(), ApiError> {
        self.inner.session.store(tokens)?;
        self.inner.navigator.session_started();
        Ok(())
    }

    /// Removes the stored session.
    /// # Errors
    /// Returns `ApiError::Session` if the store cannot be written.
    pub fn end_session(&self) -> Result<(), ApiError> {
        self.inner.session.clear()?;
        Ok(())
    }

    /// # Errors
    /// Returns an error if the request fails or the body does not decode.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json(ApiRequest::get(path)).await
    }

    /// # Errors
    /// Returns an error if the request fails or the body does not decode.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(ApiRequest::post(path).json(body)?).await
    }

    /// # Errors
    /// Returns an error if the request fails or the body does not decode.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(ApiRequest::put(path).json(body)?).await
    }

    /// # Errors
    /// Returns an error if the request fails or the body does not decode.
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(ApiRequest::patch(path).json(body)?).await
    }

    /// # Errors
    /// Returns an error if the request fails.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send_empty(ApiRequest::delete(path)).await
    }

    /// Posts a multipart body made of files and scalar fields.
    /// # Errors
    /// Returns an error if the request fails or the body does not decode.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        form: MultipartForm,
    ) -> Result<T, ApiError> {
        self.send_json(ApiRequest::post(path).multipart(form)).await
    }

    /// Executes `request` and decodes a JSON body. An empty body decodes as `null`.
    /// # Errors
    /// Returns an error if the request fails or the body does not decode.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.execute(request).await?;
        decode_json(response).await
    }

    /// Executes `request` and discards the body.
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn send_empty(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.execute(request).await.map(|_| ())
    }

    /// Executes `request` and returns the raw body.
    /// # Errors
    /// Returns an error if the request fails or the body cannot be read.
    pub async fn send_bytes(&self, request: ApiRequest) -> Result<Vec<u8>, ApiError> {
        let response = self.execute(request).await?;
        let bytes = response.bytes().await.map_err(map_request_error)?;
        Ok(bytes.to_vec())
    }

    /// Dispatches `request` with the current bearer token, recovering once
    /// from an expired token. If the session already holds a different access
    /// token than the one sent, the request is replayed with it and no refresh
    /// is started. Responses other than 2xx become errors.
    /// # Errors
    /// Returns network, timeout and HTTP errors unchanged, or the refresh
    /// failure when a 401 could not be recovered.
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: ApiRequest) -> Result<Response, ApiError> {
        let sent = self.inner.session.access_token();
        let response = self.dispatch(&request, sent.as_ref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED
            || self.inner.config.is_auth_endpoint(&request.path)
        {
            return check_status(response).await;
        }

        let token = match self.inner.session.access_token() {
            Some(current) if !same_token(sent.as_ref(), &current) => {
                debug!("access token rotated while in flight, replaying");
                current
            }
            _ => {
                debug!("access token rejected, refreshing session");
                self.refresh_session().await?.access().clone()
            }
        };
        let response = self.dispatch(&request, Some(&token)).await?;

        check_status(response).await
    }

    /// Exchanges the stored refresh token for a new pair. Concurrent callers
    /// share one refresh call and its outcome. On failure the session is
    /// cleared and the navigator is sent to the login location.
    /// # Errors
    /// Returns the shared `RefreshError` when the refresh failed.
    pub async fn refresh_session(&self) -> Result<TokenPair, RefreshError> {
        self.inner.refresh.run(|| self.refresh_and_store()).await
    }

    async fn refresh_and_store(&self) -> RefreshOutcome {
        let outcome = match self.request_new_tokens().await {
            Ok(tokens) => self
                .inner
                .session
                .store(&tokens)
                .map(|()| tokens)
                .map_err(|err| RefreshError::Storage(err.to_string())),
            Err(err) => Err(err),
        };

        match &outcome {
            Ok(_) => info!("session refreshed"),
            Err(err) => {
                warn!(error = %err, "session refresh failed");
                self.abandon_session();
            }
        }

        outcome
    }

    async fn request_new_tokens(&self) -> RefreshOutcome {
        let Some(refresh) = self.inner.session.refresh_token() else {
            return Err(RefreshError::MissingRefreshToken);
        };

        let mut request = ApiRequest::post(self.inner.config.refresh_path.as_str());
        request.body = RequestBody::Json(json!({ "refresh": refresh.expose_secret() }));

        let response = self
            .dispatch(&request, None)
            .await
            .map_err(|err| match err {
                ApiError::Timeout(message) => RefreshError::Timeout(message),
                ApiError::Network(message) => RefreshError::Network(message),
                other => RefreshError::Network(other.to_string()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RefreshError::Rejected {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| RefreshError::Malformed(format!("failed to decode response: {err}")))?;

        normalize_token_pair(&body)
            .ok_or_else(|| RefreshError::Malformed("no token pair in refresh response".to_string()))
    }

    fn abandon_session(&self) {
        if let Err(err) = self.inner.session.clear() {
            error!(error = %err, "failed to clear session");
        }

        let target = self.inner.config.login_location.as_str();
        if self.inner.navigator.location().as_deref() != Some(target) {
            self.inner.navigator.navigate(target);
        }
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&SecretString>,
    ) -> Result<Response, ApiError> {
        let url = self.inner.config.endpoint_url(&request.path, &request.query)?;

        let mut builder = self.inner.http.request(request.method.clone(), url);

        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, bearer(token));
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(form) => builder.multipart(form.to_form()?),
        };

        let span = info_span!(
            "api.dispatch",
            http.method = %request.method,
            path = %request.path
        );
        let response = builder
            .send()
            .instrument(span)
            .await
            .map_err(map_request_error)?;

        debug!(status = response.status().as_u16(), "response received");

        Ok(response)
    }
}

fn same_token(sent: Option<&SecretString>, current: &SecretString) -> bool {
    sent.is_some_and(|sent| sent.expose_secret() == current.expose_secret())
}

/// Maps transport errors, separating timeouts from other failures.
fn map_request_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout("request timed out".to_string())
    } else {
        ApiError::Network(format!("unable to reach the server: {err}"))
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Http {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(map_request_error)?;

    let decoded = if bytes.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_slice(&bytes)
    };

    decoded.map_err(|err| ApiError::Parse(format!("failed to decode response: {err}")))
}

/// Prefers the API's `detail` field, otherwise the trimmed, truncated body.
fn error_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        if let Some(detail) = map.get("detail").and_then(Value::as_str) {
            return sanitize_body(detail);
        }
    }
    sanitize_body(body)
}

fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_detail() {
        assert_eq!(
            error_message(r#"{"detail": "Given token not valid"}"#),
            "Given token not valid"
        );
        assert_eq!(error_message(r#"{"code": 1}"#), r#"{"code": 1}"#);
        assert_eq!(error_message("  boom  "), "boom");
        assert_eq!(error_message(""), "Request failed.");
    }

    #[test]
    fn same_token_compares_exposed_values() {
        let a1 = SecretString::from("a1");
        assert!(same_token(Some(&SecretString::from("a1")), &a1));
        assert!(!same_token(Some(&SecretString::from("a0")), &a1));
        assert!(!same_token(None, &a1));
    }

    #[test]
    fn sanitize_body_truncates() {
        let long = "x".repeat(500);
        assert_eq!(sanitize_body(&long).len(), MAX_ERROR_CHARS);
    }
}
