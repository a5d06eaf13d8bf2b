use std::time::Duration;

use fixture_logging::fixture_debug;
use reqwest::header::LOCATION;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::dto::{HelloRequest, LogoutResponse, MessageRequest, ReplyResponse};
use crate::{CallError, ClientError, FailureKind, UserInfoDto};

/// Paths of the backend endpoints, resolved against the base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Routes {
    pub user_info: String,
    pub users: String,
    pub hello: String,
    pub message: String,
    pub logout: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            user_info: "/user".to_string(),
            users: "/users".to_string(),
            hello: "/api/hello".to_string(),
            message: "/api/message".to_string(),
            logout: "/api/logout".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub routes: Routes,
    /// Sent as HTTP basic auth on every request when present.
    pub credentials: Option<Credentials>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:45678".to_string(),
            routes: Routes::default(),
            credentials: None,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// The backend endpoints exercised by the fixture.
///
/// Implementations never panic and never leak transport errors: every
/// failure comes back as a [`CallError`].
#[async_trait::async_trait]
pub trait BackendApi: Send + Sync {
    async fn user_info(&self) -> Result<UserInfoDto, CallError>;

    async fn user_list(&self) -> Result<Vec<String>, CallError>;

    /// Greets `whom`, or everybody when `None`. Returns the addressee.
    async fn hello(&self, whom: Option<&str>) -> Result<String, CallError>;

    /// Sends `what` to `whom`, or to everybody when `None`. Returns the addressee.
    async fn message(&self, whom: Option<&str>, what: &str) -> Result<String, CallError>;

    /// Ends the session. Returns the redirect URL, if the backend gave one.
    async fn logout(&self) -> Result<Option<String>, CallError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    base_url: Url,
    settings: ClientSettings,
}

impl ReqwestBackend {
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let base_url = Url::parse(&settings.base_url).map_err(|source| ClientError::BaseUrl {
            url: settings.base_url.clone(),
            source,
        })?;
        // Session cookie keeps the login alive; 3xx must surface to `logout`.
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            base_url,
            settings,
        })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn request(&self, method: Method, route: &str) -> Result<RequestBuilder, CallError> {
        let url = self
            .base_url
            .join(route)
            .map_err(|err| CallError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let request = self.client.request(method, url);
        Ok(match &self.settings.credentials {
            Some(credentials) => {
                request.basic_auth(&credentials.username, Some(&credentials.password))
            }
            None => request,
        })
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, CallError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        fixture_debug!("{} -> {}", response.url(), status);
        if !status.is_success() {
            return Err(status_error(status));
        }
        Ok(response)
    }

    async fn reply(&self, request: RequestBuilder, whom: Option<&str>) -> Result<String, CallError> {
        let response = self.send(request).await?;
        let body = read_body(response).await?;
        // The messaging backend acknowledges with a bare 200.
        if body.is_empty() {
            return Ok(whom.unwrap_or_default().to_string());
        }
        let reply: ReplyResponse = parse_json(&body)?;
        Ok(reply.whom)
    }
}

#[async_trait::async_trait]
impl BackendApi for ReqwestBackend {
    async fn user_info(&self) -> Result<UserInfoDto, CallError> {
        let request = self.request(Method::GET, &self.settings.routes.user_info)?;
        let response = self.send(request).await?;
        parse_json(&read_body(response).await?)
    }

    async fn user_list(&self) -> Result<Vec<String>, CallError> {
        let request = self.request(Method::GET, &self.settings.routes.users)?;
        let response = self.send(request).await?;
        parse_json(&read_body(response).await?)
    }

    async fn hello(&self, whom: Option<&str>) -> Result<String, CallError> {
        let request = self.request(Method::POST, &self.settings.routes.hello)?;
        let request = match whom {
            Some(whom) => request.json(&HelloRequest { whom }),
            None => request,
        };
        self.reply(request, whom).await
    }

    async fn message(&self, whom: Option<&str>, what: &str) -> Result<String, CallError> {
        let request = self
            .request(Method::POST, &self.settings.routes.message)?
            .json(&MessageRequest { whom, what });
        self.reply(request, whom).await
    }

    async fn logout(&self) -> Result<Option<String>, CallError> {
        let request = self.request(Method::POST, &self.settings.routes.logout)?;
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        fixture_debug!("{} -> {}", response.url(), status);

        if status.is_redirection() {
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .map(ToOwned::to_owned);
            return Ok(location);
        }
        if !status.is_success() {
            return Err(status_error(status));
        }

        let body = read_body(response).await?;
        if body.is_empty() {
            return Ok(None);
        }
        let parsed: LogoutResponse = parse_json(&body)?;
        Ok(parsed.logout_url)
    }
}

async fn read_body(response: Response) -> Result<Vec<u8>, CallError> {
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    Ok(bytes.to_vec())
}

fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, CallError> {
    serde_json::from_slice(body)
        .map_err(|err| CallError::new(FailureKind::MalformedBody, err.to_string()))
}

fn status_error(status: reqwest::StatusCode) -> CallError {
    CallError::new(
        FailureKind::HttpStatus(status.as_u16()),
        status.canonical_reason().unwrap_or("Unknown Status"),
    )
}

fn map_reqwest_error(err: reqwest::Error) -> CallError {
    if err.is_timeout() {
        return CallError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return CallError::new(FailureKind::MalformedBody, err.to_string());
    }
    CallError::new(FailureKind::Network, err.to_string())
}
