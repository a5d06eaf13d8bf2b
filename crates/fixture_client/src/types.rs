use std::fmt;

use thiserror::Error;

use crate::UserInfoDto;

/// One remote call the fixture knows how to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    UserInfo,
    UserList,
    Hello { whom: Option<String> },
    Message { whom: Option<String>, what: String },
    Logout,
}

impl Call {
    pub fn label(&self) -> &'static str {
        match self {
            Call::UserInfo => "user-info",
            Call::UserList => "user-list",
            Call::Hello { .. } => "hello",
            Call::Message { .. } => "message",
            Call::Logout => "logout",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutput {
    UserInfo(UserInfoDto),
    UserList(Vec<String>),
    /// Addressee echoed back by the greet and message endpoints.
    Reply(String),
    /// Where the browser would be sent after logging out.
    Logout(Option<String>),
}

/// Completion of one enqueued call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientEvent<L> {
    pub lane: L,
    pub attempt: u64,
    pub result: Result<CallOutput, CallError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct CallError {
    pub kind: FailureKind,
    pub message: String,
}

impl CallError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// HTTP status of the response, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            FailureKind::HttpStatus(code) => Some(code),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedBody,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedBody => write!(f, "malformed response body"),
        }
    }
}

/// Failures while setting up the client itself.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base url {url:?}: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to start client runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
