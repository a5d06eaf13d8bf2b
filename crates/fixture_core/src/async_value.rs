use std::fmt;

/// Lifecycle of one remote-fetch operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AsyncStatus {
    #[default]
    Initial,
    Pending,
    Resolved,
    Failed,
}

impl fmt::Display for AsyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsyncStatus::Initial => write!(f, "initial"),
            AsyncStatus::Pending => write!(f, "pending"),
            AsyncStatus::Resolved => write!(f, "resolved"),
            AsyncStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Identifies one `start` of a slice. Issued in increasing order from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttemptId(u64);

impl AttemptId {
    pub const FIRST: AttemptId = AttemptId(1);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// User-facing description of a failed remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// HTTP status when the backend answered; `None` for transport failures.
    pub code: Option<u16>,
    pub message: String,
}

impl ErrorInfo {
    pub fn http(code: u16, reason: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: reason.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{code} {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// What a slice does with its last resolved value when an attempt fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Keep showing the previous value next to the error.
    RetainValue,
    /// Drop the previous value; only the error remains.
    ClearValue,
}

/// Latest known value and status of a remote resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncValue<T> {
    pub(crate) status: AsyncStatus,
    pub(crate) value: Option<T>,
    pub(crate) error: Option<ErrorInfo>,
}

impl<T> AsyncValue<T> {
    pub fn new() -> Self {
        Self {
            status: AsyncStatus::Initial,
            value: None,
            error: None,
        }
    }

    pub fn status(&self) -> AsyncStatus {
        self.status
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Only set while `status` is `Failed`.
    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }
}

impl<T> Default for AsyncValue<T> {
    fn default() -> Self {
        Self::new()
    }
}
