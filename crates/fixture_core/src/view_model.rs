use crate::{AsyncSlice, AsyncStatus, ReplySlice};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub identity_status: AsyncStatus,
    pub logged_in: bool,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub identity_error: Option<String>,
    pub users: Vec<String>,
    pub replies: Vec<ReplyView>,
    pub logout_redirect: Option<String>,
    pub busy: bool,
}

impl AppViewModel {
    pub fn reply(&self, slice: ReplySlice) -> Option<&ReplyView> {
        self.replies.iter().find(|reply| reply.slice == slice)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyView {
    pub slice: ReplySlice,
    pub status: AsyncStatus,
    pub success: Option<String>,
    pub error: Option<String>,
}

impl ReplyView {
    pub(crate) fn from_slice(slice: ReplySlice, state: &AsyncSlice<String>) -> Self {
        Self {
            slice,
            status: state.status(),
            success: state.value().cloned(),
            error: state.error().map(ToString::to_string),
        }
    }

    /// Text shown under the exercise: the reply, else the error, else nothing.
    pub fn line(&self) -> Option<&str> {
        match self.status {
            AsyncStatus::Failed => self.error.as_deref(),
            _ => self.success.as_deref(),
        }
    }
}
