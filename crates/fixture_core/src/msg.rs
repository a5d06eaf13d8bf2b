use crate::{AttemptId, ErrorInfo, ReplySlice, UserInfo};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Fixture booted: fetch the identity and the list of known users.
    Started,
    /// User asked to reload the identity.
    RefreshUserInfo,
    /// User asked to reload the list of known users.
    RefreshUsers,
    /// User clicked one of the greet buttons; `to` is the typed target, if any.
    SayHello { to: Option<String> },
    /// User clicked one of the send buttons; `what` defaults to [`crate::DEFAULT_MESSAGE`].
    SendMessage {
        to: Option<String>,
        what: Option<String>,
    },
    /// User picked Logout from the user menu.
    LogoutRequested,
    /// Identity fetch finished.
    UserInfoLoaded {
        attempt: AttemptId,
        result: Result<UserInfo, ErrorInfo>,
    },
    /// User list fetch finished.
    UsersLoaded {
        attempt: AttemptId,
        result: Result<Vec<String>, ErrorInfo>,
    },
    /// Greet or message call finished; `Ok` carries the addressee echoed back.
    ReplyReceived {
        slice: ReplySlice,
        attempt: AttemptId,
        result: Result<String, ErrorInfo>,
    },
    /// Logout call finished; `Ok` carries the optional redirect URL.
    LogoutFinished {
        attempt: AttemptId,
        result: Result<Option<String>, ErrorInfo>,
    },
    NoOp,
}
