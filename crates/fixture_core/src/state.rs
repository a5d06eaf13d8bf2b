use crate::view_model::{AppViewModel, ReplyView};
use crate::{AsyncSlice, AsyncStatus, FailurePolicy};

/// Identity of the signed-in user as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserInfo {
    pub username: String,
    pub groups: Vec<String>,
    pub permissions: Vec<String>,
    pub display_name: String,
}

/// The greet/message exercises, each backed by its own slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReplySlice {
    HelloEverybody,
    HelloSomeone,
    MessageEverybody,
    MessageSomeone,
}

impl ReplySlice {
    pub const ALL: [ReplySlice; 4] = [
        ReplySlice::HelloEverybody,
        ReplySlice::HelloSomeone,
        ReplySlice::MessageEverybody,
        ReplySlice::MessageSomeone,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ReplySlice::HelloEverybody => "hello_everybody",
            ReplySlice::HelloSomeone => "hello_someone",
            ReplySlice::MessageEverybody => "message_everybody",
            ReplySlice::MessageSomeone => "message_someone",
        }
    }

    pub fn for_hello(to: Option<&str>) -> Self {
        match to {
            Some(_) => ReplySlice::HelloSomeone,
            None => ReplySlice::HelloEverybody,
        }
    }

    pub fn for_message(to: Option<&str>) -> Self {
        match to {
            Some(_) => ReplySlice::MessageSomeone,
            None => ReplySlice::MessageEverybody,
        }
    }
}

/// The whole state tree: independent named slices plus a render flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    user_info: AsyncSlice<UserInfo>,
    users: AsyncSlice<Vec<String>>,
    hello_everybody: AsyncSlice<String>,
    hello_someone: AsyncSlice<String>,
    message_everybody: AsyncSlice<String>,
    message_someone: AsyncSlice<String>,
    logout: AsyncSlice<Option<String>>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            user_info: AsyncSlice::new("user_info", FailurePolicy::RetainValue),
            users: AsyncSlice::new("users", FailurePolicy::RetainValue),
            hello_everybody: reply_slice(ReplySlice::HelloEverybody),
            hello_someone: reply_slice(ReplySlice::HelloSomeone),
            message_everybody: reply_slice(ReplySlice::MessageEverybody),
            message_someone: reply_slice(ReplySlice::MessageSomeone),
            logout: AsyncSlice::new("logout", FailurePolicy::ClearValue),
            dirty: false,
        }
    }

    pub fn user_info(&self) -> &AsyncSlice<UserInfo> {
        &self.user_info
    }

    pub fn users(&self) -> &AsyncSlice<Vec<String>> {
        &self.users
    }

    pub fn reply(&self, slice: ReplySlice) -> &AsyncSlice<String> {
        match slice {
            ReplySlice::HelloEverybody => &self.hello_everybody,
            ReplySlice::HelloSomeone => &self.hello_someone,
            ReplySlice::MessageEverybody => &self.message_everybody,
            ReplySlice::MessageSomeone => &self.message_someone,
        }
    }

    pub fn logout(&self) -> &AsyncSlice<Option<String>> {
        &self.logout
    }

    /// The user counts as logged in once the identity fetch has resolved.
    pub fn is_logged_in(&self) -> bool {
        self.user_info.status() == AsyncStatus::Resolved
    }

    /// No slice is waiting for a remote call.
    pub fn is_idle(&self) -> bool {
        let pending = [
            self.user_info.status(),
            self.users.status(),
            self.hello_everybody.status(),
            self.hello_someone.status(),
            self.message_everybody.status(),
            self.message_someone.status(),
            self.logout.status(),
        ];
        !pending.contains(&AsyncStatus::Pending)
    }

    pub fn view(&self) -> AppViewModel {
        let identity = self.user_info.value();
        AppViewModel {
            identity_status: self.user_info.status(),
            logged_in: self.is_logged_in(),
            username: identity.map(|info| info.username.clone()),
            display_name: identity.map(|info| info.display_name.clone()),
            identity_error: self.user_info.error().map(ToString::to_string),
            users: self.users.value().cloned().unwrap_or_default(),
            replies: ReplySlice::ALL
                .iter()
                .map(|&slice| ReplyView::from_slice(slice, self.reply(slice)))
                .collect(),
            logout_redirect: self.logout.value().cloned().flatten(),
            busy: !self.is_idle(),
        }
    }

    /// Returns whether anything changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn user_info_mut(&mut self) -> &mut AsyncSlice<UserInfo> {
        &mut self.user_info
    }

    pub(crate) fn users_mut(&mut self) -> &mut AsyncSlice<Vec<String>> {
        &mut self.users
    }

    pub(crate) fn reply_mut(&mut self, slice: ReplySlice) -> &mut AsyncSlice<String> {
        match slice {
            ReplySlice::HelloEverybody => &mut self.hello_everybody,
            ReplySlice::HelloSomeone => &mut self.hello_someone,
            ReplySlice::MessageEverybody => &mut self.message_everybody,
            ReplySlice::MessageSomeone => &mut self.message_someone,
        }
    }

    pub(crate) fn logout_mut(&mut self) -> &mut AsyncSlice<Option<String>> {
        &mut self.logout
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn reply_slice(slice: ReplySlice) -> AsyncSlice<String> {
    AsyncSlice::new(slice.name(), FailurePolicy::ClearValue)
}
