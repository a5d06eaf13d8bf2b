//! Fixture core: async-resource slices, the state tree and its dispatcher.
mod async_value;
mod effect;
mod msg;
mod slice;
mod state;
mod store;
mod update;
mod view_model;

pub use async_value::{AsyncStatus, AsyncValue, AttemptId, ErrorInfo, FailurePolicy};
pub use effect::Effect;
pub use msg::Msg;
pub use slice::{AsyncSlice, SliceAction, Transition};
pub use state::{AppState, ReplySlice, UserInfo};
pub use store::{Store, SubscriptionId};
pub use update::{update, DEFAULT_MESSAGE};
pub use view_model::{AppViewModel, ReplyView};
