//! Fixture client: backend calls reduced to `Result<T, CallError>`.
mod api;
mod dto;
mod engine;
mod types;

pub use api::{BackendApi, ClientSettings, Credentials, ReqwestBackend, Routes};
pub use dto::UserInfoDto;
pub use engine::ClientHandle;
pub use types::{Call, CallError, CallOutput, ClientError, ClientEvent, FailureKind};
