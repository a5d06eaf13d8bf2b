use crate::{AttemptId, ReplySlice};

/// Remote calls requested by `update`, each tagged with the attempt it settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchUserInfo {
        attempt: AttemptId,
    },
    FetchUsers {
        attempt: AttemptId,
    },
    PostHello {
        slice: ReplySlice,
        attempt: AttemptId,
        whom: Option<String>,
    },
    PostMessage {
        slice: ReplySlice,
        attempt: AttemptId,
        whom: Option<String>,
        what: String,
    },
    Logout {
        attempt: AttemptId,
    },
}

impl Effect {
    pub fn attempt(&self) -> AttemptId {
        match self {
            Effect::FetchUserInfo { attempt }
            | Effect::FetchUsers { attempt }
            | Effect::PostHello { attempt, .. }
            | Effect::PostMessage { attempt, .. }
            | Effect::Logout { attempt } => *attempt,
        }
    }
}
