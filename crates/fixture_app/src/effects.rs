use std::time::Duration;

use fixture_client::{Call, CallError, CallOutput, ClientEvent, ClientHandle, UserInfoDto};
use fixture_core::{AttemptId, Effect, ErrorInfo, Msg, ReplySlice, UserInfo};
use fixture_logging::{fixture_info, fixture_warn};

/// Client lane of each slice; a newer attempt on a lane supersedes the older.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    UserInfo,
    Users,
    Reply(ReplySlice),
    Logout,
}

/// Turns effects into client calls and client completions into messages.
pub struct EffectRunner {
    client: ClientHandle<Lane>,
}

impl EffectRunner {
    pub fn new(client: ClientHandle<Lane>) -> Self {
        Self { client }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            let attempt = effect.attempt();
            let (lane, call) = to_call(effect);
            fixture_info!("{:?} {} attempt {}", lane, call.label(), attempt);
            self.client.enqueue(lane, attempt.get(), call);
        }
    }

    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.client.recv_timeout(timeout).map(to_msg)
    }

    pub fn try_next_msg(&self) -> Option<Msg> {
        self.client.try_recv().map(to_msg)
    }
}

fn to_call(effect: Effect) -> (Lane, Call) {
    match effect {
        Effect::FetchUserInfo { .. } => (Lane::UserInfo, Call::UserInfo),
        Effect::FetchUsers { .. } => (Lane::Users, Call::UserList),
        Effect::PostHello { slice, whom, .. } => (Lane::Reply(slice), Call::Hello { whom }),
        Effect::PostMessage {
            slice, whom, what, ..
        } => (Lane::Reply(slice), Call::Message { whom, what }),
        Effect::Logout { .. } => (Lane::Logout, Call::Logout),
    }
}

pub(crate) fn to_msg(event: ClientEvent<Lane>) -> Msg {
    let ClientEvent {
        lane,
        attempt,
        result,
    } = event;
    let attempt = AttemptId::new(attempt);
    let result = result.map_err(error_info);

    match lane {
        Lane::UserInfo => Msg::UserInfoLoaded {
            attempt,
            result: result.and_then(|output| match output {
                CallOutput::UserInfo(dto) => Ok(user_info(dto)),
                other => Err(unexpected(lane, &other)),
            }),
        },
        Lane::Users => Msg::UsersLoaded {
            attempt,
            result: result.and_then(|output| match output {
                CallOutput::UserList(users) => Ok(users),
                other => Err(unexpected(lane, &other)),
            }),
        },
        Lane::Reply(slice) => Msg::ReplyReceived {
            slice,
            attempt,
            result: result.and_then(|output| match output {
                CallOutput::Reply(whom) => Ok(whom),
                other => Err(unexpected(lane, &other)),
            }),
        },
        Lane::Logout => Msg::LogoutFinished {
            attempt,
            result: result.and_then(|output| match output {
                CallOutput::Logout(redirect) => Ok(redirect),
                other => Err(unexpected(lane, &other)),
            }),
        },
    }
}

pub(crate) fn error_info(err: CallError) -> ErrorInfo {
    match err.status() {
        Some(code) => ErrorInfo::http(code, err.message),
        None => ErrorInfo::transport(err.to_string()),
    }
}

fn user_info(dto: UserInfoDto) -> UserInfo {
    UserInfo {
        username: dto.username,
        groups: dto.groups,
        permissions: dto.permissions,
        display_name: dto.display_name,
    }
}

fn unexpected(lane: Lane, output: &CallOutput) -> ErrorInfo {
    fixture_warn!("{:?} received unexpected payload {:?}", lane, output);
    ErrorInfo::transport(format!("unexpected payload on {lane:?}"))
}
