use crate::{AppState, AsyncSlice, AttemptId, Effect, ErrorInfo, Msg, ReplySlice, SliceAction};

/// Message body sent when the user does not type one.
pub const DEFAULT_MESSAGE: &str = "hello";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            let user_info = state.user_info_mut().start();
            let users = state.users_mut().start();
            state.mark_dirty();
            vec![
                Effect::FetchUserInfo { attempt: user_info },
                Effect::FetchUsers { attempt: users },
            ]
        }
        Msg::RefreshUserInfo => {
            let attempt = state.user_info_mut().start();
            state.mark_dirty();
            vec![Effect::FetchUserInfo { attempt }]
        }
        Msg::RefreshUsers => {
            let attempt = state.users_mut().start();
            state.mark_dirty();
            vec![Effect::FetchUsers { attempt }]
        }
        Msg::SayHello { to } => {
            let slice = ReplySlice::for_hello(to.as_deref());
            let attempt = state.reply_mut(slice).start();
            state.mark_dirty();
            vec![Effect::PostHello {
                slice,
                attempt,
                whom: to,
            }]
        }
        Msg::SendMessage { to, what } => {
            let slice = ReplySlice::for_message(to.as_deref());
            let attempt = state.reply_mut(slice).start();
            state.mark_dirty();
            vec![Effect::PostMessage {
                slice,
                attempt,
                whom: to,
                what: what.unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
            }]
        }
        Msg::LogoutRequested => {
            let attempt = state.logout_mut().start();
            state.mark_dirty();
            vec![Effect::Logout { attempt }]
        }
        Msg::UserInfoLoaded { attempt, result } => {
            if settle(state.user_info_mut(), attempt, result) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UsersLoaded { attempt, result } => {
            if settle(state.users_mut(), attempt, result) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ReplyReceived {
            slice,
            attempt,
            result,
        } => {
            if settle(state.reply_mut(slice), attempt, result) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::LogoutFinished { attempt, result } => {
            if settle(state.logout_mut(), attempt, result) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn settle<T>(slice: &mut AsyncSlice<T>, attempt: AttemptId, result: Result<T, ErrorInfo>) -> bool {
    slice
        .reduce(SliceAction::completed(attempt, result))
        .changed_state()
}
