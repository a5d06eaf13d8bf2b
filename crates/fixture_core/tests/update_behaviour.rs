use std::sync::Once;

use fixture_core::{
    update, AppState, AsyncStatus, AttemptId, Effect, ErrorInfo, Msg, ReplySlice, UserInfo,
    DEFAULT_MESSAGE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(fixture_logging::initialize_for_tests);
}

fn alice() -> UserInfo {
    UserInfo {
        username: "Alice".to_string(),
        groups: vec!["privileged".to_string()],
        permissions: vec!["SEND_MESSAGE".to_string()],
        display_name: "Alice".to_string(),
    }
}

fn started() -> (AppState, Vec<Effect>) {
    update(AppState::new(), Msg::Started)
}

#[test]
fn started_fetches_identity_and_users() {
    init_logging();
    let (mut state, effects) = started();

    assert_eq!(
        effects,
        vec![
            Effect::FetchUserInfo {
                attempt: AttemptId::FIRST
            },
            Effect::FetchUsers {
                attempt: AttemptId::FIRST
            },
        ]
    );
    assert_eq!(state.user_info().status(), AsyncStatus::Pending);
    assert_eq!(state.users().status(), AsyncStatus::Pending);
    assert!(!state.is_idle());
    assert!(state.view().busy);
    assert!(state.consume_dirty());
}

#[test]
fn identity_success_logs_the_user_in() {
    init_logging();
    let (state, _) = started();
    let (state, effects) = update(
        state,
        Msg::UserInfoLoaded {
            attempt: AttemptId::FIRST,
            result: Ok(alice()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.user_info().status(), AsyncStatus::Resolved);
    assert_eq!(
        state.user_info().value().map(|info| info.username.as_str()),
        Some("Alice")
    );
    let view = state.view();
    assert!(view.logged_in);
    assert_eq!(view.username.as_deref(), Some("Alice"));
}

#[test]
fn identity_failure_keeps_previous_identity() {
    init_logging();
    let (state, _) = started();
    let (state, _) = update(
        state,
        Msg::UserInfoLoaded {
            attempt: AttemptId::FIRST,
            result: Ok(alice()),
        },
    );
    let (state, effects) = update(state, Msg::RefreshUserInfo);
    let attempt = effects[0].attempt();
    let (state, _) = update(
        state,
        Msg::UserInfoLoaded {
            attempt,
            result: Err(ErrorInfo::http(500, "Internal Server Error")),
        },
    );

    assert_eq!(state.user_info().status(), AsyncStatus::Failed);
    assert_eq!(state.user_info().value(), Some(&alice()));
    let view = state.view();
    assert!(!view.logged_in);
    assert_eq!(view.identity_error.as_deref(), Some("500 Internal Server Error"));
}

#[test]
fn stale_user_list_is_discarded_without_marking_dirty() {
    init_logging();
    let (state, _) = started();
    let (mut state, effects) = update(state, Msg::RefreshUsers);
    assert_eq!(
        effects,
        vec![Effect::FetchUsers {
            attempt: AttemptId::new(2)
        }]
    );
    assert!(state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::UsersLoaded {
            attempt: AttemptId::FIRST,
            result: Ok(vec!["old".to_string()]),
        },
    );
    assert!(!state.consume_dirty());
    assert_eq!(state.users().status(), AsyncStatus::Pending);

    let (mut state, _) = update(
        state,
        Msg::UsersLoaded {
            attempt: AttemptId::new(2),
            result: Ok(vec!["Alice".to_string(), "Bob".to_string()]),
        },
    );
    assert!(state.consume_dirty());
    assert_eq!(state.view().users, vec!["Alice", "Bob"]);
}

#[test]
fn say_hello_routes_by_target() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::SayHello { to: None });
    assert_eq!(
        effects,
        vec![Effect::PostHello {
            slice: ReplySlice::HelloEverybody,
            attempt: AttemptId::FIRST,
            whom: None,
        }]
    );

    let (state, effects) = update(
        state,
        Msg::SayHello {
            to: Some("Bob".to_string()),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::PostHello {
            slice: ReplySlice::HelloSomeone,
            attempt: AttemptId::FIRST,
            whom: Some("Bob".to_string()),
        }]
    );
    assert_eq!(
        state.reply(ReplySlice::HelloEverybody).status(),
        AsyncStatus::Pending
    );
    assert_eq!(
        state.reply(ReplySlice::HelloSomeone).status(),
        AsyncStatus::Pending
    );
    assert_eq!(
        state.reply(ReplySlice::MessageEverybody).status(),
        AsyncStatus::Initial
    );
}

#[test]
fn send_message_defaults_body() {
    init_logging();
    let (_, effects) = update(
        AppState::new(),
        Msg::SendMessage {
            to: None,
            what: None,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::PostMessage {
            slice: ReplySlice::MessageEverybody,
            attempt: AttemptId::FIRST,
            whom: None,
            what: DEFAULT_MESSAGE.to_string(),
        }]
    );

    let (_, effects) = update(
        AppState::new(),
        Msg::SendMessage {
            to: Some("Bob".to_string()),
            what: Some("hi there".to_string()),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::PostMessage {
            slice: ReplySlice::MessageSomeone,
            attempt: AttemptId::FIRST,
            whom: Some("Bob".to_string()),
            what: "hi there".to_string(),
        }]
    );
}

#[test]
fn reply_failure_replaces_previous_success() {
    init_logging();
    let slice = ReplySlice::MessageSomeone;
    let to = Some("Bob".to_string());
    let (state, effects) = update(
        AppState::new(),
        Msg::SendMessage {
            to: to.clone(),
            what: None,
        },
    );
    let (state, _) = update(
        state,
        Msg::ReplyReceived {
            slice,
            attempt: effects[0].attempt(),
            result: Ok("Bob".to_string()),
        },
    );
    assert_eq!(state.view().reply(slice).and_then(|r| r.line()), Some("Bob"));

    let (state, effects) = update(state, Msg::SendMessage { to, what: None });
    let (state, _) = update(
        state,
        Msg::ReplyReceived {
            slice,
            attempt: effects[0].attempt(),
            result: Err(ErrorInfo::http(400, "Bad Request")),
        },
    );

    let view = state.view();
    let reply = view.reply(slice).expect("reply view");
    assert_eq!(reply.status, AsyncStatus::Failed);
    assert_eq!(reply.success, None);
    assert_eq!(reply.line(), Some("400 Bad Request"));
}

#[test]
fn logout_exposes_redirect() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::LogoutRequested);
    assert_eq!(
        effects,
        vec![Effect::Logout {
            attempt: AttemptId::FIRST
        }]
    );

    let (state, _) = update(
        state,
        Msg::LogoutFinished {
            attempt: AttemptId::FIRST,
            result: Ok(Some("https://idp.example.com/logout".to_string())),
        },
    );
    assert_eq!(
        state.view().logout_redirect.as_deref(),
        Some("https://idp.example.com/logout")
    );
    assert!(state.is_idle());
}

#[test]
fn scenario_resolves_user_info() {
    init_logging();
    let (state, effects) = started();
    let attempt = effects[0].attempt();
    let (state, _) = update(
        state,
        Msg::UserInfoLoaded {
            attempt,
            result: Ok(alice()),
        },
    );

    assert_eq!(state.user_info().status(), AsyncStatus::Resolved);
    assert_eq!(
        state.user_info().value().map(|info| info.username.as_str()),
        Some("Alice")
    );
}

#[test]
fn scenario_failed_user_info_without_previous_value() {
    init_logging();
    let (state, effects) = started();
    let attempt = effects[0].attempt();
    let (state, _) = update(
        state,
        Msg::UserInfoLoaded {
            attempt,
            result: Err(ErrorInfo::http(500, "Internal Server Error")),
        },
    );

    assert_eq!(state.user_info().status(), AsyncStatus::Failed);
    // Retained value policy, but nothing had resolved yet.
    assert_eq!(state.user_info().value(), None);
    assert_eq!(
        state.user_info().error(),
        Some(&ErrorInfo::http(500, "Internal Server Error"))
    );
}

#[test]
fn scenario_slow_first_reply_is_dropped() {
    init_logging();
    let slice = ReplySlice::HelloEverybody;
    let (state, first) = update(AppState::new(), Msg::SayHello { to: None });
    let (state, second) = update(state, Msg::SayHello { to: None });
    let (first, second) = (first[0].attempt(), second[0].attempt());
    assert_eq!(first.get(), 1);
    assert_eq!(second.get(), 2);

    let (state, _) = update(
        state,
        Msg::ReplyReceived {
            slice,
            attempt: first,
            result: Ok("first".to_string()),
        },
    );
    assert_eq!(state.reply(slice).status(), AsyncStatus::Pending);
    assert_eq!(state.reply(slice).value(), None);

    let (state, _) = update(
        state,
        Msg::ReplyReceived {
            slice,
            attempt: second,
            result: Ok("second".to_string()),
        },
    );
    assert_eq!(state.reply(slice).status(), AsyncStatus::Resolved);
    assert_eq!(
        state.reply(slice).value().map(String::as_str),
        Some("second")
    );
}
