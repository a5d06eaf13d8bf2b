use std::fmt::Write;

use fixture_core::{AppViewModel, AsyncStatus, ReplySlice};

use crate::driver::RunReport;

fn reply_label(slice: ReplySlice) -> &'static str {
    match slice {
        ReplySlice::HelloEverybody => "Say hello to everybody",
        ReplySlice::HelloSomeone => "Say hello to",
        ReplySlice::MessageEverybody => "Send message to everybody",
        ReplySlice::MessageSomeone => "Send message to",
    }
}

/// One-line status used by the store subscriber.
pub fn summary_line(view: &AppViewModel) -> String {
    let user = view.username.as_deref().unwrap_or("-");
    let replies: Vec<String> = view
        .replies
        .iter()
        .map(|reply| format!("{}={}", reply.slice.name(), reply.status))
        .collect();
    format!(
        "identity={} user={} users={} {}{}",
        view.identity_status,
        user,
        view.users.len(),
        replies.join(" "),
        if view.busy { " (busy)" } else { "" }
    )
}

/// Text rendering of the fixture screen.
pub fn render_view(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    if !view.logged_in {
        let reason = match view.identity_status {
            AsyncStatus::Pending => "still loading".to_string(),
            _ => view
                .identity_error
                .clone()
                .unwrap_or_else(|| "no identity".to_string()),
        };
        lines.push(format!("Login required ({reason})"));
        return lines;
    }

    let name = view
        .display_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .or(view.username.as_deref())
        .unwrap_or_default();
    lines.push(format!("Signed in: {name}"));
    lines.push(format!("Known users: {}", view.users.join(", ")));
    for reply in &view.replies {
        let result = match reply.status {
            AsyncStatus::Initial => "not run".to_string(),
            AsyncStatus::Pending => "pending".to_string(),
            AsyncStatus::Resolved => format!("ok {}", reply.line().unwrap_or_default()),
            AsyncStatus::Failed => format!("error {}", reply.line().unwrap_or_default()),
        };
        lines.push(format!("{}: {}", reply_label(reply.slice), result.trim_end()));
    }
    if let Some(redirect) = &view.logout_redirect {
        lines.push(format!("Logout redirect: {redirect}"));
    }
    lines
}

pub fn render_report(report: &RunReport) -> String {
    let mut out = String::new();
    let elapsed = report.finished_at - report.started_at;
    let _ = writeln!(
        out,
        "e2e fixture run {} ({} ms){}",
        report.started_at.to_rfc3339(),
        elapsed.num_milliseconds(),
        if report.settled { "" } else { " [timed out]" }
    );
    for line in render_view(&report.view) {
        let _ = writeln!(out, "  {line}");
    }
    out
}
