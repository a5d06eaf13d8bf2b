use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use fixture_core::{AppViewModel, Msg, Store};
use fixture_logging::{fixture_info, fixture_warn};

use crate::effects::EffectRunner;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverOptions {
    pub settle_timeout: Duration,
    pub message_text: Option<String>,
    pub logout_at_end: bool,
}

/// Outcome of one scripted run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// False when some call was still pending at a settle deadline.
    pub settled: bool,
    pub view: AppViewModel,
}

impl RunReport {
    pub fn identity_resolved(&self) -> bool {
        self.view.logged_in
    }
}

/// Plays the interactions a user would perform in the browser fixture.
pub struct Driver {
    store: Store,
    runner: EffectRunner,
    options: DriverOptions,
}

impl Driver {
    pub fn new(store: Store, runner: EffectRunner, options: DriverOptions) -> Self {
        Self {
            store,
            runner,
            options,
        }
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let effects = self.store.dispatch(msg);
        self.runner.run(effects);
    }

    /// Applies completions until no slice is pending or the settle timeout expires.
    pub fn settle(&mut self) -> bool {
        let deadline = Instant::now() + self.options.settle_timeout;
        loop {
            while let Some(msg) = self.runner.try_next_msg() {
                self.dispatch(msg);
            }
            if self.store.state().is_idle() {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                fixture_warn!(
                    "Gave up waiting after {:?}; calls still pending",
                    self.options.settle_timeout
                );
                return false;
            }
            if let Some(msg) = self.runner.next_msg(deadline - now) {
                self.dispatch(msg);
            }
        }
    }

    pub fn run(mut self) -> RunReport {
        let started_at = Utc::now();
        self.dispatch(Msg::Started);
        let mut settled = self.settle();

        let view = self.store.view();
        if view.logged_in {
            let target = view.users.first().cloned();
            fixture_info!(
                "Logged in as {:?}; exercising endpoints (target {:?})",
                view.username,
                target
            );
            self.exercise(target);
            settled &= self.settle();

            if self.options.logout_at_end {
                self.dispatch(Msg::LogoutRequested);
                settled &= self.settle();
            }
        } else {
            fixture_warn!(
                "Not logged in ({}); skipping messaging checks",
                view.identity_error.as_deref().unwrap_or("no identity")
            );
        }

        RunReport {
            started_at,
            finished_at: Utc::now(),
            settled,
            view: self.store.view(),
        }
    }

    fn exercise(&mut self, target: Option<String>) {
        let what = self.options.message_text.clone();
        self.dispatch(Msg::SayHello { to: None });
        self.dispatch(Msg::SendMessage {
            to: None,
            what: what.clone(),
        });
        if let Some(target) = target {
            self.dispatch(Msg::SayHello {
                to: Some(target.clone()),
            });
            self.dispatch(Msg::SendMessage {
                to: Some(target),
                what,
            });
        }
    }
}
