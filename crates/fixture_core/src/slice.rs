use fixture_logging::fixture_debug;

use crate::{AsyncStatus, AsyncValue, AttemptId, ErrorInfo, FailurePolicy};

/// The three transitions a slice understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliceAction<T> {
    Start,
    Succeed { attempt: AttemptId, value: T },
    Fail { attempt: AttemptId, error: ErrorInfo },
}

impl<T> SliceAction<T> {
    /// Completion action for a finished remote call.
    pub fn completed(attempt: AttemptId, result: Result<T, ErrorInfo>) -> Self {
        match result {
            Ok(value) => SliceAction::Succeed { attempt, value },
            Err(error) => SliceAction::Fail { attempt, error },
        }
    }
}

/// Outcome of reducing one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A new attempt was issued and the slice is pending.
    Started(AttemptId),
    /// A completion for the current attempt was applied.
    Applied,
    /// A completion for an older (or never issued) attempt was dropped.
    Stale {
        attempt: AttemptId,
        current: Option<AttemptId>,
    },
}

impl Transition {
    pub fn changed_state(self) -> bool {
        !matches!(self, Transition::Stale { .. })
    }
}

/// Named container for one `AsyncValue<T>` and its attempt counter.
///
/// The slice never performs IO. Whoever dispatches `Start` is responsible for
/// issuing the remote call tagged with the returned attempt and feeding the
/// result back as `Succeed` or `Fail`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncSlice<T> {
    name: &'static str,
    policy: FailurePolicy,
    current: Option<AttemptId>,
    value: AsyncValue<T>,
}

impl<T> AsyncSlice<T> {
    pub fn new(name: &'static str, policy: FailurePolicy) -> Self {
        Self {
            name,
            policy,
            current: None,
            value: AsyncValue::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn status(&self) -> AsyncStatus {
        self.value.status()
    }

    pub fn value(&self) -> Option<&T> {
        self.value.value()
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.value.error()
    }

    /// Attempt issued by the most recent `Start`, if any.
    pub fn current_attempt(&self) -> Option<AttemptId> {
        self.current
    }

    pub fn snapshot(&self) -> &AsyncValue<T> {
        &self.value
    }

    pub fn reduce(&mut self, action: SliceAction<T>) -> Transition {
        match action {
            SliceAction::Start => Transition::Started(self.start()),
            SliceAction::Succeed { attempt, value } => {
                if let Some(stale) = self.reject_stale(attempt) {
                    return stale;
                }
                self.value.status = AsyncStatus::Resolved;
                self.value.value = Some(value);
                self.value.error = None;
                Transition::Applied
            }
            SliceAction::Fail { attempt, error } => {
                if let Some(stale) = self.reject_stale(attempt) {
                    return stale;
                }
                fixture_debug!("{}: attempt {} failed: {}", self.name, attempt, error);
                self.value.status = AsyncStatus::Failed;
                self.value.error = Some(error);
                if self.policy == FailurePolicy::ClearValue {
                    self.value.value = None;
                }
                Transition::Applied
            }
        }
    }

    /// Moves to `Pending` and returns the attempt the remote call must carry.
    pub fn start(&mut self) -> AttemptId {
        let attempt = self.current.map_or(AttemptId::FIRST, AttemptId::next);
        self.current = Some(attempt);
        self.value.status = AsyncStatus::Pending;
        self.value.error = None;
        fixture_debug!("{}: start attempt {}", self.name, attempt);
        attempt
    }

    pub fn succeed(&mut self, attempt: AttemptId, value: T) -> Transition {
        self.reduce(SliceAction::Succeed { attempt, value })
    }

    pub fn fail(&mut self, attempt: AttemptId, error: ErrorInfo) -> Transition {
        self.reduce(SliceAction::Fail { attempt, error })
    }

    fn reject_stale(&self, attempt: AttemptId) -> Option<Transition> {
        if self.current == Some(attempt) {
            return None;
        }
        fixture_debug!(
            "{}: discarding stale completion {} (current {:?})",
            self.name,
            attempt,
            self.current
        );
        Some(Transition::Stale {
            attempt,
            current: self.current,
        })
    }
}
