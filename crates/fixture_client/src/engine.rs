use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use fixture_logging::{fixture_debug, fixture_warn};
use tokio_util::sync::CancellationToken;

use crate::{BackendApi, Call, CallError, CallOutput, ClientError, ClientEvent, ClientSettings, ReqwestBackend};

enum ClientCommand<L> {
    Enqueue {
        lane: L,
        attempt: u64,
        call: Call,
        token: CancellationToken,
    },
}

/// Runs backend calls on a background tokio runtime.
///
/// Calls are grouped in lanes (one per state slice). Enqueuing a newer
/// attempt on a lane supersedes the older one: the older request is left to
/// finish, but its completion is dropped instead of delivered.
pub struct ClientHandle<L> {
    cmd_tx: mpsc::Sender<ClientCommand<L>>,
    event_rx: mpsc::Receiver<ClientEvent<L>>,
    latest: Mutex<HashMap<L, (u64, CancellationToken)>>,
}

impl<L> ClientHandle<L>
where
    L: Clone + Eq + Hash + Debug + Send + 'static,
{
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let backend = ReqwestBackend::new(settings)?;
        Self::with_backend(Arc::new(backend))
    }

    pub fn with_backend(backend: Arc<dyn BackendApi>) -> Result<Self, ClientError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ClientCommand<L>>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("fixture-client")
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx,
            latest: Mutex::new(HashMap::new()),
        })
    }

    pub fn enqueue(&self, lane: L, attempt: u64, call: Call) {
        let token = CancellationToken::new();
        {
            let mut latest = match self.latest.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if let Some((previous, old)) = latest.insert(lane.clone(), (attempt, token.clone())) {
                if previous != attempt {
                    fixture_debug!("{:?}: attempt {} supersedes {}", lane, attempt, previous);
                }
                old.cancel();
            }
        }

        let command = ClientCommand::Enqueue {
            lane,
            attempt,
            call,
            token,
        };
        if self.cmd_tx.send(command).is_err() {
            fixture_warn!("client runtime is gone; call dropped");
        }
    }

    pub fn try_recv(&self) -> Option<ClientEvent<L>> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ClientEvent<L>> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command<L: Debug>(
    backend: &dyn BackendApi,
    command: ClientCommand<L>,
    event_tx: mpsc::Sender<ClientEvent<L>>,
) {
    match command {
        ClientCommand::Enqueue {
            lane,
            attempt,
            call,
            token,
        } => {
            let label = call.label();
            let result = perform(backend, call).await;
            if token.is_cancelled() {
                fixture_debug!("{:?}: dropping superseded {} attempt {}", lane, label, attempt);
                return;
            }
            if let Err(err) = &result {
                fixture_debug!("{:?}: {} attempt {} failed: {}", lane, label, attempt, err);
            }
            let _ = event_tx.send(ClientEvent {
                lane,
                attempt,
                result,
            });
        }
    }
}

async fn perform(backend: &dyn BackendApi, call: Call) -> Result<CallOutput, CallError> {
    match call {
        Call::UserInfo => backend.user_info().await.map(CallOutput::UserInfo),
        Call::UserList => backend.user_list().await.map(CallOutput::UserList),
        Call::Hello { whom } => backend.hello(whom.as_deref()).await.map(CallOutput::Reply),
        Call::Message { whom, what } => backend
            .message(whom.as_deref(), &what)
            .await
            .map(CallOutput::Reply),
        Call::Logout => backend.logout().await.map(CallOutput::Logout),
    }
}
