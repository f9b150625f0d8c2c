use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt, Shared};

use crate::error::ConnectTimeout;
use crate::Result;

/// Polling schedule used while waiting for the daemon to come up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Failed polls tolerated before giving up.
    pub max_attempts: u32,
    /// Polls that use `fast_delay`; later ones use `slow_delay`.
    pub fast_attempts: u32,
    pub fast_delay: Duration,
    pub slow_delay: Duration,
}

impl RetryPolicy {
    pub const MAX_ATTEMPTS: u32 = 200;
    pub const FAST_ATTEMPTS: u32 = 50;
    pub const FAST_DELAY: Duration = Duration::from_millis(400);
    pub const SLOW_DELAY: Duration = Duration::from_millis(1000);

    /// Delay scheduled after the `attempt`-th failed poll (1-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        if attempt < self.fast_attempts {
            self.fast_delay
        } else {
            self.slow_delay
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::MAX_ATTEMPTS,
            fast_attempts: Self::FAST_ATTEMPTS,
            fast_delay: Self::FAST_DELAY,
            slow_delay: Self::SLOW_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Idle,
    Connecting,
    Connected,
    Failed,
}

type ConnectOutcome = std::result::Result<serde_json::Value, ConnectTimeout>;
pub(crate) type SharedConnect = Shared<BoxFuture<'static, ConnectOutcome>>;

/// Owns the single connect attempt of a client. The first caller starts
/// the polling task; everyone else, before or after it settles, awaits
/// the same shared outcome.
pub struct ConnectionSupervisor {
    policy: RetryPolicy,
    attempt: Mutex<Option<SharedConnect>>,
    /// Written by the polling task itself, so it settles even when no
    /// waiter is left to drive the shared outcome.
    state: Arc<Mutex<ConnectionState>>,
}

fn set_state(state: &Mutex<ConnectionState>, next: ConnectionState) {
    *state.lock().unwrap_or_else(|e| e.into_inner()) = next;
}

impl ConnectionSupervisor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            attempt: Mutex::new(None),
            state: Arc::new(Mutex::new(ConnectionState::Idle)),
        }
    }

    /// Must be called within a tokio runtime; the polling loop runs as a
    /// spawned task so it keeps going even if every waiter is dropped.
    pub(crate) fn connect<P, Fut>(&self, check: P) -> SharedConnect
    where
        P: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<serde_json::Value>> + Send + 'static,
    {
        let mut attempt = self.attempt.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(shared) = attempt.as_ref() {
            return shared.clone();
        }

        set_state(&self.state, ConnectionState::Connecting);
        let state = self.state.clone();
        let policy = self.policy.clone();
        let handle = tokio::spawn(async move {
            let outcome = Self::poll(policy, check).await;
            let settled = match outcome {
                Ok(_) => ConnectionState::Connected,
                Err(_) => ConnectionState::Failed,
            };
            set_state(&state, settled);
            outcome
        });
        let state = self.state.clone();
        let shared = async move {
            handle.await.unwrap_or_else(|e| {
                set_state(&state, ConnectionState::Failed);
                Err(ConnectTimeout {
                    attempts: 0,
                    last_error: format!("connect task aborted: {e}"),
                })
            })
        }
        .boxed()
        .shared();
        *attempt = Some(shared.clone());
        shared
    }

    async fn poll<P, Fut>(policy: RetryPolicy, mut check: P) -> ConnectOutcome
    where
        P: FnMut() -> Fut,
        Fut: Future<Output = Result<serde_json::Value>>,
    {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            match check().await {
                Ok(status) => {
                    tracing::info!(attempts, "daemon is accepting connections");
                    return Ok(status);
                }
                Err(e) if attempts <= policy.max_attempts => {
                    let delay = policy.delay(attempts);
                    tracing::debug!(attempts, ?delay, "daemon not ready: {e}");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    tracing::error!(attempts, "unable to connect to daemon: {e}");
                    return Err(ConnectTimeout {
                        attempts,
                        last_error: e.to_string(),
                    });
                }
            }
        }
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for ConnectionSupervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSupervisor")
            .field("policy", &self.policy)
            .field("state", &self.state())
            .finish()
    }
}
