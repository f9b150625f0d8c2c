use std::collections::HashSet;
use std::future::Future;
use std::ops::Deref;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::header::HeaderMap;

use crate::call::Call;
use crate::endpoint::{Endpoints, DEFAULT_DAEMON_URL};
use crate::error::Error;
use crate::headers::HeaderStore;
use crate::overrides::OverrideRegistry;
use crate::params::{IntoParams, Params};
use crate::supervisor::{ConnectionState, ConnectionSupervisor, RetryPolicy};
use crate::transport::Transport;
use crate::Result;

#[derive(Debug, Clone)]
pub struct ConnectionMeta {
    pub url: String,
    pub alternate_url: String,
    pub alternate_methods: Vec<String>,
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
    pub retry: RetryPolicy,
}

impl Default for ConnectionMeta {
    fn default() -> Self {
        Self::new(DEFAULT_DAEMON_URL)
    }
}

impl ConnectionMeta {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            alternate_url: String::new(),
            alternate_methods: Vec::new(),
            headers: Vec::new(),
            timeout: None,
            retry: RetryPolicy::default(),
        }
    }

    pub fn alternate<S: Into<String>>(mut self, url: &str, methods: Vec<S>) -> Self {
        self.alternate_url = url.to_string();
        self.alternate_methods = methods.into_iter().map(|s| s.into()).collect();
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Handle to one daemon. Clones share headers, overrides, routing and
/// the connect attempt; separate `Client::new` calls share nothing.
#[derive(Clone, Debug)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Deref for Client {
    type Target = ClientInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Client {
    pub fn new(meta: ConnectionMeta) -> Result<Self> {
        Ok(Client {
            inner: Arc::new(ClientInner::new(meta)?),
        })
    }

    /// Wait until the daemon answers `status`. Concurrent and repeated
    /// calls share one polling sequence and its outcome; once connected
    /// the client stays connected.
    pub async fn connect(&self) -> Result<serde_json::Value> {
        let client = self.clone();
        let attempt = self.supervisor.connect(move || {
            let client = client.clone();
            async move { client.status(()).await }
        });
        attempt.await.map_err(Error::from)
    }
}

#[derive(Debug)]
pub struct ClientInner {
    transport: Transport,
    endpoints: RwLock<Endpoints>,
    headers: HeaderStore,
    overrides: OverrideRegistry,
    supervisor: ConnectionSupervisor,
}

impl ClientInner {
    fn new(meta: ConnectionMeta) -> Result<Self> {
        let headers = HeaderStore::default();
        for (key, value) in &meta.headers {
            headers.set(key, value)?;
        }
        Ok(Self {
            transport: Transport::new(meta.timeout)?,
            endpoints: RwLock::new(Endpoints {
                daemon: meta.url,
                alternate: meta.alternate_url,
                alternate_methods: meta.alternate_methods.into_iter().collect(),
            }),
            headers,
            overrides: OverrideRegistry::default(),
            supervisor: ConnectionSupervisor::new(meta.retry),
        })
    }

    /// Call any daemon method by name, including ones without a wrapper.
    /// An override registered for `method` replaces the remote call.
    pub async fn call_method(
        &self,
        method: &str,
        params: impl IntoParams,
    ) -> Result<serde_json::Value> {
        let params = params.into_params()?;
        if let Some(f) = self.overrides.get(method) {
            tracing::debug!(method, "dispatching to override");
            return f(params).await;
        }
        self.dispatch(method, params).await
    }

    pub async fn call<C: Call>(&self, call: C) -> Result<C::Response> {
        let method = call.method().to_string();
        let value = self.call_method(&method, call.params()?).await?;
        serde_json::from_value(value).map_err(Error::Decode)
    }

    async fn dispatch(&self, method: &str, params: Params) -> Result<serde_json::Value> {
        let url = self.read_endpoints().url(method);
        let headers = self.headers.snapshot();
        self.transport
            .call(&url, headers, Transport::next_id(), method, params)
            .await
    }

    fn read_endpoints(&self) -> std::sync::RwLockReadGuard<'_, Endpoints> {
        self.endpoints.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_endpoints(&self) -> std::sync::RwLockWriteGuard<'_, Endpoints> {
        self.endpoints.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Point the client at another daemon, e.g. a web proxy.
    pub fn set_daemon_connection_string(&self, url: &str) {
        self.write_endpoints().daemon = url.to_string();
    }

    pub fn set_alternate_connection_string(&self, url: &str) {
        self.write_endpoints().alternate = url.to_string();
    }

    pub fn set_methods_using_alternate<S: Into<String>>(&self, methods: Vec<S>) {
        self.write_endpoints().alternate_methods =
            methods.into_iter().map(|s| s.into()).collect::<HashSet<_>>();
    }

    pub fn endpoints(&self) -> Endpoints {
        self.read_endpoints().clone()
    }

    pub fn set_api_header(&self, key: &str, value: &str) -> Result<()> {
        self.headers.set(key, value)
    }

    pub fn unset_api_header(&self, key: &str) {
        self.headers.unset(key)
    }

    pub fn api_request_headers(&self) -> HeaderMap {
        self.headers.snapshot()
    }

    pub fn set_override<F, Fut>(&self, method: &str, f: F)
    where
        F: Fn(Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<serde_json::Value>> + Send + 'static,
    {
        self.overrides.set(method, f)
    }

    /// Returns whether an override was registered.
    pub fn unset_override(&self, method: &str) -> bool {
        self.overrides.unset(method)
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.supervisor.state()
    }

    pub fn is_connected(&self) -> bool {
        self.connection_state() == ConnectionState::Connected
    }
}
