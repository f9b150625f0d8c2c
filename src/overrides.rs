use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};

use futures_util::future::{BoxFuture, FutureExt};

use crate::params::Params;
use crate::Result;

/// Replacement for the remote dispatch of a single method.
pub type OverrideFn =
    Arc<dyn Fn(Params) -> BoxFuture<'static, Result<serde_json::Value>> + Send + Sync>;

#[derive(Default)]
pub struct OverrideRegistry {
    overrides: RwLock<HashMap<String, OverrideFn>>,
}

impl OverrideRegistry {
    /// Names the client does not know are accepted; they only matter once
    /// something calls them.
    pub fn set<F, Fut>(&self, method: &str, f: F)
    where
        F: Fn(Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<serde_json::Value>> + Send + 'static,
    {
        let f: OverrideFn = Arc::new(move |params| f(params).boxed());
        self.overrides
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(method.to_string(), f);
    }

    pub fn unset(&self, method: &str) -> bool {
        self.overrides
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(method)
            .is_some()
    }

    pub fn get(&self, method: &str) -> Option<OverrideFn> {
        self.overrides
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(method)
            .cloned()
    }
}

impl std::fmt::Debug for OverrideRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let overrides = self.overrides.read().unwrap_or_else(|e| e.into_inner());
        f.debug_set().entries(overrides.keys()).finish()
    }
}
