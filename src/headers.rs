use std::sync::RwLock;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

use crate::error::Error;
use crate::Result;

pub(crate) const JSON_RPC_CONTENT_TYPE: &str = "application/json-rpc";

/// Headers attached to every request a client sends.
#[derive(Debug)]
pub struct HeaderStore {
    headers: RwLock<HeaderMap>,
}

impl Default for HeaderStore {
    fn default() -> Self {
        Self::with_content_type(JSON_RPC_CONTENT_TYPE)
    }
}

impl HeaderStore {
    pub fn with_content_type(content_type: &'static str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        Self {
            headers: RwLock::new(headers),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| Error::InvalidHeader(format!("{key}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::InvalidHeader(format!("{key}: {e}")))?;
        self.headers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name, value);
        Ok(())
    }

    /// Removing a header that was never set is a no-op.
    pub fn unset(&self, key: &str) {
        if let Ok(name) = HeaderName::from_bytes(key.as_bytes()) {
            self.headers
                .write()
                .unwrap_or_else(|e| e.into_inner())
                .remove(name);
        }
    }

    pub fn snapshot(&self) -> HeaderMap {
        self.headers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_json_rpc_content_type() {
        let store = HeaderStore::default();
        assert_eq!(store.snapshot()[CONTENT_TYPE], JSON_RPC_CONTENT_TYPE);
    }

    #[test]
    fn set_then_unset() {
        let store = HeaderStore::default();
        store.set("X-Lbry-Auth-Token", "abc").unwrap();
        assert_eq!(store.snapshot()["x-lbry-auth-token"], "abc");

        store.set("X-Lbry-Auth-Token", "def").unwrap();
        assert_eq!(store.snapshot()["x-lbry-auth-token"], "def");

        store.unset("X-Lbry-Auth-Token");
        store.unset("never-set");
        let headers = store.snapshot();
        assert!(headers.get("x-lbry-auth-token").is_none());
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn rejects_invalid_names() {
        let store = HeaderStore::default();
        assert!(matches!(
            store.set("bad header", "x"),
            Err(Error::InvalidHeader(_))
        ));
    }
}
