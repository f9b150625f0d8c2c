use crate::params::Params;
use crate::Result;

/// A daemon method with a typed reply.
pub trait Call {
    type Response: serde::de::DeserializeOwned;

    fn method(&self) -> &str;
    fn params(self) -> Result<Params>
    where
        Self: Sized,
    {
        Ok(Params::new())
    }
}

#[derive(Debug)]
pub struct Status;
impl Call for Status {
    type Response = StatusReply;

    fn method(&self) -> &str {
        "status"
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct StatusReply {
    pub is_running: bool,
    #[serde(default)]
    pub installation_id: Option<String>,
    #[serde(default)]
    pub startup_status: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug)]
pub struct Version;
impl Call for Version {
    type Response = VersionReply;

    fn method(&self) -> &str {
        "version"
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct VersionReply {
    pub version: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub os_system: Option<String>,
    #[serde(default)]
    pub python_version: Option<String>,
}

#[derive(Debug)]
pub struct Resolve {
    pub urls: Vec<String>,
}

impl Resolve {
    pub fn urls<S: Into<String>>(urls: Vec<S>) -> Self {
        Self {
            urls: urls.into_iter().map(|s| s.into()).collect(),
        }
    }
}

impl Call for Resolve {
    /// Keyed by the requested URL; each value is a claim or an error object.
    type Response = serde_json::Map<String, serde_json::Value>;

    fn method(&self) -> &str {
        "resolve"
    }

    fn params(self) -> Result<Params> {
        let mut params = Params::new();
        params.insert("urls".to_string(), self.urls.into());
        Ok(params)
    }
}
