use std::collections::HashSet;

pub(crate) const DEFAULT_DAEMON_URL: &str = "http://localhost:5279";

/// Primary and alternate base URLs, and which methods use the alternate.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub daemon: String,
    pub alternate: String,
    pub alternate_methods: HashSet<String>,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            daemon: DEFAULT_DAEMON_URL.to_string(),
            alternate: String::new(),
            alternate_methods: HashSet::new(),
        }
    }
}

impl Endpoints {
    pub fn route(&self, method: &str) -> &str {
        if self.alternate_methods.contains(method) {
            &self.alternate
        } else {
            &self.daemon
        }
    }

    /// The method name is repeated in the query string for server-side routing.
    pub fn url(&self, method: &str) -> String {
        format!("{}?m={}", self.route(method), method)
    }
}
