#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Transport error {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Protocol error: {0}")]
    Protocol(String),
    #[error("Rpc error {0}")]
    Rpc(RpcError),
    #[error(transparent)]
    ConnectionTimeout(#[from] ConnectTimeout),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Invalid header {0}")]
    InvalidHeader(String),
    #[error("Invalid params: {0}")]
    InvalidParams(String),
    #[error("Encode error {0}")]
    Encode(serde_json::Error),
    #[error("Decode error {0}")]
    Decode(serde_json::Error),
}

impl Error {
    pub(crate) fn protocol_unknown_signature() -> Self {
        Error::Protocol("Protocol error with unknown response signature".to_string())
    }
}

/// Error payload returned by the daemon. `detail` keeps the raw JSON so
/// callers can reach fields beyond `message`.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: Option<i64>,
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub detail: serde_json::Value,
}

impl RpcError {
    pub fn from_payload(detail: serde_json::Value) -> Self {
        let (code, message, data) = match &detail {
            serde_json::Value::String(message) => (None, message.clone(), None),
            serde_json::Value::Object(obj) => (
                obj.get("code").and_then(serde_json::Value::as_i64),
                obj.get("message")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| detail.to_string()),
                obj.get("data").cloned(),
            ),
            other => (None, other.to_string(), None),
        };
        Self {
            code,
            message,
            data,
            detail,
        }
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(
                f,
                "RpcError: {{\"code\": {}, \"message\": \"{}\"}}",
                code, self.message
            ),
            None => write!(f, "RpcError: {{\"message\": \"{}\"}}", self.message),
        }
    }
}
impl std::error::Error for RpcError {}

impl From<RpcError> for Error {
    fn from(err: RpcError) -> Self {
        Error::Rpc(err)
    }
}

/// Terminal outcome of a connect sequence that ran out of attempts.
/// Cloneable so every waiter on the shared attempt gets its own copy.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unable to connect to LBRY after {attempts} attempts: {last_error}")]
pub struct ConnectTimeout {
    pub attempts: u32,
    pub last_error: String,
}
