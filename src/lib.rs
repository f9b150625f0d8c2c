pub mod call;
mod client;
pub mod comments;
mod endpoint;
mod error;
mod facade;
mod headers;
pub mod media;
mod overrides;
pub mod params;
mod supervisor;
mod transport;

/// https://www.jsonrpc.org/specification
mod jsonrpc {
    #[derive(serde::Serialize)]
    pub struct Request<'a, I, S> {
        pub jsonrpc: &'a str, // jsonrpc must be "2.0"
        pub method: &'a str,  // A String containing the name of the method to be invoked.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub id: Option<I>, // An identifier established by the Client that MUST contain a String, Number, or NULL value if included.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub params: Option<S>, // A Structured value that holds the parameter values to be used during the invocation of the method.
    }

    /// Loose response envelope. `result` is a double option so that an
    /// explicit `"result": null` can be told apart from a missing field.
    #[derive(serde::Deserialize, Debug)]
    pub struct Response {
        #[serde(default)]
        pub id: Option<serde_json::Value>,
        #[serde(default, with = "::serde_with::rust::double_option")]
        pub result: Option<Option<serde_json::Value>>,
        #[serde(default)]
        pub error: Option<serde_json::Value>,
    }

    impl Response {
        /// The error carried by the envelope, either at the top level or
        /// wrapped inside an otherwise successful `result` object.
        /// Falsy values (`null`, `false`, `0`, `""`) count as no error.
        pub fn error(&self) -> Option<&serde_json::Value> {
            if let Some(error) = self.error.as_ref().filter(|e| is_truthy(e)) {
                return Some(error);
            }
            match &self.result {
                Some(Some(serde_json::Value::Object(result))) => {
                    result.get("error").filter(|e| is_truthy(e))
                }
                _ => None,
            }
        }
    }

    fn is_truthy(value: &serde_json::Value) -> bool {
        match value {
            serde_json::Value::Null => false,
            serde_json::Value::Bool(b) => *b,
            serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            serde_json::Value::String(s) => !s.is_empty(),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use serde_json::json;

        #[test]
        fn error_wrapped_in_result_is_detected() {
            let resp: Response = serde_json::from_str(
                r#"{"jsonrpc":"2.0","id":1,"result":{"error":{"message":"insufficient funds"}}}"#,
            )
            .unwrap();
            assert_eq!(
                resp.error().and_then(|e| e.get("message")).and_then(|m| m.as_str()),
                Some("insufficient funds")
            );
        }

        #[test]
        fn falsy_wrapped_error_is_ignored() {
            for error in [json!(false), json!(""), json!(0), json!(null)] {
                let body = json!({"jsonrpc": "2.0", "id": 1, "result": {"error": error, "ok": 1}});
                let resp: Response = serde_json::from_value(body).unwrap();
                assert!(resp.error().is_none(), "{:?}", resp.result);
            }

            let body = json!({"jsonrpc": "2.0", "id": 1, "error": false, "result": 1});
            let resp: Response = serde_json::from_value(body).unwrap();
            assert!(resp.error().is_none());
        }

        #[test]
        fn null_result_is_present() {
            let resp: Response =
                serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":null}"#).unwrap();
            assert_eq!(resp.result, Some(None));
            assert!(resp.error().is_none());

            let resp: Response = serde_json::from_str(r#"{"jsonrpc":"2.0","id":1}"#).unwrap();
            assert_eq!(resp.result, None);
        }

        #[test]
        fn request_omits_missing_params() {
            let req = Request::<i64, ()> {
                jsonrpc: "2.0",
                method: "status",
                id: Some(7),
                params: None,
            };
            assert_eq!(
                serde_json::to_string(&req).unwrap(),
                r#"{"jsonrpc":"2.0","method":"status","id":7}"#
            );
        }
    }
}

pub use call::Call;
pub use client::{Client, ConnectionMeta};
pub use comments::CommentsClient;
pub use endpoint::Endpoints;
pub use error::{ConnectTimeout, Error, RpcError};
pub use media::MediaType;
pub use overrides::OverrideFn;
pub use params::{IntoParams, Params};
pub use supervisor::{ConnectionState, RetryPolicy};

pub type Result<T> = std::result::Result<T, Error>;
